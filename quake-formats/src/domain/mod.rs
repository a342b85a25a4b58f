//! Domain entities for seismic processing payloads.
//!
//! Every entity follows the same contract: construction from JSON is
//! tolerant and never fails, while [`Convertible::errors`] reports every
//! missing or malformed required field in one pass. Callers must
//! validate before trusting an entity; the constructor alone guarantees
//! nothing.

mod convert;
mod fields;
mod finding;
mod hypocenter;
mod site;
mod travel_time_data;
mod travel_time_plot_data;
mod travel_time_request;

pub use convert::Convertible;
pub use finding::Finding;
pub use hypocenter::Hypocenter;
pub use site::Site;
pub use travel_time_data::TravelTimeData;
pub use travel_time_plot_data::{
    TravelTimePlotData, TravelTimePlotDataBranch, TravelTimePlotDataSample,
};
pub use travel_time_request::{RequestType, TravelTimeRequest};
