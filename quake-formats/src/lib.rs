//! Seismic processing message formats.
//!
//! Conversion and validation for the JSON payloads that seismic
//! processing services exchange: hypocenters, station identifications,
//! and travel-time requests with their returned data. Parsing is
//! tolerant and validation is explicit, so a caller gets every problem
//! with a message in one report instead of an exception on the first.

pub mod domain;
pub mod json;
pub mod time;
