//! Seismic station identification.
//!
//! A site names a sensor by its SCNL coordinates: station and network are
//! always required, channel and location narrow the identification down
//! to a single instrument when provided.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::fields::{check, emit, extract};
use crate::domain::{Convertible, Finding};

const STATION_KEY: &str = "Station";
const NETWORK_KEY: &str = "Network";
const CHANNEL_KEY: &str = "Channel";
const LOCATION_KEY: &str = "Location";

/// A station identification.
///
/// # Examples
///
/// ```
/// use quake_formats::domain::{Convertible, Site};
///
/// let site = Site::from_json_text(r#"{"Station":"BOZ","Network":"US"}"#).unwrap();
/// assert_eq!(site.station.as_deref(), Some("BOZ"));
/// assert!(site.is_valid());
///
/// // Validation is deferred, so bad input still constructs.
/// let bare = Site::from_json_text("{}").unwrap();
/// assert_eq!(bare.error_messages()[0], "No Station in Site class.");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Site {
    /// Station code, e.g. `BOZ`.
    pub station: Option<String>,
    /// Network code, e.g. `US`.
    pub network: Option<String>,
    /// Channel code, e.g. `BHZ`.
    pub channel: Option<String>,
    /// Location code, e.g. `00`.
    pub location: Option<String>,
}

impl Site {
    /// A site from the two required codes.
    pub fn new(station: impl Into<String>, network: impl Into<String>) -> Self {
        Site {
            station: Some(station.into()),
            network: Some(network.into()),
            channel: None,
            location: None,
        }
    }
}

impl Convertible for Site {
    const NAME: &'static str = "Site";

    fn from_json(value: &Value) -> Self {
        Site {
            station: extract::string(value, STATION_KEY),
            network: extract::string(value, NETWORK_KEY),
            channel: extract::optional_string(value, CHANNEL_KEY),
            location: extract::optional_string(value, LOCATION_KEY),
        }
    }

    fn to_json(&self) -> Value {
        let mut map = Map::new();
        emit::required_string(&mut map, STATION_KEY, &self.station);
        emit::required_string(&mut map, NETWORK_KEY, &self.network);
        emit::optional_string(&mut map, CHANNEL_KEY, &self.channel);
        emit::optional_string(&mut map, LOCATION_KEY, &self.location);
        Value::Object(map)
    }

    fn errors(&self) -> Vec<Finding> {
        let mut findings = Vec::new();
        check::required_string(&mut findings, Self::NAME, STATION_KEY, &self.station);
        check::required_string(&mut findings, Self::NAME, NETWORK_KEY, &self.network);
        findings
    }
}

impl Serialize for Site {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

/// Deserialization is tolerant: malformed fields read as absent and are
/// reported by [`Convertible::errors`] instead of failing the parse.
impl<'de> Deserialize<'de> for Site {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(|value| Self::from_json(&value))
    }
}
