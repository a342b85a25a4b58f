//! A travel-time lookup and its results.
//!
//! A request names a source-receiver geometry and asks for either plain
//! predictions, plottable curves, or plot statistics. The same entity
//! carries the answer back: the service fills in `data` or `plot_data`
//! according to the request type, so one round-tripping record covers
//! both directions of the exchange.

use std::fmt;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::trace;

use crate::domain::fields::{check, emit, extract, present};
use crate::domain::{Convertible, Finding, TravelTimeData, TravelTimePlotData};

const TYPE_KEY: &str = "Type";
const DISTANCE_KEY: &str = "Distance";
const ELEVATION_KEY: &str = "Elevation";
const LATITUDE_KEY: &str = "Latitude";
const LONGITUDE_KEY: &str = "Longitude";
const DATA_KEY: &str = "Data";
const PLOT_DATA_KEY: &str = "PlotData";

/// What a travel-time request asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestType {
    /// Per-phase predictions for the given geometry.
    #[default]
    Standard,
    /// Full travel-time curves for plotting.
    Plot,
    /// Travel-time curves with statistics attached.
    PlotStatistics,
}

impl RequestType {
    /// The wire spelling of this request type.
    pub fn as_str(self) -> &'static str {
        match self {
            RequestType::Standard => "Standard",
            RequestType::Plot => "Plot",
            RequestType::PlotStatistics => "PlotStatistics",
        }
    }

    /// Parses a wire spelling; `None` when unrecognized.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "Standard" => Some(RequestType::Standard),
            "Plot" => Some(RequestType::Plot),
            "PlotStatistics" => Some(RequestType::PlotStatistics),
            _ => None,
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A travel-time lookup for one source-receiver geometry.
///
/// # Examples
///
/// ```
/// use quake_formats::domain::{Convertible, RequestType, TravelTimeRequest};
///
/// let request =
///     TravelTimeRequest::from_json_text(r#"{"Distance":45.2,"Elevation":0.0}"#).unwrap();
/// assert_eq!(request.request_type, RequestType::Standard);
/// assert!(request.is_valid());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TravelTimeRequest {
    /// What is being asked for. Absent or unrecognized wire values read
    /// as [`RequestType::Standard`].
    pub request_type: RequestType,
    /// Source-receiver distance in degrees.
    pub distance: Option<f64>,
    /// Receiver elevation in kilometers relative to the WGS84 datum.
    pub elevation: Option<f64>,
    /// Receiver latitude in decimal degrees.
    pub latitude: Option<f64>,
    /// Receiver longitude in decimal degrees.
    pub longitude: Option<f64>,
    /// Returned predictions, one per phase. Empty until answered.
    pub data: Vec<TravelTimeData>,
    /// Returned plottable curves. Empty until answered.
    pub plot_data: Vec<TravelTimePlotData>,
}

impl TravelTimeRequest {
    /// A request from its type and required geometry. Non-finite values
    /// read as absent.
    pub fn new(request_type: RequestType, distance: f64, elevation: f64) -> Self {
        TravelTimeRequest {
            request_type,
            distance: present(distance),
            elevation: present(elevation),
            latitude: None,
            longitude: None,
            data: Vec::new(),
            plot_data: Vec::new(),
        }
    }
}

impl Convertible for TravelTimeRequest {
    const NAME: &'static str = "TravelTimeRequest";

    fn from_json(value: &Value) -> Self {
        let request_type = match extract::string(value, TYPE_KEY) {
            None => RequestType::default(),
            Some(name) => RequestType::parse(&name).unwrap_or_else(|| {
                trace!(value = name.as_str(), "unrecognized request type, using Standard");
                RequestType::default()
            }),
        };
        TravelTimeRequest {
            request_type,
            distance: extract::number(value, DISTANCE_KEY),
            elevation: extract::number(value, ELEVATION_KEY),
            latitude: extract::number(value, LATITUDE_KEY),
            longitude: extract::number(value, LONGITUDE_KEY),
            data: extract::entities(value, DATA_KEY),
            plot_data: extract::entities(value, PLOT_DATA_KEY),
        }
    }

    fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            TYPE_KEY.to_string(),
            Value::String(self.request_type.as_str().to_string()),
        );
        emit::required_number(&mut map, DISTANCE_KEY, self.distance);
        emit::required_number(&mut map, ELEVATION_KEY, self.elevation);
        emit::optional_number(&mut map, LATITUDE_KEY, self.latitude);
        emit::optional_number(&mut map, LONGITUDE_KEY, self.longitude);
        emit::entities(&mut map, DATA_KEY, &self.data);
        emit::entities(&mut map, PLOT_DATA_KEY, &self.plot_data);
        Value::Object(map)
    }

    fn errors(&self) -> Vec<Finding> {
        let mut findings = Vec::new();
        check::required_number(&mut findings, Self::NAME, DISTANCE_KEY, self.distance);
        check::required_number(&mut findings, Self::NAME, ELEVATION_KEY, self.elevation);
        check::elements(&mut findings, DATA_KEY, &self.data);
        check::elements(&mut findings, PLOT_DATA_KEY, &self.plot_data);
        findings
    }
}

impl Serialize for TravelTimeRequest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

/// Deserialization is tolerant: malformed fields read as absent and are
/// reported by [`Convertible::errors`] instead of failing the parse.
impl<'de> Deserialize<'de> for TravelTimeRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(|value| Self::from_json(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_request_defaults_to_standard() {
        let request = TravelTimeRequest::from_json(&json!({"Distance": 45.2, "Elevation": 0.0}));
        assert_eq!(request.request_type, RequestType::Standard);
        assert!(request.data.is_empty());
        assert!(request.plot_data.is_empty());
        assert!(request.is_valid());
        assert_eq!(
            request.to_json(),
            json!({"Type": "Standard", "Distance": 45.2, "Elevation": 0.0})
        );
    }

    #[test]
    fn full_request_round_trips() {
        let text = concat!(
            r#"{"Data":[{"DepthDerivative":3.45,"DistanceDerivative":1.2,"Phase":"Pg","#,
            r#""RayDerivative":5.67,"TravelTime":22.2}],"#,
            r#""Distance":45.2,"Elevation":1.589,"Latitude":45.9,"Longitude":-112.5,"#,
            r#""PlotData":[{"Branches":[{"Phase":"Pg","Samples":"#,
            r#"[{"Distance":1.0,"TravelTime":22.2}]}],"MaximumTravelTime":1300.0}],"#,
            r#""Type":"Plot"}"#
        );
        let request = TravelTimeRequest::from_json_text(text).unwrap();
        assert_eq!(request.request_type, RequestType::Plot);
        assert_eq!(request.data.len(), 1);
        assert_eq!(request.plot_data.len(), 1);
        assert!(request.is_valid());
        assert_eq!(request.to_json_text(), text);
    }

    #[test]
    fn unrecognized_type_reads_as_standard() {
        let request = TravelTimeRequest::from_json(&json!({
            "Type": "Exotic",
            "Distance": 45.2,
            "Elevation": 0.0
        }));
        assert_eq!(request.request_type, RequestType::Standard);
        assert!(request.is_valid());
    }

    #[test]
    fn type_spellings_round_trip() {
        for request_type in [
            RequestType::Standard,
            RequestType::Plot,
            RequestType::PlotStatistics,
        ] {
            assert_eq!(RequestType::parse(request_type.as_str()), Some(request_type));
        }
        assert_eq!(RequestType::parse("standard"), None);
    }

    #[test]
    fn missing_geometry_reports_in_declaration_order() {
        let request = TravelTimeRequest::from_json(&json!({"Type": "Standard"}));
        assert_eq!(
            request.error_messages(),
            vec![
                "No Distance in TravelTimeRequest class.",
                "No Elevation in TravelTimeRequest class.",
            ]
        );
    }

    #[test]
    fn returned_data_findings_are_position_qualified() {
        let request = TravelTimeRequest::from_json(&json!({
            "Distance": 45.2,
            "Elevation": 0.0,
            "Data": [{
                "TravelTime": 22.2,
                "DistanceDerivative": 1.2,
                "DepthDerivative": 3.45,
                "RayDerivative": 5.67
            }]
        }));
        assert_eq!(
            request.error_messages(),
            vec!["Data[0]: No Phase in TravelTimeData class."]
        );
    }

    #[test]
    fn empty_sequences_never_emitted() {
        let request = TravelTimeRequest::new(RequestType::PlotStatistics, 45.2, 0.0);
        assert_eq!(
            request.to_json(),
            json!({"Type": "PlotStatistics", "Distance": 45.2, "Elevation": 0.0})
        );
    }

    #[test]
    fn serde_integration_round_trips() {
        let request = TravelTimeRequest::new(RequestType::Plot, 45.2, 1.589);
        let text = serde_json::to_string(&request).unwrap();
        let back: TravelTimeRequest = serde_json::from_str(&text).unwrap();
        assert_eq!(back, request);
    }
}
