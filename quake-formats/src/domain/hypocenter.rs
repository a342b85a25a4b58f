//! Earthquake origin location and time.
//!
//! A hypocenter places an event in space and time: latitude, longitude,
//! depth in kilometers, and an origin time carried as an ISO-8601 string
//! on the wire but as floating-point epoch seconds in the entity. Each
//! coordinate may carry an uncertainty in its matching error field.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::fields::{check, emit, extract, present};
use crate::domain::{Convertible, Finding};

const LATITUDE_KEY: &str = "Latitude";
const LONGITUDE_KEY: &str = "Longitude";
const TIME_KEY: &str = "Time";
const DEPTH_KEY: &str = "Depth";
const LATITUDE_ERROR_KEY: &str = "LatitudeError";
const LONGITUDE_ERROR_KEY: &str = "LongitudeError";
const TIME_ERROR_KEY: &str = "TimeError";
const DEPTH_ERROR_KEY: &str = "DepthError";

/// An earthquake origin.
///
/// # Examples
///
/// ```
/// use quake_formats::domain::{Convertible, Hypocenter};
///
/// let text = r#"{
///     "Latitude": 45.9,
///     "Longitude": -112.5,
///     "Time": "2019-07-06T03:19:53.000000Z",
///     "Depth": 10.0
/// }"#;
/// let origin = Hypocenter::from_json_text(text).unwrap();
/// assert_eq!(origin.depth, Some(10.0));
/// assert!(origin.is_valid());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hypocenter {
    /// Geographic latitude in decimal degrees.
    pub latitude: Option<f64>,
    /// Geographic longitude in decimal degrees.
    pub longitude: Option<f64>,
    /// Origin time in epoch seconds.
    pub time: Option<f64>,
    /// Depth below the surface in kilometers.
    pub depth: Option<f64>,
    /// Latitude uncertainty in decimal degrees.
    pub latitude_error: Option<f64>,
    /// Longitude uncertainty in decimal degrees.
    pub longitude_error: Option<f64>,
    /// Origin time uncertainty in seconds.
    pub time_error: Option<f64>,
    /// Depth uncertainty in kilometers.
    pub depth_error: Option<f64>,
}

impl Hypocenter {
    /// A hypocenter from the four required values. Non-finite values read
    /// as absent.
    pub fn new(latitude: f64, longitude: f64, time: f64, depth: f64) -> Self {
        Hypocenter {
            latitude: present(latitude),
            longitude: present(longitude),
            time: present(time),
            depth: present(depth),
            latitude_error: None,
            longitude_error: None,
            time_error: None,
            depth_error: None,
        }
    }
}

impl Convertible for Hypocenter {
    const NAME: &'static str = "Hypocenter";

    fn from_json(value: &Value) -> Self {
        Hypocenter {
            latitude: extract::number(value, LATITUDE_KEY),
            longitude: extract::number(value, LONGITUDE_KEY),
            time: extract::time(value, TIME_KEY),
            depth: extract::number(value, DEPTH_KEY),
            latitude_error: extract::number(value, LATITUDE_ERROR_KEY),
            longitude_error: extract::number(value, LONGITUDE_ERROR_KEY),
            time_error: extract::number(value, TIME_ERROR_KEY),
            depth_error: extract::number(value, DEPTH_ERROR_KEY),
        }
    }

    fn to_json(&self) -> Value {
        let mut map = Map::new();
        emit::required_number(&mut map, LATITUDE_KEY, self.latitude);
        emit::required_number(&mut map, LONGITUDE_KEY, self.longitude);
        emit::required_time(&mut map, TIME_KEY, self.time);
        emit::required_number(&mut map, DEPTH_KEY, self.depth);
        emit::optional_number(&mut map, LATITUDE_ERROR_KEY, self.latitude_error);
        emit::optional_number(&mut map, LONGITUDE_ERROR_KEY, self.longitude_error);
        emit::optional_number(&mut map, TIME_ERROR_KEY, self.time_error);
        emit::optional_number(&mut map, DEPTH_ERROR_KEY, self.depth_error);
        Value::Object(map)
    }

    fn errors(&self) -> Vec<Finding> {
        let mut findings = Vec::new();
        check::required_number(&mut findings, Self::NAME, LATITUDE_KEY, self.latitude);
        check::required_number(&mut findings, Self::NAME, LONGITUDE_KEY, self.longitude);
        check::required_number(&mut findings, Self::NAME, TIME_KEY, self.time);
        check::required_number(&mut findings, Self::NAME, DEPTH_KEY, self.depth);
        findings
    }
}

impl Serialize for Hypocenter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

/// Deserialization is tolerant: malformed fields read as absent and are
/// reported by [`Convertible::errors`] instead of failing the parse.
impl<'de> Deserialize<'de> for Hypocenter {
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

    // 2019-07-06T03:19:53Z
    const ORIGIN_EPOCH: f64 = 1562383193.0;

    fn origin() -> Hypocenter {
        Hypocenter::new(45.9, -112.5, ORIGIN_EPOCH, 10.0)
    }

    #[test]
    fn full_hypocenter_round_trips() {
        let text = concat!(
            r#"{"Depth":10.0,"DepthError":1.2,"Latitude":45.9,"LatitudeError":0.02,"#,
            r#""Longitude":-112.5,"LongitudeError":0.04,"#,
            r#""Time":"2019-07-06T03:19:53.000000Z","TimeError":0.5}"#
        );
        let hypocenter = Hypocenter::from_json_text(text).unwrap();
        assert_eq!(hypocenter.time, Some(ORIGIN_EPOCH));
        assert_eq!(hypocenter.latitude_error, Some(0.02));
        assert!(hypocenter.is_valid());
        assert_eq!(hypocenter.to_json_text(), text);
    }

    #[test]
    fn time_emitted_as_iso8601() {
        let rendered = origin().to_json();
        assert_eq!(rendered["Time"], json!("2019-07-06T03:19:53.000000Z"));
    }

    #[test]
    fn optional_errors_omitted_when_absent() {
        let rendered = origin().to_json();
        assert_eq!(
            rendered,
            json!({
                "Latitude": 45.9,
                "Longitude": -112.5,
                "Time": "2019-07-06T03:19:53.000000Z",
                "Depth": 10.0
            })
        );
    }

    #[test]
    fn missing_fields_report_in_declaration_order() {
        let hypocenter = Hypocenter::from_json(&json!({}));
        assert_eq!(
            hypocenter.error_messages(),
            vec![
                "No Latitude in Hypocenter class.",
                "No Longitude in Hypocenter class.",
                "No Time in Hypocenter class.",
                "No Depth in Hypocenter class.",
            ]
        );
    }

    #[test]
    fn unparseable_time_reads_as_absent() {
        let hypocenter = Hypocenter::from_json(&json!({
            "Latitude": 45.9,
            "Longitude": -112.5,
            "Time": "six minutes past three",
            "Depth": 10.0
        }));
        assert_eq!(hypocenter.time, None);
        assert_eq!(hypocenter.error_messages(), vec!["No Time in Hypocenter class."]);
    }

    #[test]
    fn absent_required_numbers_emit_null() {
        let rendered = Hypocenter::from_json(&json!({})).to_json();
        assert_eq!(
            rendered,
            json!({"Latitude": null, "Longitude": null, "Time": null, "Depth": null})
        );
    }

    #[test]
    fn nan_optional_never_emitted() {
        let mut hypocenter = origin();
        hypocenter.depth_error = Some(f64::NAN);
        assert!(hypocenter.to_json().get("DepthError").is_none());
    }

    #[test]
    fn constructor_normalizes_non_finite() {
        let hypocenter = Hypocenter::new(f64::NAN, -112.5, ORIGIN_EPOCH, 10.0);
        assert_eq!(hypocenter.latitude, None);
        assert_eq!(
            hypocenter.error_messages(),
            vec!["No Latitude in Hypocenter class."]
        );

        let hypocenter = Hypocenter::new(45.9, f64::NEG_INFINITY, ORIGIN_EPOCH, 10.0);
        assert_eq!(hypocenter.longitude, None);
    }

    #[test]
    fn infinite_required_field_fails_validation() {
        // Infinity has no JSON form, so it counts as missing.
        let mut hypocenter = origin();
        hypocenter.latitude = Some(f64::INFINITY);
        assert!(!hypocenter.is_valid());
        assert_eq!(
            hypocenter.error_messages(),
            vec!["No Latitude in Hypocenter class."]
        );
    }

    #[test]
    fn serde_integration_round_trips() {
        let text = serde_json::to_string(&origin()).unwrap();
        let back: Hypocenter = serde_json::from_str(&text).unwrap();
        assert_eq!(back, origin());
    }
}
