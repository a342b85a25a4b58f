//! Travel-time curves prepared for plotting.
//!
//! A plot is a family of branches, one per phase, each carrying the
//! ordered distance/time samples that trace its curve. Branches and
//! samples are entities in their own right and validate recursively,
//! so a bad sample three levels down still surfaces in the top-level
//! error list with its position attached.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::fields::{check, emit, extract, present};
use crate::domain::{Convertible, Finding};

const MAXIMUM_TRAVEL_TIME_KEY: &str = "MaximumTravelTime";
const BRANCHES_KEY: &str = "Branches";
const PHASE_KEY: &str = "Phase";
const SAMPLES_KEY: &str = "Samples";
const DISTANCE_KEY: &str = "Distance";
const TRAVEL_TIME_KEY: &str = "TravelTime";
const STATISTICAL_SPREAD_KEY: &str = "StatisticalSpread";
const OBSERVABILITY_KEY: &str = "Observability";

/// A complete set of plottable travel-time curves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TravelTimePlotData {
    /// Largest travel time across all branches, in seconds. Sets the
    /// vertical extent of a plot.
    pub maximum_travel_time: Option<f64>,
    /// Curves, one per phase. Source order is preserved.
    pub branches: Vec<TravelTimePlotDataBranch>,
}

/// One plottable curve: a phase and its ordered samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TravelTimePlotDataBranch {
    /// Seismic phase code the curve belongs to.
    pub phase: Option<String>,
    /// Curve samples in increasing-distance order as supplied.
    pub samples: Vec<TravelTimePlotDataSample>,
}

/// A single point on a travel-time curve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TravelTimePlotDataSample {
    /// Source-receiver distance in degrees.
    pub distance: Option<f64>,
    /// Predicted travel time in seconds.
    pub travel_time: Option<f64>,
    /// Observed spread of the phase about its theoretical time, in
    /// seconds.
    pub statistical_spread: Option<f64>,
    /// Relative observability of the phase at this distance.
    pub observability: Option<f64>,
}

impl TravelTimePlotData {
    /// A plot from its vertical extent and branches. Non-finite values
    /// read as absent.
    pub fn new(maximum_travel_time: f64, branches: Vec<TravelTimePlotDataBranch>) -> Self {
        TravelTimePlotData {
            maximum_travel_time: present(maximum_travel_time),
            branches,
        }
    }
}

impl TravelTimePlotDataBranch {
    /// A branch from its phase code and samples.
    pub fn new(phase: impl Into<String>, samples: Vec<TravelTimePlotDataSample>) -> Self {
        TravelTimePlotDataBranch {
            phase: Some(phase.into()),
            samples,
        }
    }
}

impl TravelTimePlotDataSample {
    /// A sample from the two required values. Non-finite values read as
    /// absent.
    pub fn new(distance: f64, travel_time: f64) -> Self {
        TravelTimePlotDataSample {
            distance: present(distance),
            travel_time: present(travel_time),
            statistical_spread: None,
            observability: None,
        }
    }
}

impl Convertible for TravelTimePlotData {
    const NAME: &'static str = "TravelTimePlotData";

    fn from_json(value: &Value) -> Self {
        TravelTimePlotData {
            maximum_travel_time: extract::number(value, MAXIMUM_TRAVEL_TIME_KEY),
            branches: extract::entities(value, BRANCHES_KEY),
        }
    }

    fn to_json(&self) -> Value {
        let mut map = Map::new();
        emit::required_number(&mut map, MAXIMUM_TRAVEL_TIME_KEY, self.maximum_travel_time);
        emit::entities(&mut map, BRANCHES_KEY, &self.branches);
        Value::Object(map)
    }

    fn errors(&self) -> Vec<Finding> {
        let mut findings = Vec::new();
        check::required_number(
            &mut findings,
            Self::NAME,
            MAXIMUM_TRAVEL_TIME_KEY,
            self.maximum_travel_time,
        );
        check::required_entities(&mut findings, Self::NAME, BRANCHES_KEY, &self.branches);
        findings
    }
}

impl Convertible for TravelTimePlotDataBranch {
    const NAME: &'static str = "TravelTimePlotDataBranch";

    fn from_json(value: &Value) -> Self {
        TravelTimePlotDataBranch {
            phase: extract::string(value, PHASE_KEY),
            samples: extract::entities(value, SAMPLES_KEY),
        }
    }

    fn to_json(&self) -> Value {
        let mut map = Map::new();
        emit::required_string(&mut map, PHASE_KEY, &self.phase);
        emit::entities(&mut map, SAMPLES_KEY, &self.samples);
        Value::Object(map)
    }

    fn errors(&self) -> Vec<Finding> {
        let mut findings = Vec::new();
        check::required_alpha(&mut findings, Self::NAME, PHASE_KEY, &self.phase);
        check::required_entities(&mut findings, Self::NAME, SAMPLES_KEY, &self.samples);
        findings
    }
}

impl Convertible for TravelTimePlotDataSample {
    const NAME: &'static str = "TravelTimePlotDataSample";

    fn from_json(value: &Value) -> Self {
        TravelTimePlotDataSample {
            distance: extract::number(value, DISTANCE_KEY),
            travel_time: extract::number(value, TRAVEL_TIME_KEY),
            statistical_spread: extract::number(value, STATISTICAL_SPREAD_KEY),
            observability: extract::number(value, OBSERVABILITY_KEY),
        }
    }

    fn to_json(&self) -> Value {
        let mut map = Map::new();
        emit::required_number(&mut map, DISTANCE_KEY, self.distance);
        emit::required_number(&mut map, TRAVEL_TIME_KEY, self.travel_time);
        emit::optional_number(&mut map, STATISTICAL_SPREAD_KEY, self.statistical_spread);
        emit::optional_number(&mut map, OBSERVABILITY_KEY, self.observability);
        Value::Object(map)
    }

    fn errors(&self) -> Vec<Finding> {
        let mut findings = Vec::new();
        check::required_number(&mut findings, Self::NAME, DISTANCE_KEY, self.distance);
        check::required_number(&mut findings, Self::NAME, TRAVEL_TIME_KEY, self.travel_time);
        findings
    }
}

impl Serialize for TravelTimePlotData {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

/// Deserialization is tolerant: malformed fields read as absent and are
/// reported by [`Convertible::errors`] instead of failing the parse.
impl<'de> Deserialize<'de> for TravelTimePlotData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(|value| Self::from_json(&value))
    }
}

impl Serialize for TravelTimePlotDataBranch {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TravelTimePlotDataBranch {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(|value| Self::from_json(&value))
    }
}

impl Serialize for TravelTimePlotDataSample {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TravelTimePlotDataSample {
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

    fn sample(distance: f64, travel_time: f64) -> TravelTimePlotDataSample {
        TravelTimePlotDataSample::new(distance, travel_time)
    }

    fn plot() -> TravelTimePlotData {
        TravelTimePlotData::new(
            1300.0,
            vec![
                TravelTimePlotDataBranch::new("Pg", vec![sample(1.0, 22.2), sample(2.0, 44.0)]),
                TravelTimePlotDataBranch::new("Sg", vec![sample(1.0, 38.1)]),
            ],
        )
    }

    #[test]
    fn full_plot_round_trips() {
        let text = concat!(
            r#"{"Branches":[{"Phase":"Pg","Samples":["#,
            r#"{"Distance":1.0,"Observability":0.34,"StatisticalSpread":1.5,"TravelTime":22.2}]}],"#,
            r#""MaximumTravelTime":1300.0}"#
        );
        let plot = TravelTimePlotData::from_json_text(text).unwrap();
        assert_eq!(plot.branches.len(), 1);
        assert_eq!(plot.branches[0].samples[0].observability, Some(0.34));
        assert!(plot.is_valid());
        assert_eq!(plot.to_json_text(), text);
    }

    #[test]
    fn branch_order_survives_round_trip() {
        let back = TravelTimePlotData::from_json(&plot().to_json());
        assert_eq!(back, plot());
        assert_eq!(back.branches[0].phase.as_deref(), Some("Pg"));
        assert_eq!(back.branches[1].phase.as_deref(), Some("Sg"));
    }

    #[test]
    fn missing_branches_reports_missing() {
        let plot = TravelTimePlotData::from_json(&json!({"MaximumTravelTime": 1300.0}));
        assert_eq!(
            plot.error_messages(),
            vec!["No Branches in TravelTimePlotData class."]
        );
    }

    #[test]
    fn empty_branch_list_never_emitted() {
        let plot = TravelTimePlotData::new(1300.0, Vec::new());
        assert_eq!(plot.to_json(), json!({"MaximumTravelTime": 1300.0}));
    }

    #[test]
    fn nested_findings_are_position_qualified() {
        let plot = TravelTimePlotData::from_json(&json!({
            "MaximumTravelTime": 1300.0,
            "Branches": [
                {"Phase": "Pg", "Samples": [{"Distance": 1.0, "TravelTime": 22.2}]},
                {"Phase": "Sg", "Samples": [{"Distance": 1.0}]}
            ]
        }));
        assert_eq!(
            plot.error_messages(),
            vec!["Branches[1]: Samples[0]: No TravelTime in TravelTimePlotDataSample class."]
        );
    }

    #[test]
    fn branch_without_samples_reports_missing() {
        let branch = TravelTimePlotDataBranch::from_json(&json!({"Phase": "Pg"}));
        assert_eq!(
            branch.error_messages(),
            vec!["No Samples in TravelTimePlotDataBranch class."]
        );
    }

    #[test]
    fn non_array_branches_read_as_absent() {
        let plot = TravelTimePlotData::from_json(&json!({
            "MaximumTravelTime": 1300.0,
            "Branches": "Pg"
        }));
        assert!(plot.branches.is_empty());
        assert_eq!(
            plot.error_messages(),
            vec!["No Branches in TravelTimePlotData class."]
        );
    }

    #[test]
    fn sample_optionals_omitted_when_absent() {
        assert_eq!(
            sample(1.0, 22.2).to_json(),
            json!({"Distance": 1.0, "TravelTime": 22.2})
        );
    }

    #[test]
    fn serde_integration_round_trips() {
        let text = serde_json::to_string(&plot()).unwrap();
        let back: TravelTimePlotData = serde_json::from_str(&text).unwrap();
        assert_eq!(back, plot());
    }
}
