//! Predicted travel time for a single seismic phase.
//!
//! One record per phase: the predicted time itself, the derivatives a
//! locator needs to converge, and the statistical and bookkeeping fields
//! an associator consults when weighing the phase.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::fields::{check, emit, extract, present};
use crate::domain::{Convertible, Finding};

const PHASE_KEY: &str = "Phase";
const TRAVEL_TIME_KEY: &str = "TravelTime";
const DISTANCE_DERIVATIVE_KEY: &str = "DistanceDerivative";
const DEPTH_DERIVATIVE_KEY: &str = "DepthDerivative";
const RAY_DERIVATIVE_KEY: &str = "RayDerivative";
const STATISTICAL_SPREAD_KEY: &str = "StatisticalSpread";
const OBSERVABILITY_KEY: &str = "Observability";
const TELESEISMIC_PHASE_GROUP_KEY: &str = "TeleseismicPhaseGroup";
const AUXILIARY_PHASE_GROUP_KEY: &str = "AuxiliaryPhaseGroup";
const LOCATION_USE_FLAG_KEY: &str = "LocationUseFlag";
const ASSOCIATION_WEIGHT_FLAG_KEY: &str = "AssociationWeightFlag";

/// A travel-time prediction for one phase.
///
/// The phase code is letters only (`P`, `pP`, `PKPdf`); anything else
/// fails validation rather than construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TravelTimeData {
    /// Seismic phase code.
    pub phase: Option<String>,
    /// Predicted travel time in seconds.
    pub travel_time: Option<f64>,
    /// Derivative of travel time with respect to distance, in s/deg.
    pub distance_derivative: Option<f64>,
    /// Derivative of travel time with respect to depth, in s/km.
    pub depth_derivative: Option<f64>,
    /// Derivative of ray parameter with respect to distance.
    pub ray_derivative: Option<f64>,
    /// Observed spread of the phase about its theoretical time, in
    /// seconds.
    pub statistical_spread: Option<f64>,
    /// Relative observability of the phase.
    pub observability: Option<f64>,
    /// Teleseismic phase group the phase belongs to.
    pub teleseismic_phase_group: Option<String>,
    /// Auxiliary phase group the phase belongs to.
    pub auxiliary_phase_group: Option<String>,
    /// Whether the phase may be used in a location.
    pub location_use_flag: Option<bool>,
    /// Whether the phase should be down-weighted during association.
    pub association_weight_flag: Option<bool>,
}

impl TravelTimeData {
    /// A prediction from the five required values. Non-finite values read
    /// as absent.
    pub fn new(
        phase: impl Into<String>,
        travel_time: f64,
        distance_derivative: f64,
        depth_derivative: f64,
        ray_derivative: f64,
    ) -> Self {
        TravelTimeData {
            phase: Some(phase.into()),
            travel_time: present(travel_time),
            distance_derivative: present(distance_derivative),
            depth_derivative: present(depth_derivative),
            ray_derivative: present(ray_derivative),
            statistical_spread: None,
            observability: None,
            teleseismic_phase_group: None,
            auxiliary_phase_group: None,
            location_use_flag: None,
            association_weight_flag: None,
        }
    }
}

impl Convertible for TravelTimeData {
    const NAME: &'static str = "TravelTimeData";

    fn from_json(value: &Value) -> Self {
        TravelTimeData {
            phase: extract::string(value, PHASE_KEY),
            travel_time: extract::number(value, TRAVEL_TIME_KEY),
            distance_derivative: extract::number(value, DISTANCE_DERIVATIVE_KEY),
            depth_derivative: extract::number(value, DEPTH_DERIVATIVE_KEY),
            ray_derivative: extract::number(value, RAY_DERIVATIVE_KEY),
            statistical_spread: extract::number(value, STATISTICAL_SPREAD_KEY),
            observability: extract::number(value, OBSERVABILITY_KEY),
            teleseismic_phase_group: extract::optional_string(value, TELESEISMIC_PHASE_GROUP_KEY),
            auxiliary_phase_group: extract::optional_string(value, AUXILIARY_PHASE_GROUP_KEY),
            location_use_flag: extract::boolean(value, LOCATION_USE_FLAG_KEY),
            association_weight_flag: extract::boolean(value, ASSOCIATION_WEIGHT_FLAG_KEY),
        }
    }

    fn to_json(&self) -> Value {
        let mut map = Map::new();
        emit::required_string(&mut map, PHASE_KEY, &self.phase);
        emit::required_number(&mut map, TRAVEL_TIME_KEY, self.travel_time);
        emit::required_number(&mut map, DISTANCE_DERIVATIVE_KEY, self.distance_derivative);
        emit::required_number(&mut map, DEPTH_DERIVATIVE_KEY, self.depth_derivative);
        emit::required_number(&mut map, RAY_DERIVATIVE_KEY, self.ray_derivative);
        emit::optional_number(&mut map, STATISTICAL_SPREAD_KEY, self.statistical_spread);
        emit::optional_number(&mut map, OBSERVABILITY_KEY, self.observability);
        emit::optional_string(&mut map, TELESEISMIC_PHASE_GROUP_KEY, &self.teleseismic_phase_group);
        emit::optional_string(&mut map, AUXILIARY_PHASE_GROUP_KEY, &self.auxiliary_phase_group);
        emit::optional_boolean(&mut map, LOCATION_USE_FLAG_KEY, self.location_use_flag);
        emit::optional_boolean(&mut map, ASSOCIATION_WEIGHT_FLAG_KEY, self.association_weight_flag);
        Value::Object(map)
    }

    fn errors(&self) -> Vec<Finding> {
        let mut findings = Vec::new();
        check::required_alpha(&mut findings, Self::NAME, PHASE_KEY, &self.phase);
        check::required_number(&mut findings, Self::NAME, TRAVEL_TIME_KEY, self.travel_time);
        check::required_number(
            &mut findings,
            Self::NAME,
            DISTANCE_DERIVATIVE_KEY,
            self.distance_derivative,
        );
        check::required_number(
            &mut findings,
            Self::NAME,
            DEPTH_DERIVATIVE_KEY,
            self.depth_derivative,
        );
        check::required_number(&mut findings, Self::NAME, RAY_DERIVATIVE_KEY, self.ray_derivative);
        findings
    }
}

impl Serialize for TravelTimeData {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

/// Deserialization is tolerant: malformed fields read as absent and are
/// reported by [`Convertible::errors`] instead of failing the parse.
impl<'de> Deserialize<'de> for TravelTimeData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(|value| Self::from_json(&value))
    }
}
