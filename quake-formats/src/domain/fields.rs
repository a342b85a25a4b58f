//! Tolerant field extraction, emission, and checking.
//!
//! Entities parse untrusted JSON by pulling each field individually: a
//! missing key, a `null`, or a value of the wrong JSON type reads as
//! absent rather than an error. The wire sentinel policy lives here too:
//! absent required scalars emit `""` (strings) or `null` (numbers and
//! timestamps), absent optional fields are omitted entirely. Mismatched
//! types are reported at trace level; `null` is the wire's own "absent"
//! and stays quiet.

/// Non-finite values read as absent. NaN is the wire sentinel for
/// numbers; infinities have no JSON representation either.
pub(crate) fn present(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

pub(crate) mod extract {
    use serde_json::Value;
    use tracing::trace;

    use crate::domain::Convertible;
    use crate::time;

    /// A string field. Keeps empty strings so required-field validation
    /// can distinguish "provided but empty" from "never provided".
    pub(crate) fn string(value: &Value, key: &str) -> Option<String> {
        match value.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                trace!(field = key, "ignoring non-string value");
                None
            }
        }
    }

    /// An optional string field; the empty-string wire sentinel reads as
    /// absent.
    pub(crate) fn optional_string(value: &Value, key: &str) -> Option<String> {
        string(value, key).filter(|s| !s.is_empty())
    }

    /// A numeric field. JSON numbers are always finite, so no NaN can
    /// enter an entity this way.
    pub(crate) fn number(value: &Value, key: &str) -> Option<f64> {
        match value.get(key) {
            None | Some(Value::Null) => None,
            Some(v) if v.is_number() => v.as_f64(),
            Some(_) => {
                trace!(field = key, "ignoring non-numeric value");
                None
            }
        }
    }

    /// A boolean field.
    pub(crate) fn boolean(value: &Value, key: &str) -> Option<bool> {
        match value.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::Bool(b)) => Some(*b),
            Some(_) => {
                trace!(field = key, "ignoring non-boolean value");
                None
            }
        }
    }

    /// A timestamp field: an ISO-8601 string on the wire, epoch seconds in
    /// the entity. Unparseable timestamps read as absent.
    pub(crate) fn time(value: &Value, key: &str) -> Option<f64> {
        match value.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => match time::parse_iso8601(s) {
                Ok(epoch) => Some(epoch),
                Err(error) => {
                    trace!(field = key, %error, "ignoring unparseable timestamp");
                    None
                }
            },
            Some(_) => {
                trace!(field = key, "ignoring non-string timestamp");
                None
            }
        }
    }

    /// A sequence of entities. Absent keys, `null`, and non-array values
    /// read as empty. Elements that are not objects degrade to all-absent
    /// entities, so element order and count survive for validation to
    /// report.
    pub(crate) fn entities<T: Convertible>(value: &Value, key: &str) -> Vec<T> {
        match value.get(key) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.iter().map(T::from_json).collect(),
            Some(_) => {
                trace!(field = key, "ignoring non-array value");
                Vec::new()
            }
        }
    }
}

pub(crate) mod emit {
    use serde_json::{Map, Number, Value};

    use crate::domain::Convertible;
    use crate::time;

    /// Insert a required string; absent emits the `""` wire sentinel.
    pub(crate) fn required_string(map: &mut Map<String, Value>, key: &str, field: &Option<String>) {
        let text = field.clone().unwrap_or_default();
        map.insert(key.to_string(), Value::String(text));
    }

    /// Insert a required number; absent emits `null` (JSON cannot carry
    /// NaN).
    pub(crate) fn required_number(map: &mut Map<String, Value>, key: &str, field: Option<f64>) {
        let value = field
            .and_then(Number::from_f64)
            .map_or(Value::Null, Value::Number);
        map.insert(key.to_string(), value);
    }

    /// Insert a required timestamp as an ISO-8601 string; `null` when
    /// absent or unrepresentable.
    pub(crate) fn required_time(map: &mut Map<String, Value>, key: &str, field: Option<f64>) {
        let value = field
            .and_then(|epoch| time::format_epoch(epoch).ok())
            .map_or(Value::Null, Value::String);
        map.insert(key.to_string(), value);
    }

    /// Insert an optional string unless absent or empty.
    pub(crate) fn optional_string(map: &mut Map<String, Value>, key: &str, field: &Option<String>) {
        if let Some(text) = field
            && !text.is_empty()
        {
            map.insert(key.to_string(), Value::String(text.clone()));
        }
    }

    /// Insert an optional number unless absent or non-finite.
    pub(crate) fn optional_number(map: &mut Map<String, Value>, key: &str, field: Option<f64>) {
        if let Some(number) = field.and_then(Number::from_f64) {
            map.insert(key.to_string(), Value::Number(number));
        }
    }

    /// Insert an optional boolean unless absent.
    pub(crate) fn optional_boolean(map: &mut Map<String, Value>, key: &str, field: Option<bool>) {
        if let Some(flag) = field {
            map.insert(key.to_string(), Value::Bool(flag));
        }
    }

    /// Insert a sequence of entities unless empty.
    pub(crate) fn entities<T: Convertible>(map: &mut Map<String, Value>, key: &str, items: &[T]) {
        if !items.is_empty() {
            let rendered = items.iter().map(T::to_json).collect();
            map.insert(key.to_string(), Value::Array(rendered));
        }
    }
}

pub(crate) mod check {
    use crate::domain::{Convertible, Finding};
    use crate::time;

    /// Required string: absent reports Missing, empty reports Empty.
    pub(crate) fn required_string(
        findings: &mut Vec<Finding>,
        entity: &'static str,
        field: &'static str,
        value: &Option<String>,
    ) {
        match value {
            None => findings.push(Finding::missing(entity, field)),
            Some(s) if s.is_empty() => findings.push(Finding::empty(entity, field)),
            Some(_) => {}
        }
    }

    /// Required string that must be ASCII-alphabetic when present.
    pub(crate) fn required_alpha(
        findings: &mut Vec<Finding>,
        entity: &'static str,
        field: &'static str,
        value: &Option<String>,
    ) {
        match value {
            None => findings.push(Finding::missing(entity, field)),
            Some(s) if s.is_empty() => findings.push(Finding::empty(entity, field)),
            Some(s) if !time::is_alpha(s) => findings.push(Finding::invalid(entity, field)),
            Some(_) => {}
        }
    }

    /// Required number: absent (or non-finite, for directly built
    /// entities) reports Missing.
    pub(crate) fn required_number(
        findings: &mut Vec<Finding>,
        entity: &'static str,
        field: &'static str,
        value: Option<f64>,
    ) {
        if value.is_none_or(|number| !number.is_finite()) {
            findings.push(Finding::missing(entity, field));
        }
    }

    /// Required sequence: empty reports Missing, otherwise every element
    /// contributes its own findings qualified by index.
    pub(crate) fn required_entities<T: Convertible>(
        findings: &mut Vec<Finding>,
        entity: &'static str,
        field: &'static str,
        items: &[T],
    ) {
        if items.is_empty() {
            findings.push(Finding::missing(entity, field));
        } else {
            elements(findings, field, items);
        }
    }

    /// Index-qualified findings from every element of a sequence.
    pub(crate) fn elements<T: Convertible>(
        findings: &mut Vec<Finding>,
        field: &'static str,
        items: &[T],
    ) {
        for (index, item) in items.iter().enumerate() {
            for inner in item.errors() {
                findings.push(Finding::element(field, index, inner));
            }
        }
    }
}
