//! JSON document helpers.
//!
//! The single boundary between JSON text and the `serde_json::Value` tree
//! the entity conversions work on. Nothing else in the crate touches the
//! parser directly, so transport code gets one error type and one
//! rendering policy.

use serde_json::Value;

/// Error returned when JSON text cannot be parsed.
///
/// Line and column point at the failure (1-based; column 0 when the
/// underlying parser could not attribute one).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed JSON: {reason}")]
pub struct ParseError {
    /// Line of the failure.
    pub line: usize,
    /// Column of the failure.
    pub column: usize,
    reason: String,
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            line: err.line(),
            column: err.column(),
            reason: err.to_string(),
        }
    }
}

/// Render a JSON node as compact text.
///
/// Deterministic: object keys serialize in sorted order, so equal nodes
/// always render to equal text.
pub fn serialize(value: &Value) -> String {
    value.to_string()
}

/// Parse JSON text into a node.
///
/// # Examples
///
/// ```
/// use quake_formats::json;
///
/// let value = json::deserialize(r#"{"Station":"BOZ"}"#).unwrap();
/// assert_eq!(value["Station"], "BOZ");
///
/// let err = json::deserialize("{\n  \"Station\": }").unwrap_err();
/// assert_eq!(err.line, 2);
/// ```
pub fn deserialize(text: &str) -> Result<Value, ParseError> {
    serde_json::from_str(text).map_err(ParseError::from)
}
