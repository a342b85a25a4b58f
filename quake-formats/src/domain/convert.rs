//! Conversion contract shared by every wire entity.

use serde_json::Value;

use crate::domain::Finding;
use crate::json::{self, ParseError};

/// The capability every wire entity implements: tolerant construction from
/// JSON, emission back to JSON, and deferred validation.
///
/// Construction never fails. A missing key, a value of the wrong JSON
/// type, or an unparseable timestamp reads as an absent field, and
/// `errors` reports every required field that ended up absent. Callers
/// must therefore treat construction and validation as two steps: build
/// the entity, then check `errors` before trusting it.
pub trait Convertible: Sized {
    /// Entity name as it appears in validation messages.
    const NAME: &'static str;

    /// Build the entity from a JSON node, degrading missing or mismatched
    /// fields to absent.
    fn from_json(value: &Value) -> Self;

    /// Emit the entity as a JSON object node.
    ///
    /// Required fields are always present in the output, holding the wire
    /// sentinel (`""` for strings, `null` for numbers and timestamps) when
    /// absent. Optional fields are omitted entirely when absent.
    fn to_json(&self) -> Value;

    /// Validation findings: required fields first, in declaration order,
    /// at most one finding per scalar field, sequence findings qualified
    /// by element index. Empty when the entity is valid.
    fn errors(&self) -> Vec<Finding>;

    /// True when `errors` finds nothing.
    fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// Rendered validation messages, in the same order as `errors`.
    fn error_messages(&self) -> Vec<String> {
        self.errors().iter().map(|f| f.to_string()).collect()
    }

    /// Parse JSON text and build the entity from it.
    ///
    /// Only malformed JSON fails; field-level problems degrade to absent
    /// fields exactly as in `from_json`.
    fn from_json_text(text: &str) -> Result<Self, ParseError> {
        Ok(Self::from_json(&json::deserialize(text)?))
    }

    /// Serialize the entity to compact JSON text.
    fn to_json_text(&self) -> String {
        json::serialize(&self.to_json())
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{Convertible, Site};

    #[test]
    fn from_json_text_rejects_malformed_input() {
        let err = Site::from_json_text("{not json").unwrap_err();
        assert!(err.to_string().starts_with("malformed JSON:"));
    }

    #[test]
    fn from_json_text_builds_entity() {
        let site = Site::from_json_text(r#"{"Station":"BOZ","Network":"US"}"#).unwrap();
        assert!(site.is_valid());
        assert_eq!(site.station.as_deref(), Some("BOZ"));
    }

    #[test]
    fn error_messages_render_findings() {
        let site = Site::from_json_text("{}").unwrap();
        assert!(!site.is_valid());
        assert_eq!(
            site.error_messages(),
            vec!["No Station in Site class.", "No Network in Site class."]
        );
    }

    #[test]
    fn to_json_text_is_deterministic() {
        let site = Site::new("BOZ", "US");
        assert_eq!(site.to_json_text(), site.to_json_text());
        assert_eq!(site.to_json_text(), r#"{"Network":"US","Station":"BOZ"}"#);
    }
}
