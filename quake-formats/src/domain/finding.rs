//! Validation findings.
//!
//! Validation never throws: entities collect findings into a list so a
//! caller sees every problem in one pass. Findings are structured (kind,
//! entity, field) for programmatic handling; their `Display` rendering is
//! the message text downstream services log and return.

/// One validation finding for an entity field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Finding {
    /// A required field was never provided.
    #[error("No {field} in {entity} class.")]
    Missing {
        entity: &'static str,
        field: &'static str,
    },

    /// A required string field was provided but empty.
    #[error("Empty {field} in {entity} class.")]
    Empty {
        entity: &'static str,
        field: &'static str,
    },

    /// A field was provided but failed its format check.
    #[error("{field} did not validate in {entity} class.")]
    Invalid {
        entity: &'static str,
        field: &'static str,
    },

    /// A finding from one element of a sequence field, qualified by the
    /// element's position.
    #[error("{field}[{index}]: {inner}")]
    Element {
        field: &'static str,
        index: usize,
        inner: Box<Finding>,
    },
}

impl Finding {
    /// A required field was never provided.
    pub fn missing(entity: &'static str, field: &'static str) -> Self {
        Self::Missing { entity, field }
    }

    /// A required string field was provided but empty.
    pub fn empty(entity: &'static str, field: &'static str) -> Self {
        Self::Empty { entity, field }
    }

    /// A field failed its format check.
    pub fn invalid(entity: &'static str, field: &'static str) -> Self {
        Self::Invalid { entity, field }
    }

    /// Wrap a finding from one element of a sequence field.
    pub fn element(field: &'static str, index: usize, inner: Finding) -> Self {
        Self::Element {
            field,
            index,
            inner: Box::new(inner),
        }
    }
}
