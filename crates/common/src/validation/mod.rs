// Validation Module - declarative, fixed-width field validation
//
// Each field carries a `FieldRules` set. `validate_fields` walks the schema in
// declaration order and reports the first violated rule only.
use std::fmt;

mod rules;
mod schema;

pub use rules::{pattern_compiles, Charset, FieldRules};
pub use schema::{validate_fields, FieldDescriptor, FieldSchema};

/// Type alias for validation results
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Which rule a value violated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Required,
    ExactLength,
    MaxLength,
    Charset,
    Allowed,
    Pattern,
    Unknown,
}

impl RuleKind {
    /// Stable snake_case label for logs and error payloads
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::ExactLength => "exact_length",
            Self::MaxLength => "max_length",
            Self::Charset => "charset",
            Self::Allowed => "allowed",
            Self::Pattern => "pattern",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First rule violation found for a request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Wire key of the offending field
    pub field: String,
    pub rule: RuleKind,
    /// Human-readable message surfaced to callers as-is
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, rule: RuleKind, message: impl Into<String>) -> Self {
        Self { field: field.into(), rule, message: message.into() }
    }
}
