//! Modular common utilities shared across FinSwitch crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: validation, privacy (pure, no side effects)
//! - `runtime`: time sources and wall-clock formatting

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod privacy;
#[cfg(feature = "foundation")]
pub mod validation;

// Runtime tier
// --------------------------------------------------------------------
#[cfg(feature = "runtime")]
pub mod time;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "foundation")]
pub use privacy::{Redactor, REDACTED};
#[cfg(feature = "runtime")]
pub use time::{Clock, MockClock, SystemClock};
#[cfg(feature = "foundation")]
pub use validation::{
    validate_fields, FieldDescriptor, FieldRules, FieldSchema, RuleKind, ValidationError,
    ValidationResult,
};
