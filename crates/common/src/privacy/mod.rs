//! Privacy Module
//!
//! Masks sensitive values in JSON bodies and header maps before they reach a
//! log sink.

pub mod redaction;

pub use redaction::{Redactor, REDACTED};
