//! # FinSwitch Domain
//!
//! Business domain types and models for the FinSwitch adapter.
//!
//! This crate contains:
//! - Outcome, audit and event types (`ResultRecord`, `AuditEntry`, ...)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other FinSwitch crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
