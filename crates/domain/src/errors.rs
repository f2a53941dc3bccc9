//! Error types used throughout the adapter

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for FinSwitch infrastructure and wiring code.
///
/// Operation calls never surface this type to callers; they always return a
/// `ResultRecord`. It is used by repositories, configuration loading and the
/// other collaborators around the gateway.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum FinSwitchError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for FinSwitch operations
pub type Result<T> = std::result::Result<T, FinSwitchError>;
