//! Failure taxonomy for one operation call
//!
//! None of these types cross the gateway's public boundary: the normalizer
//! turns every `OperationError` into a `ResultRecord`.

use std::fmt;

use finswitch_common::validation::ValidationError;
use thiserror::Error;

/// Credential fetch failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AuthError {
    pub message: String,
}

impl AuthError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// No HTTP response was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("{0}")]
    Request(String),
}

/// Everything that can stop an operation before a structured reply is mapped.
#[derive(Debug, Clone, Error)]
pub enum OperationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// Non-2xx reply; the body is kept for envelope extraction
    #[error("upstream returned HTTP {status} {reason}")]
    Upstream { status: u16, reason: String, body: String },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("configuration error: {0}")]
    Config(String),

    /// 2xx reply whose body was not JSON
    #[error("upstream reply was not valid JSON")]
    MalformedReply,

    /// 2xx reply that was JSON of no recognised shape
    #[error("upstream reply had no recognised shape")]
    UnknownReply,
}

impl OperationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::ValidationFailure,
            Self::Auth(_) => ErrorKind::AuthenticationFailure,
            Self::Upstream { .. } => ErrorKind::UpstreamError,
            Self::Transport(_) => ErrorKind::TransportFailure,
            Self::Config(_) => ErrorKind::ConfigurationError,
            Self::MalformedReply => ErrorKind::MalformedResponse,
            Self::UnknownReply => ErrorKind::UnknownResponse,
        }
    }
}

/// Taxonomy labels attached to logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ValidationFailure,
    AuthenticationFailure,
    BusinessFailure,
    UpstreamError,
    TransportFailure,
    MalformedResponse,
    UnknownResponse,
    ConfigurationError,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValidationFailure => "validation_failure",
            Self::AuthenticationFailure => "authentication_failure",
            Self::BusinessFailure => "business_failure",
            Self::UpstreamError => "upstream_error",
            Self::TransportFailure => "transport_failure",
            Self::MalformedResponse => "malformed_response",
            Self::UnknownResponse => "unknown_response",
            Self::ConfigurationError => "configuration_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
