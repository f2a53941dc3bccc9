//! Structured logging
//!
//! Installs the global `tracing` subscriber and provides the tracing-backed
//! [`HttpLogger`](finswitch_core::HttpLogger) and
//! [`AuditLog`](finswitch_core::AuditLog) adapters.

pub mod audit_log;
pub mod http_logger;

use std::str::FromStr;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub use audit_log::TracingAuditLog;
pub use http_logger::TracingHttpLogger;

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info";

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ObservabilityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ObservabilityError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ObservabilityError {
    #[error("unknown log format: {0}")]
    UnknownFormat(String),

    #[error("invalid log filter: {0}")]
    Filter(String),

    #[error("tracing subscriber already installed: {0}")]
    AlreadyInitialized(String),
}

/// Install the global subscriber: `RUST_LOG` (or `default_filter`) plus a
/// pretty or JSON fmt layer writing to stderr.
///
/// # Errors
/// Fails when the filter does not parse or a subscriber is already set.
pub fn init_tracing(format: LogFormat, default_filter: &str) -> Result<(), ObservabilityError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|e| ObservabilityError::Filter(e.to_string()))?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true)
                    .flatten_event(true),
            )
            .try_init(),
        LogFormat::Pretty => {
            registry.with(fmt::layer().with_writer(std::io::stderr).with_target(true)).try_init()
        }
    };
    result.map_err(|e| ObservabilityError::AlreadyInitialized(e.to_string()))?;

    tracing::debug!(?format, "tracing initialised");
    Ok(())
}
