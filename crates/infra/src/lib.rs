//! # FinSwitch Infrastructure
//!
//! Infrastructure implementations of the gateway's ports.
//!
//! This crate contains:
//! - HTTP transport and token authenticator (reqwest)
//! - SQLite transaction repository and audit log (rusqlite + r2d2)
//! - Tracing-backed request logger and audit log
//! - Broadcast domain-event notifier
//! - Configuration loading and tracing subscriber setup
//!
//! ## Architecture
//! - Implements traits defined in `finswitch-core`
//! - Contains all "impure" code (network, disk, global subscriber)

pub mod config;
pub mod database;
pub mod errors;
pub mod events;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use database::{DbManager, SqliteAuditLog, SqliteTransactionRepository};
pub use errors::InfraError;
pub use events::BroadcastNotifier;
pub use http::{HttpAuthenticator, HttpClient, ReqwestTransport};
pub use observability::{init_tracing, LogFormat, TracingAuditLog, TracingHttpLogger};
