//! Port interfaces for the switch gateway
//!
//! These traits define the boundaries between the orchestration logic and
//! infrastructure implementations.

use std::collections::BTreeMap;

use async_trait::async_trait;
use finswitch_domain::{AuditEntry, DomainEvent, NewTransaction, PersistedRecord, Result};
use serde_json::Value;

use crate::errors::{AuthError, OperationError, TransportError};
use crate::request::OutboundRequest;

/// Raw HTTP reply, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Canonical reason phrase ("Bad Gateway"); may be empty
    pub reason: String,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, reason: impl Into<String>, body: impl Into<String>) -> Self {
        Self { status, reason: reason.into(), body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs the outbound POST
#[async_trait]
pub trait Transport: Send + Sync {
    /// Returns every HTTP response; errors only when no response arrived.
    async fn post(&self, request: OutboundRequest) -> std::result::Result<HttpResponse, TransportError>;
}

/// Exchanges client credentials for a bearer token
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self) -> std::result::Result<String, AuthError>;
}

/// History of completed switch calls
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    async fn create(&self, transaction: NewTransaction) -> Result<PersistedRecord>;

    /// Most recent record with this trace number
    async fn find_by_trace_no(&self, trace_no: &str) -> Result<Option<PersistedRecord>>;

    /// All records for a national id, newest first
    async fn find_by_cnic(&self, cnic: &str) -> Result<Vec<PersistedRecord>>;

    async fn find_by_rrn(&self, rrn: &str) -> Result<Option<PersistedRecord>>;
}

/// Request/response log sink. Everything passed in is already redacted.
pub trait HttpLogger: Send + Sync {
    fn log_info(&self, message: &str, context: &Value);

    fn log_request(&self, url: &str, body: &Value, headers: &BTreeMap<String, String>);

    fn log_response(&self, status: u16, body: &Value);

    fn log_error(&self, context: &str, error: &OperationError);
}

/// Delivers domain events after business success
#[async_trait]
pub trait EventNotifier: Send + Sync {
    async fn dispatch(&self, event: DomainEvent) -> Result<()>;
}

#[async_trait]
pub trait AuditLog: Send + Sync {
    async fn log(&self, entry: AuditEntry) -> Result<()>;
}
