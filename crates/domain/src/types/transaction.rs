//! Persisted history of switch calls, audit entries and domain events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::result::{JsonMap, ResultRecord};

/// Attributes handed to the transaction repository after a completed call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub operation: String,
    pub trace_no: Option<String>,
    pub rrn: Option<String>,
    pub cnic: Option<String>,
    pub mobile: Option<String>,
    pub response_code: String,
    pub success: bool,
    /// Redacted request fields and the upstream payload
    pub attributes: JsonMap,
}

/// Row returned by the transaction repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedRecord {
    pub id: Uuid,
    pub operation: String,
    pub trace_no: Option<String>,
    pub rrn: Option<String>,
    pub cnic: Option<String>,
    pub mobile: Option<String>,
    pub response_code: String,
    pub success: bool,
    pub attributes: JsonMap,
    pub created_at: DateTime<Utc>,
}

impl PersistedRecord {
    /// Materialize a new transaction with a fresh id and timestamp.
    pub fn from_new(new: NewTransaction, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            operation: new.operation,
            trace_no: new.trace_no,
            rrn: new.rrn,
            cnic: new.cnic,
            mobile: new.mobile,
            response_code: new.response_code,
            success: new.success,
            attributes: new.attributes,
            created_at,
        }
    }
}

/// One audit record per completed upstream attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub operation: String,
    pub module: String,
    pub payload: JsonMap,
    pub correlation_id: Option<String>,
    pub trace_no: Option<String>,
}

/// Emitted after a business-successful operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainEvent {
    pub operation: String,
    pub record: PersistedRecord,
    pub result: ResultRecord,
    pub occurred_at: DateTime<Utc>,
}
