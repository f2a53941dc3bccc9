use async_trait::async_trait;
use finswitch_core::AuditLog;
use finswitch_domain::{AuditEntry, Result};
use serde_json::Value;
use tracing::info;

/// Writes audit entries as `tracing` events under target `finswitch::audit`.
///
/// Used when no database is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditLog;

#[async_trait]
impl AuditLog for TracingAuditLog {
    async fn log(&self, entry: AuditEntry) -> Result<()> {
        let payload = Value::Object(entry.payload);
        info!(
            target: "finswitch::audit",
            operation = %entry.operation,
            module = %entry.module,
            correlation_id = entry.correlation_id.as_deref(),
            trace_no = entry.trace_no.as_deref(),
            payload = %payload,
            "audit entry"
        );
        Ok(())
    }
}
