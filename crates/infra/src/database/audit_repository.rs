//! SQLite-backed audit trail

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use finswitch_core::AuditLog;
use finswitch_domain::{AuditEntry, FinSwitchError, JsonMap, Result};
use rusqlite::params;
use tokio::task;

use super::manager::{map_join_error, map_sql_error, DbManager};
use crate::errors::InfraError;

pub struct SqliteAuditLog {
    db: Arc<DbManager>,
}

impl SqliteAuditLog {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Entries sharing a correlation id (the call's RRN), oldest first.
    pub async fn entries_for(&self, correlation_id: &str) -> Result<Vec<AuditEntry>> {
        let db = Arc::clone(&self.db);
        let correlation_id = correlation_id.to_string();

        task::spawn_blocking(move || -> Result<Vec<AuditEntry>> {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare(
                    "SELECT operation, module, payload, correlation_id, trace_no
                     FROM audit_entries
                     WHERE correlation_id = ?1
                     ORDER BY id",
                )
                .map_err(map_sql_error)?;

            let rows = stmt
                .query_map(params![correlation_id], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, Option<String>>(3)?,
                        row.get::<_, Option<String>>(4)?,
                    ))
                })
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;

            rows.into_iter()
                .map(|(operation, module, payload, correlation_id, trace_no)| {
                    let payload: JsonMap = serde_json::from_str(&payload).map_err(|e| {
                        FinSwitchError::Database(format!("invalid stored audit payload: {e}"))
                    })?;
                    Ok(AuditEntry { operation, module, payload, correlation_id, trace_no })
                })
                .collect()
        })
        .await
        .map_err(map_join_error)?
    }
}

#[async_trait]
impl AuditLog for SqliteAuditLog {
    async fn log(&self, entry: AuditEntry) -> Result<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> Result<()> {
            let payload = serde_json::to_string(&entry.payload)
                .map_err(|e| FinSwitchError::from(InfraError::from(e)))?;
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO audit_entries (operation, module, payload, correlation_id, trace_no, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    entry.operation,
                    entry.module,
                    payload,
                    entry.correlation_id,
                    entry.trace_no,
                    Utc::now().timestamp_millis(),
                ],
            )
            .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn audit_log() -> SqliteAuditLog {
        let db = DbManager::in_memory().expect("db manager created");
        db.run_migrations().expect("migrations run");
        SqliteAuditLog::new(Arc::new(db))
    }

    fn entry(operation: &str, rrn: &str) -> AuditEntry {
        let mut payload = JsonMap::new();
        payload.insert("responseCode".into(), json!("00"));
        AuditEntry {
            operation: operation.into(),
            module: "finswitch".into(),
            payload,
            correlation_id: Some(rrn.into()),
            trace_no: Some("000123".into()),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn logged_entries_are_found_by_correlation_id() {
        let audit = audit_log();

        audit.log(entry("linkAccount", "2023011233242312")).await.unwrap();
        audit.log(entry("unlinkAccount", "2023011233242312")).await.unwrap();
        audit.log(entry("linkAccount", "other")).await.unwrap();

        let entries = audit.entries_for("2023011233242312").await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], entry("linkAccount", "2023011233242312"));
        assert_eq!(entries[1].operation, "unlinkAccount");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn unknown_correlation_id_is_empty() {
        let audit = audit_log();
        assert!(audit.entries_for("missing").await.unwrap().is_empty());
    }
}
