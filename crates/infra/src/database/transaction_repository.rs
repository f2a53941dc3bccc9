//! SQLite-backed history of completed switch calls.
//!
//! All database work runs in `spawn_blocking` so the async runtime is never
//! blocked on SQLite.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use finswitch_core::TransactionRepository;
use finswitch_domain::{FinSwitchError, JsonMap, NewTransaction, PersistedRecord, Result};
use rusqlite::{params, OptionalExtension, Row};
use tokio::task;
use uuid::Uuid;

use super::manager::{map_join_error, map_sql_error, DbManager, SqliteConnection};
use crate::errors::InfraError;

const SELECT_COLUMNS: &str = "SELECT id, operation, trace_no, rrn, cnic, mobile, response_code, \
                              success, attributes, created_at FROM switch_transactions";
const NEWEST_FIRST: &str = "ORDER BY created_at DESC, id DESC";

pub struct SqliteTransactionRepository {
    db: Arc<DbManager>,
}

impl SqliteTransactionRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    async fn with_connection<T, F>(&self, work: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&SqliteConnection) -> Result<T> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            work(&conn)
        })
        .await
        .map_err(map_join_error)?
    }
}

#[async_trait]
impl TransactionRepository for SqliteTransactionRepository {
    async fn create(&self, transaction: NewTransaction) -> Result<PersistedRecord> {
        self.with_connection(move |conn| {
            let record = PersistedRecord::from_new(transaction, now_millis());
            insert_record(conn, &record)?;
            Ok(record)
        })
        .await
    }

    async fn find_by_trace_no(&self, trace_no: &str) -> Result<Option<PersistedRecord>> {
        let trace_no = trace_no.to_string();
        self.with_connection(move |conn| {
            let sql = format!("{SELECT_COLUMNS} WHERE trace_no = ?1 {NEWEST_FIRST} LIMIT 1");
            query_one(conn, &sql, &trace_no)
        })
        .await
    }

    async fn find_by_cnic(&self, cnic: &str) -> Result<Vec<PersistedRecord>> {
        let cnic = cnic.to_string();
        self.with_connection(move |conn| {
            let sql = format!("{SELECT_COLUMNS} WHERE cnic = ?1 {NEWEST_FIRST}");
            let mut stmt = conn.prepare(&sql).map_err(map_sql_error)?;
            let rows = stmt
                .query_map(params![cnic], map_row)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;
            rows.into_iter().map(RawRecord::into_record).collect()
        })
        .await
    }

    async fn find_by_rrn(&self, rrn: &str) -> Result<Option<PersistedRecord>> {
        let rrn = rrn.to_string();
        self.with_connection(move |conn| {
            let sql = format!("{SELECT_COLUMNS} WHERE rrn = ?1 {NEWEST_FIRST} LIMIT 1");
            query_one(conn, &sql, &rrn)
        })
        .await
    }
}

// ============================================================================
// Synchronous SQL Operations (called inside spawn_blocking)
// ============================================================================

fn insert_record(conn: &SqliteConnection, record: &PersistedRecord) -> Result<()> {
    let attributes = serde_json::to_string(&record.attributes)
        .map_err(|e| FinSwitchError::from(InfraError::from(e)))?;

    conn.execute(
        "INSERT INTO switch_transactions
            (id, operation, trace_no, rrn, cnic, mobile, response_code, success, attributes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            record.id.to_string(),
            record.operation,
            record.trace_no,
            record.rrn,
            record.cnic,
            record.mobile,
            record.response_code,
            record.success,
            attributes,
            record.created_at.timestamp_millis(),
        ],
    )
    .map_err(map_sql_error)?;
    Ok(())
}

fn query_one(conn: &SqliteConnection, sql: &str, key: &str) -> Result<Option<PersistedRecord>> {
    conn.query_row(sql, params![key], map_row)
        .optional()
        .map_err(map_sql_error)?
        .map(RawRecord::into_record)
        .transpose()
}

/// Row as stored, before id/JSON/timestamp decoding
struct RawRecord {
    id: String,
    operation: String,
    trace_no: Option<String>,
    rrn: Option<String>,
    cnic: Option<String>,
    mobile: Option<String>,
    response_code: String,
    success: bool,
    attributes: String,
    created_at: i64,
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<RawRecord> {
    Ok(RawRecord {
        id: row.get(0)?,
        operation: row.get(1)?,
        trace_no: row.get(2)?,
        rrn: row.get(3)?,
        cnic: row.get(4)?,
        mobile: row.get(5)?,
        response_code: row.get(6)?,
        success: row.get(7)?,
        attributes: row.get(8)?,
        created_at: row.get(9)?,
    })
}

impl RawRecord {
    fn into_record(self) -> Result<PersistedRecord> {
        let id = Uuid::parse_str(&self.id).map_err(|e| {
            FinSwitchError::Database(format!("invalid transaction id '{}': {e}", self.id))
        })?;
        let attributes: JsonMap = serde_json::from_str(&self.attributes)
            .map_err(|e| FinSwitchError::Database(format!("invalid stored attributes: {e}")))?;
        let created_at = DateTime::<Utc>::from_timestamp_millis(self.created_at).ok_or_else(|| {
            FinSwitchError::Database(format!("invalid stored timestamp: {}", self.created_at))
        })?;

        Ok(PersistedRecord {
            id,
            operation: self.operation,
            trace_no: self.trace_no,
            rrn: self.rrn,
            cnic: self.cnic,
            mobile: self.mobile,
            response_code: self.response_code,
            success: self.success,
            attributes,
            created_at,
        })
    }
}

/// Current time truncated to the stored millisecond precision
fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::<Utc>::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}
