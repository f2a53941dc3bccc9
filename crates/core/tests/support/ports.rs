use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use finswitch_core::{
    AuditLog, AuthError, Authenticator, EventNotifier, HttpLogger, HttpResponse, OperationError,
    OutboundRequest, TransactionRepository, Transport, TransportError,
};
use finswitch_domain::{
    AuditEntry, DomainEvent, FinSwitchError, NewTransaction, PersistedRecord, Result as DomainResult,
};
use serde_json::Value;

/// Authenticator returning a fixed token or error, counting calls.
pub struct MockAuthenticator {
    result: Result<String, AuthError>,
    calls: AtomicUsize,
}

impl MockAuthenticator {
    pub fn ok(token: &str) -> Self {
        Self { result: Ok(token.to_string()), calls: AtomicUsize::new(0) }
    }

    pub fn failing(message: &str) -> Self {
        Self { result: Err(AuthError::new(message)), calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    async fn authenticate(&self) -> Result<String, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

/// Transport replaying scripted replies in order and recording requests.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<OutboundRequest>>,
}

impl MockTransport {
    pub fn push(&self, reply: Result<HttpResponse, TransportError>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post(&self, request: OutboundRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Request("no scripted reply".into())))
    }
}

/// Vec-backed repository; `fail_writes` simulates a storage outage.
#[derive(Default)]
pub struct InMemoryRepository {
    rows: Mutex<Vec<PersistedRecord>>,
    pub fail_writes: std::sync::atomic::AtomicBool,
}

impl InMemoryRepository {
    pub fn rows(&self) -> Vec<PersistedRecord> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransactionRepository for InMemoryRepository {
    async fn create(&self, transaction: NewTransaction) -> DomainResult<PersistedRecord> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(FinSwitchError::Database("disk full".into()));
        }
        let record = PersistedRecord::from_new(transaction, Utc::now());
        self.rows.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn find_by_trace_no(&self, trace_no: &str) -> DomainResult<Option<PersistedRecord>> {
        Ok(self.rows().into_iter().rev().find(|r| r.trace_no.as_deref() == Some(trace_no)))
    }

    async fn find_by_cnic(&self, cnic: &str) -> DomainResult<Vec<PersistedRecord>> {
        Ok(self.rows().into_iter().rev().filter(|r| r.cnic.as_deref() == Some(cnic)).collect())
    }

    async fn find_by_rrn(&self, rrn: &str) -> DomainResult<Option<PersistedRecord>> {
        Ok(self.rows().into_iter().rev().find(|r| r.rrn.as_deref() == Some(rrn)))
    }
}

/// One captured logger call
#[derive(Debug, Clone, PartialEq)]
pub enum LogLine {
    Info { message: String, context: Value },
    Request { url: String, body: Value, headers: BTreeMap<String, String> },
    Response { status: u16, body: Value },
    Error { context: String, message: String },
}

#[derive(Default)]
pub struct RecordingLogger {
    lines: Mutex<Vec<LogLine>>,
}

impl RecordingLogger {
    pub fn lines(&self) -> Vec<LogLine> {
        self.lines.lock().unwrap().clone()
    }
}

impl HttpLogger for RecordingLogger {
    fn log_info(&self, message: &str, context: &Value) {
        self.lines
            .lock()
            .unwrap()
            .push(LogLine::Info { message: message.to_string(), context: context.clone() });
    }

    fn log_request(&self, url: &str, body: &Value, headers: &BTreeMap<String, String>) {
        self.lines.lock().unwrap().push(LogLine::Request {
            url: url.to_string(),
            body: body.clone(),
            headers: headers.clone(),
        });
    }

    fn log_response(&self, status: u16, body: &Value) {
        self.lines.lock().unwrap().push(LogLine::Response { status, body: body.clone() });
    }

    fn log_error(&self, context: &str, error: &OperationError) {
        self.lines
            .lock()
            .unwrap()
            .push(LogLine::Error { context: context.to_string(), message: error.to_string() });
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<DomainEvent>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventNotifier for RecordingNotifier {
    async fn dispatch(&self, event: DomainEvent) -> DomainResult<()> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingAudit {
    entries: Mutex<Vec<AuditEntry>>,
}

impl RecordingAudit {
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditLog for RecordingAudit {
    async fn log(&self, entry: AuditEntry) -> DomainResult<()> {
        self.entries.lock().unwrap().push(entry);
        Ok(())
    }
}
