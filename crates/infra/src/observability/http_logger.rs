//! `HttpLogger` that writes structured `tracing` events

use std::collections::BTreeMap;

use finswitch_core::{HttpLogger, OperationError};
use serde_json::Value;
use tracing::{error, info};

/// Emits one event per gateway log call under target `finswitch::http`.
///
/// Bodies and headers arrive already redacted.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingHttpLogger;

impl HttpLogger for TracingHttpLogger {
    fn log_info(&self, message: &str, context: &Value) {
        info!(target: "finswitch::http", context = %context, "{message}");
    }

    fn log_request(&self, url: &str, body: &Value, headers: &BTreeMap<String, String>) {
        let headers = serde_json::to_string(headers).unwrap_or_default();
        info!(target: "finswitch::http", url, body = %body, headers = %headers, "outbound request");
    }

    fn log_response(&self, status: u16, body: &Value) {
        info!(target: "finswitch::http", status, body = %body, "upstream response");
    }

    fn log_error(&self, context: &str, err: &OperationError) {
        error!(
            target: "finswitch::http",
            operation = context,
            error_kind = %err.kind(),
            error = %err,
            "operation failed"
        );
    }
}

#[cfg(test)]
pub(crate) mod capture {
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::fmt::MakeWriter;

    /// In-memory sink for a scoped JSON subscriber
    #[derive(Clone, Default)]
    pub struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        pub fn lines(&self) -> Vec<serde_json::Value> {
            let bytes = self.0.lock().unwrap().clone();
            String::from_utf8(bytes)
                .unwrap()
                .lines()
                .map(|line| serde_json::from_str(line).unwrap())
                .collect()
        }

        /// Run `f` with a JSON subscriber writing into this buffer.
        pub fn run<F: FnOnce()>(&self, f: F) {
            let subscriber = tracing_subscriber::fmt()
                .json()
                .flatten_event(true)
                .with_target(true)
                .with_writer(self.clone())
                .finish();
            tracing::subscriber::with_default(subscriber, f);
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use finswitch_core::TransportError;
    use serde_json::json;

    use super::capture::Captured;
    use super::*;

    #[test]
    fn request_and_response_events_carry_fields() {
        let captured = Captured::default();
        let headers = BTreeMap::from([("clientSecret".to_string(), "[REDACTED]".to_string())]);

        captured.run(|| {
            let logger = TracingHttpLogger;
            logger.log_request("https://switch.test/api", &json!({"a": 1}), &headers);
            logger.log_response(200, &json!({"ok": true}));
        });

        let lines = captured.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["target"], "finswitch::http");
        assert_eq!(lines[0]["url"], "https://switch.test/api");
        assert!(lines[0]["headers"].as_str().unwrap().contains("[REDACTED]"));
        assert_eq!(lines[1]["status"], 200);
    }

    #[test]
    fn errors_are_logged_with_their_kind() {
        let captured = Captured::default();

        captured.run(|| {
            let err = OperationError::Transport(TransportError::Timeout("30s".into()));
            TracingHttpLogger.log_error("accountInfo", &err);
        });

        let lines = captured.lines();
        assert_eq!(lines[0]["level"], "ERROR");
        assert_eq!(lines[0]["operation"], "accountInfo");
        assert_eq!(lines[0]["error_kind"], "transport_failure");
    }
}
