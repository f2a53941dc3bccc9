//! Uniform outcome of a switch operation

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON object map used for payloads and raw upstream replies.
pub type JsonMap = Map<String, Value>;

/// Outcome of one operation call.
///
/// Every call produces exactly one `ResultRecord`; failures are values, not
/// errors. `success` is true only when the upstream response code equals the
/// operation's success sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub success: bool,
    /// Upstream response code (empty when no structured reply was received)
    #[serde(rename = "responseCode")]
    pub code: String,
    pub message: Option<String>,
    pub error_code: Option<String>,
    pub payload: JsonMap,
    pub raw_response: JsonMap,
}

impl ResultRecord {
    /// Successful outcome carrying the upstream payload.
    pub fn success(
        code: impl Into<String>,
        message: impl Into<String>,
        payload: JsonMap,
        raw_response: JsonMap,
    ) -> Self {
        Self {
            success: true,
            code: code.into(),
            message: Some(message.into()),
            error_code: None,
            payload,
            raw_response,
        }
    }

    /// Failed outcome with only a message; refine with the `with_*` helpers.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            code: String::new(),
            message: Some(message.into()),
            error_code: None,
            payload: JsonMap::new(),
            raw_response: JsonMap::new(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_error_code(mut self, error_code: impl Into<String>) -> Self {
        self.error_code = Some(error_code.into());
        self
    }

    pub fn with_payload(mut self, payload: JsonMap) -> Self {
        self.payload = payload;
        self
    }

    pub fn with_raw_response(mut self, raw_response: JsonMap) -> Self {
        self.raw_response = raw_response;
        self
    }

    /// Message or an empty string
    pub fn message_or_default(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}
