//! Raw reply body → `ResultRecord`
//!
//! Two tiers: the operation's own response shape first, then the upstream's
//! generic `{messages, errorcode}` envelope. Anything else is unknown.

use finswitch_domain::constants::{
    INVALID_RESPONSE_CODE, INVALID_RESPONSE_MESSAGE, UNKNOWN_ERROR_MESSAGE, UNKNOWN_RESPONSE_CODE,
};
use finswitch_domain::{JsonMap, ResultRecord};
use serde_json::Value;

use crate::errors::{ErrorKind, OperationError};
use crate::operations::ResponseShape;

const ENVELOPE_MESSAGE: &str = "messages";
const ENVELOPE_CODE: &str = "errorcode";

/// Outcome of mapping one body
#[derive(Debug, Clone, PartialEq)]
pub enum Mapped {
    /// The operation's response key was present
    Operation(ResultRecord),
    /// Generic error envelope
    Envelope(ResultRecord),
    /// Body was not JSON
    Malformed(ResultRecord),
    /// JSON of no recognised shape
    Unknown(ResultRecord),
}

impl Mapped {
    pub fn record(&self) -> &ResultRecord {
        match self {
            Self::Operation(r) | Self::Envelope(r) | Self::Malformed(r) | Self::Unknown(r) => r,
        }
    }

    pub fn into_record(self) -> ResultRecord {
        match self {
            Self::Operation(r) | Self::Envelope(r) | Self::Malformed(r) | Self::Unknown(r) => r,
        }
    }

    /// Whether the upstream produced a reply the finalizing stage should record
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Operation(_) | Self::Envelope(_))
    }

    /// Error for a 2xx body that could not be mapped at all
    pub fn error(&self) -> Option<OperationError> {
        match self {
            Self::Malformed(_) => Some(OperationError::MalformedReply),
            Self::Unknown(_) => Some(OperationError::UnknownReply),
            Self::Operation(_) | Self::Envelope(_) => None,
        }
    }

    /// Taxonomy label for failed outcomes
    pub fn failure_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Operation(r) if r.success => None,
            Self::Operation(_) | Self::Envelope(_) => Some(ErrorKind::BusinessFailure),
            Self::Malformed(_) => Some(ErrorKind::MalformedResponse),
            Self::Unknown(_) => Some(ErrorKind::UnknownResponse),
        }
    }
}

/// Error envelope extracted from a reply body
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorEnvelope {
    pub message: String,
    pub error_code: String,
    pub raw: JsonMap,
}

impl ErrorEnvelope {
    pub fn into_record(self) -> ResultRecord {
        ResultRecord::failure(self.message)
            .with_error_code(self.error_code)
            .with_raw_response(self.raw)
    }
}

/// Map a 2xx body for an operation. Pure: the same input maps identically.
pub fn map_response(body: &str, shape: &ResponseShape, success_code: &str) -> Mapped {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return Mapped::Malformed(
            ResultRecord::failure(INVALID_RESPONSE_MESSAGE).with_error_code(INVALID_RESPONSE_CODE),
        );
    };

    let Value::Object(raw) = value else {
        return Mapped::Unknown(
            ResultRecord::failure(UNKNOWN_ERROR_MESSAGE).with_error_code(UNKNOWN_RESPONSE_CODE),
        );
    };

    if let Some(reply) = raw.get(shape.key) {
        return Mapped::Operation(map_operation(reply, &raw, shape, success_code));
    }

    if let Some(envelope) = envelope_from(&raw) {
        return Mapped::Envelope(envelope.into_record());
    }

    Mapped::Unknown(
        ResultRecord::failure(UNKNOWN_ERROR_MESSAGE)
            .with_error_code(UNKNOWN_RESPONSE_CODE)
            .with_raw_response(raw),
    )
}

/// `{messages, errorcode}` envelope from any body, if present.
pub fn parse_error_envelope(body: &str) -> Option<ErrorEnvelope> {
    match serde_json::from_str::<Value>(body).ok()? {
        Value::Object(raw) => envelope_from(&raw),
        _ => None,
    }
}

fn envelope_from(raw: &JsonMap) -> Option<ErrorEnvelope> {
    let message = first_text(raw.get(ENVELOPE_MESSAGE)?)?;
    let error_code = scalar_text(raw.get(ENVELOPE_CODE)?)?;
    Some(ErrorEnvelope { message, error_code, raw: raw.clone() })
}

fn map_operation(reply: &Value, raw: &JsonMap, shape: &ResponseShape, success_code: &str) -> ResultRecord {
    let payload = match reply {
        Value::Object(map) => map.clone(),
        _ => JsonMap::new(),
    };

    let code = payload.get(shape.code_field).and_then(scalar_text).unwrap_or_default();
    let success = code == success_code;
    let details = payload.get(shape.details_field).and_then(first_text);

    if success {
        let message = details.unwrap_or_else(|| shape.success_message.to_string());
        ResultRecord::success(code, message, payload, raw.clone())
    } else {
        ResultRecord::failure(details.unwrap_or_else(|| shape.failure_message.to_string()))
            .with_code(code)
            .with_payload(payload)
            .with_raw_response(raw.clone())
    }
}

/// A string, a number, or the first element of a list of either.
fn first_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Array(items) => items.first().and_then(scalar_text),
        other => scalar_text(other),
    };
    text.filter(|text| !text.trim().is_empty())
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
