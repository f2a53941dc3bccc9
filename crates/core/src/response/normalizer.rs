//! `OperationError` → failed `ResultRecord`

use finswitch_domain::constants::{
    AUTH_ERROR_CODE, CONFIG_ERROR_CODE, INVALID_RESPONSE_CODE, INVALID_RESPONSE_MESSAGE,
    TRANSPORT_ERROR_CODE, UNKNOWN_ERROR_MESSAGE, UNKNOWN_RESPONSE_CODE, UPSTREAM_ERROR_CODE,
    VALIDATION_ERROR_CODE,
};
use finswitch_domain::{JsonMap, ResultRecord};
use serde_json::Value;

use super::mapper::parse_error_envelope;
use crate::errors::OperationError;
use crate::operations::OperationSpec;

/// Convert any failure into the uniform failed result.
///
/// Upstream error envelopes pass through verbatim; every other case gets a
/// message built from the operation's display name or action phrase.
pub fn normalize(error: &OperationError, spec: &OperationSpec) -> ResultRecord {
    match error {
        OperationError::Validation(err) => {
            ResultRecord::failure(err.message.clone()).with_error_code(VALIDATION_ERROR_CODE)
        }
        OperationError::Auth(err) => {
            ResultRecord::failure(format!("{} failed: {err}", spec.display_name))
                .with_error_code(AUTH_ERROR_CODE)
        }
        OperationError::Upstream { status, reason, body } => match parse_error_envelope(body) {
            Some(envelope) => envelope.into_record(),
            None => {
                let status_line = format!("HTTP {status} {reason}");
                ResultRecord::failure(format!("{} failed: {}", spec.display_name, status_line.trim_end()))
                    .with_code(status.to_string())
                    .with_error_code(UPSTREAM_ERROR_CODE)
                    .with_raw_response(json_object(body))
            }
        },
        OperationError::Transport(err) => {
            ResultRecord::failure(format!("Failed to {}: {err}", spec.action))
                .with_error_code(TRANSPORT_ERROR_CODE)
        }
        OperationError::Config(message) => {
            ResultRecord::failure(format!("{} failed: {message}", spec.display_name))
                .with_error_code(CONFIG_ERROR_CODE)
        }
        OperationError::MalformedReply => {
            ResultRecord::failure(INVALID_RESPONSE_MESSAGE).with_error_code(INVALID_RESPONSE_CODE)
        }
        OperationError::UnknownReply => {
            ResultRecord::failure(UNKNOWN_ERROR_MESSAGE).with_error_code(UNKNOWN_RESPONSE_CODE)
        }
    }
}

fn json_object(body: &str) -> JsonMap {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => map,
        _ => JsonMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use finswitch_common::validation::{RuleKind, ValidationError};

    use super::*;
    use crate::errors::{AuthError, TransportError};
    use crate::operations::OperationKind;

    fn spec() -> &'static OperationSpec {
        OperationKind::LinkAccount.spec()
    }

    #[test]
    fn validation_message_passes_through() {
        let err = ValidationError::new("Rrn", RuleKind::ExactLength, "Rrn must be 14 or 16 characters");
        let record = normalize(&err.into(), spec());
        assert!(!record.success);
        assert_eq!(record.message.as_deref(), Some("Rrn must be 14 or 16 characters"));
        assert_eq!(record.error_code.as_deref(), Some("VALIDATION_ERROR"));
    }

    #[test]
    fn auth_failure_names_the_operation() {
        let record = normalize(&AuthError::new("invalid client").into(), spec());
        assert_eq!(record.message.as_deref(), Some("Account linking failed: invalid client"));
        assert_eq!(record.error_code.as_deref(), Some("AUTH_ERROR"));
    }

    #[test]
    fn upstream_envelope_is_verbatim() {
        let err = OperationError::Upstream {
            status: 400,
            reason: "Bad Request".into(),
            body: r#"{"messages":"CNIC blocked","errorcode":"E201"}"#.into(),
        };
        let record = normalize(&err, spec());
        assert!(!record.success);
        assert_eq!(record.message.as_deref(), Some("CNIC blocked"));
        assert_eq!(record.error_code.as_deref(), Some("E201"));
    }

    #[test]
    fn upstream_without_envelope() {
        let err = OperationError::Upstream {
            status: 502,
            reason: "Bad Gateway".into(),
            body: "<html></html>".into(),
        };
        let record = normalize(&err, spec());
        assert_eq!(record.message.as_deref(), Some("Account linking failed: HTTP 502 Bad Gateway"));
        assert_eq!(record.code, "502");
        assert_eq!(record.error_code.as_deref(), Some("UPSTREAM_ERROR"));

        let no_reason = OperationError::Upstream { status: 599, reason: String::new(), body: String::new() };
        assert_eq!(
            normalize(&no_reason, spec()).message.as_deref(),
            Some("Account linking failed: HTTP 599")
        );
    }

    #[test]
    fn transport_failure_uses_action_phrase() {
        let err = TransportError::Timeout("operation timed out after 60s".into());
        let record = normalize(&err.into(), spec());
        let message = record.message.unwrap();
        assert!(message.starts_with("Failed to link account"));
        assert!(message.contains("timed out"));
        assert_eq!(record.error_code.as_deref(), Some("TRANSPORT_ERROR"));
    }

    #[test]
    fn config_failure() {
        let err = OperationError::Config("no endpoint configured for linkAccount".into());
        let record = normalize(&err, spec());
        assert_eq!(
            record.message.as_deref(),
            Some("Account linking failed: no endpoint configured for linkAccount")
        );
        assert_eq!(record.error_code.as_deref(), Some("CONFIG_ERROR"));
    }

    #[test]
    fn unreadable_replies_match_the_mapper() {
        use crate::response::map_response;

        let shape = &spec().response;
        let malformed = map_response("garbage", shape, "00").into_record();
        assert_eq!(normalize(&OperationError::MalformedReply, spec()), malformed);

        let unknown = map_response("[1,2]", shape, "00").into_record();
        assert_eq!(normalize(&OperationError::UnknownReply, spec()), unknown);
    }
}
