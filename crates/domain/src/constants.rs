//! Adapter constants
//!
//! Centralized location for the domain-level defaults shared by the gateway,
//! the configuration loader and the infrastructure adapters.

// Upstream conventions
pub const DEFAULT_SUCCESS_CODE: &str = "00";
pub const DEFAULT_ORGANIZATION_ID: &str = "223";

// Token cache
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;
/// Upper bound accepted by config validation (one week)
pub const MAX_TOKEN_TTL_SECS: u64 = 7 * 24 * 3600;
pub const DEFAULT_AUTH_ENDPOINT: &str = "/oauth/token";

// Transport
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RETRY_ATTEMPTS: usize = 1;

// Audit
pub const DEFAULT_AUDIT_MODULE: &str = "finswitch";

// Result messages that callers match on
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response from API";
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

// Stable error codes for failures that never reached the upstream
pub const VALIDATION_ERROR_CODE: &str = "VALIDATION_ERROR";
pub const AUTH_ERROR_CODE: &str = "AUTH_ERROR";
pub const TRANSPORT_ERROR_CODE: &str = "TRANSPORT_ERROR";
pub const CONFIG_ERROR_CODE: &str = "CONFIG_ERROR";
pub const INVALID_RESPONSE_CODE: &str = "INVALID_RESPONSE";
pub const UNKNOWN_RESPONSE_CODE: &str = "UNKNOWN_RESPONSE";
pub const UPSTREAM_ERROR_CODE: &str = "UPSTREAM_ERROR";

/// Keys redacted from request/response logs unless configured otherwise.
pub const DEFAULT_SENSITIVE_FIELDS: &[&str] = &[
    "password",
    "pin",
    "mpin",
    "cvv",
    "cardNumber",
    "accountNumber",
    "iban",
    "cnic",
    "guardianCnic",
    "minorBForm",
    "nationalId",
    "mobile",
    "mobileNumber",
    "mobileNo",
    "oldMobileNumber",
    "newMobileNumber",
    "otp",
    "clientSecret",
];
