//! Conversions from external infrastructure errors into domain and transport
//! errors.

use finswitch_core::TransportError;
use finswitch_domain::FinSwitchError;
use reqwest::Error as HttpError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub FinSwitchError);

impl From<InfraError> for FinSwitchError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<FinSwitchError> for InfraError {
    fn from(value: FinSwitchError) -> Self {
        Self(value)
    }
}

trait IntoFinSwitchError {
    fn into_finswitch(self) -> FinSwitchError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → FinSwitchError */
/* -------------------------------------------------------------------------- */

impl IntoFinSwitchError for SqlError {
    fn into_finswitch(self) -> FinSwitchError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        FinSwitchError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        FinSwitchError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067) => {
                        FinSwitchError::Database("unique constraint violation".into())
                    }
                    (ErrorCode::CannotOpen, _) => {
                        FinSwitchError::Database(format!("unable to open database: {message}"))
                    }
                    _ => FinSwitchError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => FinSwitchError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                FinSwitchError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, name, ty) => {
                FinSwitchError::Database(format!("invalid column type for {name}: {ty}"))
            }
            RE::InvalidPath(path) => FinSwitchError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            other => FinSwitchError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        Self(value.into_finswitch())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → FinSwitchError */
/* -------------------------------------------------------------------------- */

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        Self(FinSwitchError::Database(format!("connection pool error: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → FinSwitchError */
/* -------------------------------------------------------------------------- */

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        Self(FinSwitchError::Internal(format!("failed to encode stored JSON: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → FinSwitchError */
/* -------------------------------------------------------------------------- */

impl IntoFinSwitchError for HttpError {
    fn into_finswitch(self) -> FinSwitchError {
        if self.is_timeout() {
            return FinSwitchError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return FinSwitchError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return FinSwitchError::Config(format!("invalid HTTP client setup: {self}"));
        }

        FinSwitchError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        Self(value.into_finswitch())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → TransportError */
/* -------------------------------------------------------------------------- */

/// Classify a reqwest failure for the gateway's transport port.
pub fn transport_error(err: &HttpError) -> TransportError {
    if err.is_timeout() {
        return TransportError::Timeout(err.to_string());
    }
    if err.is_connect() {
        return TransportError::Connect(err.to_string());
    }
    TransportError::Request(err.to_string())
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
