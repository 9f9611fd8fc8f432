//! Conversions from external infrastructure errors into domain errors.

use altolink_domain::AltoLinkError;
use reqwest::Error as HttpError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub AltoLinkError);

impl From<InfraError> for AltoLinkError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<AltoLinkError> for InfraError {
    fn from(value: AltoLinkError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoAltoLinkError {
    fn into_altolink(self) -> AltoLinkError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → AltoLinkError */
/* -------------------------------------------------------------------------- */

impl IntoAltoLinkError for SqlError {
    fn into_altolink(self) -> AltoLinkError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        AltoLinkError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        AltoLinkError::Database("database is locked".into())
                    }
                    // SQLITE_CONSTRAINT_PRIMARYKEY / SQLITE_CONSTRAINT_UNIQUE
                    (ErrorCode::ConstraintViolation, 1555 | 2067) => {
                        AltoLinkError::InvalidInput("record already exists".into())
                    }
                    (ErrorCode::ConstraintViolation, 787) => {
                        AltoLinkError::Database("foreign key constraint violation".into())
                    }
                    // SQLITE_CONSTRAINT_CHECK
                    (ErrorCode::ConstraintViolation, 275) => AltoLinkError::InvalidInput(format!(
                        "check constraint violation: {message}"
                    )),
                    _ => AltoLinkError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => AltoLinkError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                AltoLinkError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                AltoLinkError::Database(format!("invalid column type: {ty}"))
            }
            RE::Utf8Error(_) => {
                AltoLinkError::Database("invalid UTF-8 returned from sqlite".into())
            }
            RE::InvalidParameterName(parameter_name) => {
                AltoLinkError::Database(format!("invalid parameter name: {parameter_name}"))
            }
            RE::InvalidPath(path) => AltoLinkError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            RE::InvalidQuery => AltoLinkError::Database("invalid SQL query".into()),
            other => AltoLinkError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_altolink())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → AltoLinkError */
/* -------------------------------------------------------------------------- */

impl IntoAltoLinkError for r2d2::Error {
    fn into_altolink(self) -> AltoLinkError {
        AltoLinkError::Database(format!("connection pool error: {self}"))
    }
}

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(value.into_altolink())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → AltoLinkError */
/* -------------------------------------------------------------------------- */

impl IntoAltoLinkError for HttpError {
    fn into_altolink(self) -> AltoLinkError {
        if self.is_timeout() {
            return AltoLinkError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return AltoLinkError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 => AltoLinkError::Auth(message),
                404 => AltoLinkError::NotFound(message),
                400..=499 => AltoLinkError::InvalidInput(message),
                _ => AltoLinkError::Network(message),
            };
        }

        if self.is_decode() {
            return AltoLinkError::Network(format!("invalid response body: {self}"));
        }

        AltoLinkError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_altolink())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
