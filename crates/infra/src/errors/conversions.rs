//! Conversions from external infrastructure errors into domain errors.

use dancefloor_domain::DanceFloorError;
use reqwest::Error as HttpError;
use tokio_postgres::error::SqlState;
use tokio_postgres::Error as PgError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub DanceFloorError);

impl From<InfraError> for DanceFloorError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<DanceFloorError> for InfraError {
    fn from(value: DanceFloorError) -> Self {
        Self(value)
    }
}

trait IntoDanceFloorError {
    fn into_dancefloor(self) -> DanceFloorError;
}

/* -------------------------------------------------------------------------- */
/* tokio_postgres::Error → DanceFloorError */
/* -------------------------------------------------------------------------- */

impl IntoDanceFloorError for PgError {
    fn into_dancefloor(self) -> DanceFloorError {
        let Some(db) = self.as_db_error() else {
            if self.is_closed() {
                return DanceFloorError::Database("database connection closed".into());
            }
            return DanceFloorError::Database(format!("database connection failure: {self}"));
        };

        let code = db.code();
        let message = db.message();
        if code == &SqlState::UNIQUE_VIOLATION {
            DanceFloorError::Database(format!("unique constraint violation: {message}"))
        } else if code == &SqlState::FOREIGN_KEY_VIOLATION {
            DanceFloorError::Database(format!("foreign key constraint violation: {message}"))
        } else if code == &SqlState::INVALID_PASSWORD
            || code == &SqlState::INVALID_AUTHORIZATION_SPECIFICATION
        {
            DanceFloorError::Auth(format!("database rejected credentials: {message}"))
        } else if code == &SqlState::UNDEFINED_FUNCTION {
            DanceFloorError::Database(format!(
                "{message} (is the pgcrypto extension installed?)"
            ))
        } else {
            DanceFloorError::Database(format!("{message} (SQLSTATE {})", code.code()))
        }
    }
}

impl From<PgError> for InfraError {
    fn from(value: PgError) -> Self {
        Self(value.into_dancefloor())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → DanceFloorError */
/* -------------------------------------------------------------------------- */

impl IntoDanceFloorError for HttpError {
    fn into_dancefloor(self) -> DanceFloorError {
        if self.is_timeout() {
            return DanceFloorError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return DanceFloorError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return DanceFloorError::Network(format!("HTTP response body unreadable: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => DanceFloorError::Auth(message),
                404 => DanceFloorError::NotFound(message),
                400..=499 => DanceFloorError::InvalidInput(message),
                _ => DanceFloorError::Network(message),
            };
        }

        DanceFloorError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        Self(value.into_dancefloor())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json / toml / io → DanceFloorError */
/* -------------------------------------------------------------------------- */

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        Self(DanceFloorError::InvalidInput(format!("Invalid JSON: {value}")))
    }
}

impl From<toml::de::Error> for InfraError {
    fn from(value: toml::de::Error) -> Self {
        Self(DanceFloorError::Config(format!("Invalid TOML format: {value}")))
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        match value.kind() {
            std::io::ErrorKind::NotFound => Self(DanceFloorError::NotFound(value.to_string())),
            _ => Self(DanceFloorError::Internal(format!("I/O error: {value}"))),
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
