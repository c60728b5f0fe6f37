//! Error types for the booking domain.

use salon_database::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SalonError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("invalid email or password")]
    AuthenticationFailed,

    #[error("database error: {0}")]
    Database(DatabaseError),

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl SalonError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        SalonError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        SalonError::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        SalonError::Conflict {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        SalonError::Internal {
            message: message.into(),
        }
    }
}

impl From<DatabaseError> for SalonError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::Duplicate(message) => SalonError::Conflict { message },
            other => SalonError::Database(other),
        }
    }
}

pub type SalonResult<T> = Result<T, SalonError>;
