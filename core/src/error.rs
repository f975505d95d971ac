use crate::types::BillId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BillError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Bill {id} not found")]
    NotFound { id: BillId },

    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
}

impl BillError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        BillError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// True when SQLite could not be reached or was locked, as opposed to a bad query.
    pub fn is_store_unavailable(&self) -> bool {
        use rusqlite::ErrorCode;
        match self {
            BillError::Database(rusqlite::Error::SqliteFailure(e, _)) => matches!(
                e.code,
                ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked | ErrorCode::CannotOpen
            ),
            _ => false,
        }
    }
}

pub type BillResult<T> = Result<T, BillError>;
