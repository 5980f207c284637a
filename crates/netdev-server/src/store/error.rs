//! Store error types

use thiserror::Error;
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failures surfaced by a [`super::DeviceStore`] backend
#[derive(Error, Debug)]
pub enum StoreError {
    /// The device a write targets does not exist
    #[error("Device '{0}' not found")]
    NotFound(Uuid),

    /// A unique, foreign key or check constraint rejected the write
    #[error("Write rejected by a constraint: {0}")]
    Conflict(String),

    /// A stored row could not be turned back into a domain value
    #[error("Corrupt record: {0}")]
    Corrupt(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation()
                || db_err.is_foreign_key_violation()
                || db_err.is_check_violation()
            {
                return StoreError::Conflict(db_err.message().to_string());
            }
        }
        StoreError::Database(err)
    }
}

impl From<netdev_common::CommonError> for StoreError {
    fn from(err: netdev_common::CommonError) -> Self {
        StoreError::Corrupt(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_is_a_database_error() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Database(_)));
    }

    #[test]
    fn test_parse_failure_is_corrupt() {
        let err: StoreError = "BLENDER"
            .parse::<netdev_common::DeviceType>()
            .unwrap_err()
            .into();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }
}
