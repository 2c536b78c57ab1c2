//! Error types crossing the storage ports.

use thiserror::Error;

/// PostgreSQL SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Failure reported by a content, admin or session store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                StoreError::Conflict(
                    db_err
                        .constraint()
                        .map(|c| format!("unique constraint {} violated", c))
                        .unwrap_or_else(|| "unique constraint violated".to_string()),
                )
            }
            _ => StoreError::Unavailable(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: StoreError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[test]
    fn test_pool_timeout_maps_to_unavailable() {
        let err: StoreError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[test]
    fn test_display() {
        assert_eq!(StoreError::NotFound.to_string(), "Record not found");
        assert_eq!(
            StoreError::Conflict("slug taken".to_string()).to_string(),
            "Conflict: slug taken"
        );
    }
}
