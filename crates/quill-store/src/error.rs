/// Errors from article store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No article is stored under the requested key.
    #[error("article not found: {0}")]
    NotFound(String),

    /// Stored bytes could not be encoded or decoded.
    #[error("codec error: {0}")]
    Codec(String),

    /// The embedded engine failed to open, begin, read, write, or commit.
    #[error("storage error: {0}")]
    Storage(#[from] redb::Error),

    /// I/O error while preparing the data directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend is unusable (poisoned lock, lost worker task).
    #[error("storage backend unavailable: {0}")]
    Backend(String),
}

impl StoreError {
    /// Returns `true` for a missing key, as opposed to an internal failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

macro_rules! engine_error {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for StoreError {
                fn from(err: $ty) -> Self {
                    Self::Storage(redb::Error::from(err))
                }
            }
        )*
    };
}

engine_error!(
    redb::DatabaseError,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
);

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message() {
        let err = StoreError::NotFound("12".into());
        assert_eq!(err.to_string(), "article not found: 12");
        assert!(err.is_not_found());
    }

    #[test]
    fn internal_errors_are_not_not_found() {
        assert!(!StoreError::Codec("bad".into()).is_not_found());
        assert!(!StoreError::Backend("gone".into()).is_not_found());
    }
}
