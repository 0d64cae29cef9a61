//! Storage failures shared by every store trait.

use thiserror::Error;

/// A backing store could not complete an operation.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct StorageError(pub String);

impl StorageError {
    /// Wraps any displayable error.
    pub fn new(err: impl std::fmt::Display) -> Self {
        Self(err.to_string())
    }
}

impl From<crate::statement::BalanceOverflow> for StorageError {
    fn from(err: crate::statement::BalanceOverflow) -> Self {
        Self::new(err)
    }
}

impl From<StorageError> for crate::statement::StatementError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err.0)
    }
}

impl From<StorageError> for crate::users::UserError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err.0)
    }
}
