//! User persistence capability.

use async_trait::async_trait;
use thiserror::Error;

use super::types::{NewUser, User};
use crate::error::StorageError;
use crate::statement::UserLookup;

/// Why a user could not be stored.
#[derive(Debug, Error)]
pub enum CreateUserError {
    /// Another user already holds this email.
    #[error("email already registered")]
    DuplicateEmail,

    /// The backing store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Full user storage, on top of id lookup.
#[async_trait]
pub trait UserStore: UserLookup {
    /// Finds a user by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StorageError>;

    /// Stores a new user with a fresh id.
    ///
    /// Email uniqueness is enforced here, atomically with the insert.
    async fn create(&self, new_user: NewUser) -> Result<User, CreateUserError>;
}
