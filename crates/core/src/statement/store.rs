//! Capabilities the statement use cases consume.
//!
//! The core never talks to a database directly; callers inject an
//! implementation of each trait (in-memory for tests, Postgres in `tally-db`).

use async_trait::async_trait;
use tally_shared::types::{StatementId, UserId};

use super::balance::Balance;
use super::entry::{NewStatement, Statement};
use crate::error::StorageError;
use crate::users::User;

/// Append-only collection of statements, keyed by owning user.
#[async_trait]
pub trait StatementStore: Send + Sync {
    /// Assigns an id and timestamps, persists and returns the entry.
    ///
    /// Performs no business validation. A transfer also persists its
    /// [`NewStatement::sender_leg`] in the same atomic write; the returned
    /// statement is always the one described by `entry`.
    async fn append(&self, entry: NewStatement) -> Result<Statement, StorageError>;

    /// Returns the statement only if it exists and belongs to `user_id`.
    async fn find_by_id_for_user(
        &self,
        statement_id: StatementId,
        user_id: UserId,
    ) -> Result<Option<Statement>, StorageError>;

    /// Folds all statements owned by `user_id`, optionally returning them.
    async fn balance_for(
        &self,
        user_id: UserId,
        with_statement: bool,
    ) -> Result<Balance, StorageError>;
}

/// Resolves user ids to users.
#[async_trait]
pub trait UserLookup: Send + Sync {
    /// Finds a user by id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StorageError>;
}
