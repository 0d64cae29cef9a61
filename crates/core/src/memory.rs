//! In-memory stores.
//!
//! Used by tests and by the API test harness. Each instance owns its own
//! data; nothing is global.

use async_trait::async_trait;
use chrono::Utc;
use tally_shared::types::{StatementId, UserId};
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::statement::{Balance, NewStatement, Statement, StatementStore, UserLookup};
use crate::users::{CreateUserError, NewUser, User, UserStore};

/// Statement store backed by a vector in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryStatementStore {
    statements: RwLock<Vec<Statement>>,
}

impl InMemoryStatementStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored records, transfer legs included.
    pub async fn len(&self) -> usize {
        self.statements.read().await.len()
    }

    /// Returns true if nothing has been appended.
    pub async fn is_empty(&self) -> bool {
        self.statements.read().await.is_empty()
    }
}

#[async_trait]
impl StatementStore for InMemoryStatementStore {
    async fn append(&self, entry: NewStatement) -> Result<Statement, StorageError> {
        let now = Utc::now();
        let sender_leg = entry.sender_leg().map(|leg| leg.into_statement(now));
        let statement = entry.into_statement(now);

        // Single write guard: both transfer legs land together.
        let mut statements = self.statements.write().await;
        if let Some(leg) = sender_leg {
            statements.push(leg);
        }
        statements.push(statement.clone());

        Ok(statement)
    }

    async fn find_by_id_for_user(
        &self,
        statement_id: StatementId,
        user_id: UserId,
    ) -> Result<Option<Statement>, StorageError> {
        let statements = self.statements.read().await;
        Ok(statements
            .iter()
            .find(|s| s.id == statement_id && s.user_id == user_id)
            .cloned())
    }

    async fn balance_for(
        &self,
        user_id: UserId,
        with_statement: bool,
    ) -> Result<Balance, StorageError> {
        let owned: Vec<Statement> = self
            .statements
            .read()
            .await
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();

        Ok(Balance::from_statements(owned, with_statement)?)
    }
}

/// User directory backed by a vector.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserLookup for InMemoryUserDirectory {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StorageError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }
}

#[async_trait]
impl UserStore for InMemoryUserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, CreateUserError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(CreateUserError::DuplicateEmail);
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::OperationType;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_transfer_appends_both_legs() {
        let store = InMemoryStatementStore::new();
        let receiver = UserId::new();
        let sender = UserId::new();

        let stored = store
            .append(NewStatement {
                user_id: receiver,
                sender_id: Some(sender),
                operation_type: OperationType::Transfer,
                amount: dec!(50),
                description: "Transfer $50".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(stored.user_id, receiver);
        assert_eq!(stored.sender_id, Some(sender));
        assert_eq!(store.len().await, 2);

        assert_eq!(store.balance_for(receiver, false).await.unwrap().balance, dec!(50));
        assert_eq!(store.balance_for(sender, false).await.unwrap().balance, dec!(-50));
    }

    #[tokio::test]
    async fn test_find_by_id_for_user_hides_other_users_entries() {
        let store = InMemoryStatementStore::new();
        let owner = UserId::new();

        let stored = store
            .append(NewStatement {
                user_id: owner,
                sender_id: None,
                operation_type: OperationType::Deposit,
                amount: dec!(10),
                description: String::new(),
            })
            .await
            .unwrap();

        let found = store.find_by_id_for_user(stored.id, owner).await.unwrap();
        assert_eq!(found, Some(stored.clone()));

        let foreign = store
            .find_by_id_for_user(stored.id, UserId::new())
            .await
            .unwrap();
        assert!(foreign.is_none());
    }

    #[tokio::test]
    async fn test_balance_overflow_is_reported() {
        let store = InMemoryStatementStore::new();
        let user = UserId::new();
        for _ in 0..2 {
            store
                .append(NewStatement {
                    user_id: user,
                    sender_id: None,
                    operation_type: OperationType::Deposit,
                    amount: rust_decimal::Decimal::MAX,
                    description: String::new(),
                })
                .await
                .unwrap();
        }

        let result = store.balance_for(user, false).await;

        assert!(matches!(result, Err(StorageError(msg)) if msg == "balance overflowed"));
    }

    #[tokio::test]
    async fn test_user_directory_rejects_duplicate_email() {
        let directory = InMemoryUserDirectory::new();
        let new_user = NewUser {
            name: "A".to_string(),
            email: "a@test.com".to_string(),
            password_hash: "hash".to_string(),
        };

        directory.create(new_user.clone()).await.unwrap();
        assert!(matches!(
            directory.create(new_user).await,
            Err(CreateUserError::DuplicateEmail)
        ));
    }
}
