//! Statement repository for database operations.
//!
//! Rows are only ever inserted. A transfer writes the receiver's credit and
//! the payer's debit in one database transaction.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tally_core::StorageError;
use tally_core::statement::{Balance, NewStatement, Statement, StatementStore};
use tally_shared::types::{StatementId, UserId};
use tracing::debug;

use crate::entities::statements;

/// Statement repository backed by the `statements` table.
#[derive(Debug, Clone)]
pub struct StatementRepository {
    db: DatabaseConnection,
}

impl StatementRepository {
    /// Creates a new statement repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists a user's statement rows in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<statements::Model>, DbErr> {
        statements::Entity::find()
            .filter(statements::Column::UserId.eq(user_id.into_inner()))
            .order_by_asc(statements::Column::CreatedAt)
            .order_by_asc(statements::Column::Id)
            .all(&self.db)
            .await
    }

    /// Inserts an entry and, for transfers, its sender leg.
    ///
    /// # Errors
    ///
    /// Returns an error if either insert fails; nothing is written then.
    pub async fn insert(&self, entry: NewStatement) -> Result<Statement, DbErr> {
        let now = Utc::now();
        let sender_leg = entry.sender_leg().map(|leg| leg.into_statement(now));
        let statement = entry.into_statement(now);

        let txn = self.db.begin().await?;

        if let Some(leg) = &sender_leg {
            insert_row(&txn, leg).await?;
        }
        insert_row(&txn, &statement).await?;

        txn.commit().await?;

        debug!(
            statement_id = %statement.id,
            user_id = %statement.user_id,
            operation_type = %statement.operation_type,
            "Statement stored"
        );

        Ok(statement)
    }
}

async fn insert_row<C: ConnectionTrait>(conn: &C, statement: &Statement) -> Result<(), DbErr> {
    statements::ActiveModel {
        id: Set(statement.id.into_inner()),
        user_id: Set(statement.user_id.into_inner()),
        sender_id: Set(statement.sender_id.map(UserId::into_inner)),
        operation_type: Set(statement.operation_type.into()),
        amount: Set(statement.amount),
        description: Set(statement.description.clone()),
        created_at: Set(statement.created_at.into()),
        updated_at: Set(statement.updated_at.into()),
    }
    .insert(conn)
    .await?;

    Ok(())
}

impl From<statements::Model> for Statement {
    fn from(model: statements::Model) -> Self {
        Self {
            id: StatementId::from_uuid(model.id),
            user_id: UserId::from_uuid(model.user_id),
            sender_id: model.sender_id.map(UserId::from_uuid),
            operation_type: model.operation_type.into(),
            amount: model.amount,
            description: model.description,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

#[async_trait]
impl StatementStore for StatementRepository {
    async fn append(&self, entry: NewStatement) -> Result<Statement, StorageError> {
        self.insert(entry).await.map_err(StorageError::new)
    }

    async fn find_by_id_for_user(
        &self,
        statement_id: StatementId,
        user_id: UserId,
    ) -> Result<Option<Statement>, StorageError> {
        statements::Entity::find_by_id(statement_id.into_inner())
            .filter(statements::Column::UserId.eq(user_id.into_inner()))
            .one(&self.db)
            .await
            .map(|found| found.map(Statement::from))
            .map_err(StorageError::new)
    }

    async fn balance_for(
        &self,
        user_id: UserId,
        with_statement: bool,
    ) -> Result<Balance, StorageError> {
        let rows = self.list_for_user(user_id).await.map_err(StorageError::new)?;
        let statements = rows.into_iter().map(Statement::from).collect();

        Ok(Balance::from_statements(statements, with_statement)?)
    }
}
