//! User repository for database operations.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set, SqlErr,
};
use tally_core::StorageError;
use tally_core::statement::UserLookup;
use tally_core::users::{CreateUserError, NewUser, User, UserStore};
use tally_shared::types::UserId;

use crate::entities::users;

/// User repository backed by the `users` table.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user row by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_model(&self, id: UserId) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id.into_inner()).one(&self.db).await
    }

    /// Finds a user row by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_model_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    /// Inserts a user row.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including on a duplicate email.
    pub async fn insert(&self, new_user: NewUser) -> Result<users::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let user = users::ActiveModel {
            id: Set(UserId::new().into_inner()),
            name: Set(new_user.name),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            created_at: Set(now),
            updated_at: Set(now),
        };

        user.insert(&self.db).await
    }
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: UserId::from_uuid(model.id),
            name: model.name,
            email: model.email,
            password_hash: model.password_hash,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

#[async_trait]
impl UserLookup for UserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StorageError> {
        self.find_model(id)
            .await
            .map(|found| found.map(User::from))
            .map_err(StorageError::new)
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        self.find_model_by_email(email)
            .await
            .map(|found| found.map(User::from))
            .map_err(StorageError::new)
    }

    async fn create(&self, new_user: NewUser) -> Result<User, CreateUserError> {
        self.insert(new_user)
            .await
            .map(User::from)
            .map_err(|err| match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => CreateUserError::DuplicateEmail,
                _ => StorageError::new(err).into(),
            })
    }
}
