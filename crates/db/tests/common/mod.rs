//! Shared helpers for database integration tests.
//!
//! Tests run against the database named by `DATABASE_URL` and are skipped
//! when it is not set.

#![allow(dead_code)]

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tally_core::users::{NewUser, UserStore};
use tally_db::UserRepository;
use tally_db::migration::Migrator;
use tally_shared::types::UserId;
use uuid::Uuid;

/// Connects and migrates, or returns `None` without `DATABASE_URL`.
pub async fn connect() -> Option<DatabaseConnection> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping");
        return None;
    };

    let db = tally_db::connect(&url)
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    Some(db)
}

/// Creates a user with a unique email.
pub async fn create_user(db: &DatabaseConnection, name: &str) -> UserId {
    UserRepository::new(db.clone())
        .create(NewUser {
            name: name.to_string(),
            email: format!("{name}-{}@test.com", Uuid::new_v4()),
            password_hash: "$argon2id$test_hash".to_string(),
        })
        .await
        .expect("Failed to create user")
        .id
}
