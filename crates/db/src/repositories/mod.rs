//! Repository abstractions for data access.
//!
//! Repositories implement the `tally-core` store traits on top of `SeaORM`,
//! hiding the database from the rest of the application.

pub mod statement;
pub mod user;

pub use statement::StatementRepository;
pub use user::UserRepository;
