//! Core business logic for Tally.
//!
//! This crate holds the statement and user use cases with ZERO web or
//! database dependencies. Persistence is injected through the store traits.
//!
//! # Modules
//!
//! - `statement` - Operations, balance derivation, per-user serialization
//! - `users` - Registration, authentication, profile lookup
//! - `auth` - Password hashing
//! - `memory` - In-memory store implementations

pub mod auth;
pub mod error;
pub mod memory;
pub mod statement;
pub mod users;

pub use error::StorageError;
