//! Account holders: registration, authentication and profile lookup.

pub mod error;
pub mod service;
pub mod store;
pub mod types;

pub use error::UserError;
pub use service::UserService;
pub use store::{CreateUserError, UserStore};
pub use types::{NewUser, User};
