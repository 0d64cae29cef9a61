//! User error types.

use thiserror::Error;

use super::store::CreateUserError;
use crate::auth::PasswordError;

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserError {
    /// Registration input is malformed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Another account already uses this email.
    #[error("User already exists")]
    EmailAlreadyTaken,

    /// Unknown email or wrong password; the two are not distinguished.
    #[error("Incorrect email or password")]
    IncorrectEmailOrPassword,

    /// The user does not exist.
    #[error("User not found")]
    UserNotFound,

    /// Password hashing or verification failed.
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// The backing store failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl UserError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::EmailAlreadyTaken => "user_already_exists",
            Self::IncorrectEmailOrPassword => "incorrect_email_or_password",
            Self::UserNotFound => "user_not_found",
            Self::Password(_) | Self::Storage(_) => "internal_error",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::IncorrectEmailOrPassword => 401,
            Self::UserNotFound => 404,
            Self::EmailAlreadyTaken => 409,
            Self::Password(_) | Self::Storage(_) => 500,
        }
    }
}

impl From<CreateUserError> for UserError {
    fn from(err: CreateUserError) -> Self {
        match err {
            CreateUserError::DuplicateEmail => Self::EmailAlreadyTaken,
            CreateUserError::Storage(err) => err.into(),
        }
    }
}
