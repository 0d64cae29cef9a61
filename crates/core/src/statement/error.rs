//! Statement error types.
//!
//! Every failure of the statement use cases is a distinct variant so the
//! transport layer can map each one to its own response.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during statement operations.
#[derive(Debug, Error)]
pub enum StatementError {
    /// The acting or queried user does not exist.
    #[error("User not found")]
    UserNotFound,

    /// The paying user of a transfer does not exist.
    #[error("Sender not found")]
    SenderNotFound,

    /// The payer's balance is lower than the requested amount.
    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Balance at the time of the check.
        balance: Decimal,
        /// Amount the operation asked for.
        requested: Decimal,
    },

    /// The statement does not exist for this user.
    #[error("Statement not found")]
    StatementNotFound,

    /// Amount is zero or negative.
    #[error("Amount must be positive")]
    InvalidAmount,

    /// Sender and receiver of a transfer are the same account.
    #[error("Cannot transfer to the same account")]
    SelfTransfer,

    /// The backing store failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl StatementError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UserNotFound => "user_not_found",
            Self::SenderNotFound => "sender_not_found",
            Self::InsufficientFunds { .. } => "insufficient_funds",
            Self::StatementNotFound => "statement_not_found",
            Self::InvalidAmount => "invalid_amount",
            Self::SelfTransfer => "self_transfer",
            Self::Storage(_) => "internal_error",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::InsufficientFunds { .. } | Self::InvalidAmount | Self::SelfTransfer => 400,
            Self::UserNotFound | Self::SenderNotFound | Self::StatementNotFound => 404,
            Self::Storage(_) => 500,
        }
    }
}
