//! Balance derivation from a user's statements.
//!
//! Balances are never stored. Every read folds the owner's statements:
//!
//! - deposit: `+amount`
//! - withdraw: `-amount`
//! - transfer with a sender recorded: `+amount` (the credit record)
//! - transfer without a sender: `-amount` (the payer's debit record)
//!
//! The transfer sign depends only on whether `sender_id` is present on the
//! stored row, never on who is asking.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use super::entry::{OperationType, Statement};

/// Signed contribution of one statement to its owner's balance.
#[must_use]
pub fn contribution(statement: &Statement) -> Decimal {
    match statement.operation_type {
        OperationType::Deposit => statement.amount,
        OperationType::Withdraw => -statement.amount,
        OperationType::Transfer => match statement.sender_id {
            Some(sender) if !sender.is_nil() => statement.amount,
            _ => -statement.amount,
        },
    }
}

/// The running balance left the range `Decimal` can represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("balance overflowed")]
pub struct BalanceOverflow;

/// Folds statements into a balance. May be negative; no clamping.
///
/// # Errors
///
/// Returns [`BalanceOverflow`] if an intermediate sum is not representable.
pub fn fold_balance<'a, I>(statements: I) -> Result<Decimal, BalanceOverflow>
where
    I: IntoIterator<Item = &'a Statement>,
{
    statements
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, statement| {
            acc.checked_add(contribution(statement))
        })
        .ok_or(BalanceOverflow)
}

/// A user's derived balance, optionally with the statements behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Balance {
    /// Signed balance.
    pub balance: Decimal,
    /// The folded statements, in insertion order, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement: Option<Vec<Statement>>,
}

impl Balance {
    /// Folds `statements` and keeps them only if `with_statement` is set.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceOverflow`] if the fold overflows.
    pub fn from_statements(
        statements: Vec<Statement>,
        with_statement: bool,
    ) -> Result<Self, BalanceOverflow> {
        let balance = fold_balance(&statements)?;
        Ok(Self {
            balance,
            statement: with_statement.then_some(statements),
        })
    }
}
