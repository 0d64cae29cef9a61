//! Statement use cases: create an operation, read a balance, read one entry.
//!
//! Validation happens here; the injected [`StatementStore`] only persists.

use std::sync::Arc;

use rust_decimal::Decimal;
use tally_shared::types::{StatementId, UserId};

use super::balance::Balance;
use super::entry::{NewStatement, OperationType, Statement, normalize_amount};
use super::error::StatementError;
use super::locks::UserLocks;
use super::store::{StatementStore, UserLookup};

/// Input for recording one operation.
#[derive(Debug, Clone)]
pub struct CreateOperationInput {
    /// Acting account for deposits and withdrawals, receiver for transfers.
    pub user_id: UserId,
    /// Paying account; required for transfers, ignored otherwise.
    pub sender_id: Option<UserId>,
    /// Operation kind.
    pub operation_type: OperationType,
    /// Amount, positive with at most two decimal places.
    pub amount: Decimal,
    /// Free-text annotation.
    pub description: String,
}

/// Orchestrates the statement use cases over injected stores.
#[derive(Clone)]
pub struct StatementService {
    statements: Arc<dyn StatementStore>,
    users: Arc<dyn UserLookup>,
    locks: Arc<UserLocks>,
}

impl StatementService {
    /// Creates a service with a fresh lock registry.
    #[must_use]
    pub fn new(statements: Arc<dyn StatementStore>, users: Arc<dyn UserLookup>) -> Self {
        Self {
            statements,
            users,
            locks: Arc::new(UserLocks::new()),
        }
    }

    /// Validates and records a deposit, withdrawal or transfer.
    ///
    /// Checks run in order and stop at the first failure: user, amount,
    /// sender (transfers), then funds (transfers and withdrawals). Amounts
    /// must be positive with at most two decimal places and are stored at
    /// exactly two. A balance equal to the amount is sufficient. The payer's
    /// balance check and the append run under that payer's lock.
    ///
    /// # Errors
    ///
    /// `UserNotFound`, `InvalidAmount`, `SenderNotFound`, `SelfTransfer`,
    /// `InsufficientFunds`, or `Storage`. Nothing is written on error.
    pub async fn create_operation(
        &self,
        input: CreateOperationInput,
    ) -> Result<Statement, StatementError> {
        if self.users.find_by_id(input.user_id).await?.is_none() {
            return Err(StatementError::UserNotFound);
        }

        let amount = normalize_amount(input.amount).ok_or(StatementError::InvalidAmount)?;

        let entry = match input.operation_type {
            OperationType::Deposit => NewStatement {
                user_id: input.user_id,
                sender_id: None,
                operation_type: OperationType::Deposit,
                amount,
                description: input.description,
            },
            OperationType::Withdraw => NewStatement {
                user_id: input.user_id,
                sender_id: None,
                operation_type: OperationType::Withdraw,
                amount,
                description: input.description,
            },
            OperationType::Transfer => {
                let sender_id = self.resolve_sender(input.sender_id).await?;
                if sender_id == input.user_id {
                    return Err(StatementError::SelfTransfer);
                }
                NewStatement {
                    user_id: input.user_id,
                    sender_id: Some(sender_id),
                    operation_type: OperationType::Transfer,
                    amount,
                    description: input.description,
                }
            }
        };

        let payer = match entry.operation_type {
            OperationType::Deposit => None,
            OperationType::Withdraw => Some(entry.user_id),
            OperationType::Transfer => entry.sender_id,
        };

        let Some(payer) = payer else {
            return Ok(self.statements.append(entry).await?);
        };

        let _guard = self.locks.acquire(payer).await;

        let Balance { balance, .. } = self.statements.balance_for(payer, false).await?;
        if balance < entry.amount {
            return Err(StatementError::InsufficientFunds {
                balance,
                requested: entry.amount,
            });
        }

        Ok(self.statements.append(entry).await?)
    }

    /// Returns a user's balance, with the statement history if asked.
    ///
    /// # Errors
    ///
    /// `UserNotFound` if the user does not resolve.
    pub async fn get_balance(
        &self,
        user_id: UserId,
        with_statement: bool,
    ) -> Result<Balance, StatementError> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(StatementError::UserNotFound);
        }

        Ok(self.statements.balance_for(user_id, with_statement).await?)
    }

    /// Returns one statement owned by `user_id`.
    ///
    /// # Errors
    ///
    /// `UserNotFound` if the user does not resolve, `StatementNotFound` if
    /// the statement is missing or belongs to someone else.
    pub async fn get_operation(
        &self,
        user_id: UserId,
        statement_id: StatementId,
    ) -> Result<Statement, StatementError> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(StatementError::UserNotFound);
        }

        self.statements
            .find_by_id_for_user(statement_id, user_id)
            .await?
            .ok_or(StatementError::StatementNotFound)
    }

    async fn resolve_sender(&self, sender_id: Option<UserId>) -> Result<UserId, StatementError> {
        let Some(sender_id) = sender_id else {
            return Err(StatementError::SenderNotFound);
        };
        match self.users.find_by_id(sender_id).await? {
            Some(sender) => Ok(sender.id),
            None => Err(StatementError::SenderNotFound),
        }
    }
}
