//! Account statements: the append-only record of deposits, withdrawals and
//! transfers, and the balances derived from it.

mod balance;
mod entry;
mod error;
mod locks;
mod service;
mod store;

#[cfg(test)]
mod service_props;

pub use balance::{Balance, BalanceOverflow, contribution, fold_balance};
pub use entry::{
    AMOUNT_SCALE, NewStatement, OperationType, Statement, max_amount, normalize_amount,
};
pub use error::StatementError;
pub use locks::UserLocks;
pub use service::{CreateOperationInput, StatementService};
pub use store::{StatementStore, UserLookup};
