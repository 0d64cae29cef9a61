//! Ledger statement domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{StatementId, UserId};

/// Kind of financial operation recorded by a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    /// Money entering the account.
    Deposit,
    /// Money leaving the account.
    Withdraw,
    /// Money moving from a sender to a receiving account.
    Transfer,
}

impl OperationType {
    /// Returns the lowercase wire name of the operation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
            Self::Transfer => "transfer",
        }
    }
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OperationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "deposit" => Ok(Self::Deposit),
            "withdraw" => Ok(Self::Withdraw),
            "transfer" => Ok(Self::Transfer),
            _ => Err(format!("Unknown operation type: {s}")),
        }
    }
}

/// A single immutable ledger entry.
///
/// For deposits and withdrawals `user_id` is the acting account. For the
/// credit side of a transfer `user_id` is the receiver and `sender_id` the
/// payer; the payer's debit side carries no `sender_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    /// Unique identifier for this entry.
    pub id: StatementId,
    /// The owning account.
    pub user_id: UserId,
    /// The paying account, only on transfer credit records.
    pub sender_id: Option<UserId>,
    /// Operation kind.
    #[serde(rename = "type")]
    pub operation_type: OperationType,
    /// Positive amount; direction comes from the operation kind.
    pub amount: Decimal,
    /// Free-text annotation.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Equal to `created_at`; statements are never updated.
    pub updated_at: DateTime<Utc>,
}

/// A statement that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStatement {
    /// The owning account.
    pub user_id: UserId,
    /// The paying account for transfers.
    pub sender_id: Option<UserId>,
    /// Operation kind.
    pub operation_type: OperationType,
    /// Positive amount.
    pub amount: Decimal,
    /// Free-text annotation.
    pub description: String,
}

impl NewStatement {
    /// Returns the payer-side record stored alongside a transfer.
    ///
    /// The record belongs to the sender and has no `sender_id`, so the
    /// balance fold counts it as an outgoing transfer. Returns `None` for
    /// deposits, withdrawals and transfers without a sender.
    #[must_use]
    pub fn sender_leg(&self) -> Option<Self> {
        match (self.operation_type, self.sender_id) {
            (OperationType::Transfer, Some(sender_id)) => Some(Self {
                user_id: sender_id,
                sender_id: None,
                operation_type: OperationType::Transfer,
                amount: self.amount,
                description: self.description.clone(),
            }),
            _ => None,
        }
    }

    /// Materialises the entry with a fresh id and the given timestamp.
    #[must_use]
    pub fn into_statement(self, now: DateTime<Utc>) -> Statement {
        Statement {
            id: StatementId::new(),
            user_id: self.user_id,
            sender_id: self.sender_id,
            operation_type: self.operation_type,
            amount: self.amount,
            description: self.description,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Decimal places an amount may carry; matches the `NUMERIC(18, 2)` column.
pub const AMOUNT_SCALE: u32 = 2;

/// Largest storable amount, 9,999,999,999,999,999.99.
#[must_use]
pub fn max_amount() -> Decimal {
    Decimal::new(999_999_999_999_999_999, AMOUNT_SCALE)
}

/// Returns `amount` at exactly [`AMOUNT_SCALE`] places, or `None` if it is
/// not positive, has more significant places, or exceeds [`max_amount`].
///
/// Trailing zeros are not significant: `10.500` is accepted as `10.50`.
#[must_use]
pub fn normalize_amount(amount: Decimal) -> Option<Decimal> {
    if amount <= Decimal::ZERO || amount > max_amount() {
        return None;
    }
    if amount.normalize().scale() > AMOUNT_SCALE {
        return None;
    }

    let mut normalized = amount;
    normalized.rescale(AMOUNT_SCALE);
    Some(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[rstest::rstest]
    #[case(dec!(10), Some("10.00"))]
    #[case(dec!(10.5), Some("10.50"))]
    #[case(dec!(10.500), Some("10.50"))]
    #[case(dec!(0.01), Some("0.01"))]
    #[case(dec!(9999999999999999.99), Some("9999999999999999.99"))]
    #[case(dec!(10.005), None)]
    #[case(dec!(0.001), None)]
    #[case(dec!(0), None)]
    #[case(dec!(-1), None)]
    #[case(dec!(10000000000000000), None)]
    #[case(Decimal::MAX, None)]
    fn test_normalize_amount(#[case] amount: Decimal, #[case] expected: Option<&str>) {
        let normalized = normalize_amount(amount).map(|a| a.to_string());
        assert_eq!(normalized.as_deref(), expected);
    }

    fn transfer(receiver: UserId, sender: UserId) -> NewStatement {
        NewStatement {
            user_id: receiver,
            sender_id: Some(sender),
            operation_type: OperationType::Transfer,
            amount: dec!(50),
            description: "rent share".to_string(),
        }
    }

    #[test]
    fn test_operation_type_round_trips_through_str() {
        for op in [
            OperationType::Deposit,
            OperationType::Withdraw,
            OperationType::Transfer,
        ] {
            assert_eq!(OperationType::from_str(op.as_str()).unwrap(), op);
        }
        assert_eq!(
            OperationType::from_str("DEPOSIT").unwrap(),
            OperationType::Deposit
        );
        assert!(OperationType::from_str("refund").is_err());
    }

    #[test]
    fn test_sender_leg_for_transfer() {
        let receiver = UserId::new();
        let sender = UserId::new();

        let leg = transfer(receiver, sender).sender_leg().unwrap();

        assert_eq!(leg.user_id, sender);
        assert_eq!(leg.sender_id, None);
        assert_eq!(leg.operation_type, OperationType::Transfer);
        assert_eq!(leg.amount, dec!(50));
    }

    #[test]
    fn test_no_sender_leg_for_deposit() {
        let entry = NewStatement {
            user_id: UserId::new(),
            sender_id: None,
            operation_type: OperationType::Deposit,
            amount: dec!(10),
            description: String::new(),
        };
        assert!(entry.sender_leg().is_none());
    }

    #[test]
    fn test_into_statement_sets_matching_timestamps() {
        let now = Utc::now();
        let statement = transfer(UserId::new(), UserId::new()).into_statement(now);

        assert_eq!(statement.created_at, now);
        assert_eq!(statement.updated_at, now);
    }

    #[test]
    fn test_statement_serializes_type_field() {
        let statement = transfer(UserId::new(), UserId::new()).into_statement(Utc::now());
        let json = serde_json::to_value(&statement).unwrap();

        assert_eq!(json["type"], "transfer");
        assert_eq!(json["amount"], "50");
    }
}
