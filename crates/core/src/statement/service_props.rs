//! Property-based tests for the statement service.
//!
//! - Balance never goes negative through the service
//! - Balance equals the fold of accepted operations
//! - Transfers conserve the total across accounts

use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;
use tally_shared::types::UserId;

use super::entry::OperationType;
use super::error::StatementError;
use super::service::{CreateOperationInput, StatementService};
use crate::memory::{InMemoryStatementStore, InMemoryUserDirectory};
use crate::users::{NewUser, UserStore};

/// Strategy for amounts from 0.01 to 10,000.00.
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn deposit_or_withdraw() -> impl Strategy<Value = (OperationType, Decimal)> {
    (
        prop_oneof![Just(OperationType::Deposit), Just(OperationType::Withdraw)],
        positive_amount(),
    )
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

async fn setup(count: usize) -> (StatementService, Vec<UserId>) {
    let users = Arc::new(InMemoryUserDirectory::new());
    let service = StatementService::new(Arc::new(InMemoryStatementStore::new()), users.clone());

    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let user = users
            .create(NewUser {
                name: format!("user{i}"),
                email: format!("user{i}@test.com"),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();
        ids.push(user.id);
    }

    (service, ids)
}

fn input(
    user_id: UserId,
    sender_id: Option<UserId>,
    operation_type: OperationType,
    amount: Decimal,
) -> CreateOperationInput {
    CreateOperationInput {
        user_id,
        sender_id,
        operation_type,
        amount,
        description: String::new(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any sequence of deposits and withdrawals leaves a non-negative balance
    /// equal to the accepted deposits minus the accepted withdrawals.
    #[test]
    fn prop_balance_tracks_accepted_operations(
        ops in prop::collection::vec(deposit_or_withdraw(), 1..30),
    ) {
        runtime().block_on(async {
            let (service, ids) = setup(1).await;
            let user = ids[0];
            let mut expected = Decimal::ZERO;

            for (operation_type, amount) in ops {
                let result = service.create_operation(input(user, None, operation_type, amount)).await;
                match (operation_type, result) {
                    (OperationType::Deposit, Ok(_)) => expected += amount,
                    (OperationType::Withdraw, Ok(_)) => {
                        prop_assert!(expected >= amount);
                        expected -= amount;
                    }
                    (OperationType::Withdraw, Err(StatementError::InsufficientFunds { balance, .. })) => {
                        prop_assert!(balance < amount);
                        prop_assert_eq!(balance, expected);
                    }
                    (_, other) => prop_assert!(false, "unexpected result {:?}", other),
                }

                let balance = service.get_balance(user, false).await.unwrap().balance;
                prop_assert_eq!(balance, expected);
                prop_assert!(balance >= Decimal::ZERO);
            }
            Ok(())
        })?;
    }

    /// Transfers move value between accounts without creating or losing any.
    #[test]
    fn prop_transfers_conserve_total(
        seed in positive_amount(),
        transfers in prop::collection::vec((0usize..3, 0usize..3, positive_amount()), 1..20),
    ) {
        runtime().block_on(async {
            let (service, ids) = setup(3).await;
            service
                .create_operation(input(ids[0], None, OperationType::Deposit, seed))
                .await
                .unwrap();

            for (from, to, amount) in transfers {
                let _ = service
                    .create_operation(input(ids[to], Some(ids[from]), OperationType::Transfer, amount))
                    .await;
            }

            let mut total = Decimal::ZERO;
            for id in &ids {
                let balance = service.get_balance(*id, false).await.unwrap().balance;
                prop_assert!(balance >= Decimal::ZERO);
                total += balance;
            }
            prop_assert_eq!(total, seed);
            Ok(())
        })?;
    }
}
