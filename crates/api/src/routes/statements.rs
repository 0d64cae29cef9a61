//! Statement routes: deposits, withdrawals, transfers, balance and lookup.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_core::statement::{Balance, CreateOperationInput, OperationType, Statement};
use tally_shared::types::{StatementId, UserId};
use tracing::info;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

/// Body of every create-operation request.
#[derive(Debug, Deserialize)]
pub struct OperationRequest {
    /// Positive amount.
    pub amount: Decimal,
    /// Free-text annotation.
    #[serde(default)]
    pub description: String,
}

/// One entry of the balance history. The owner is implied by the caller.
#[derive(Debug, Serialize)]
pub struct StatementItem {
    /// Statement ID.
    pub id: StatementId,
    /// Paying account, only on incoming transfers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<UserId>,
    /// Amount.
    pub amount: Decimal,
    /// Free-text annotation.
    pub description: String,
    /// Operation kind.
    #[serde(rename = "type")]
    pub operation_type: OperationType,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<Statement> for StatementItem {
    fn from(statement: Statement) -> Self {
        Self {
            id: statement.id,
            sender_id: statement.sender_id.filter(|sender| !sender.is_nil()),
            amount: statement.amount,
            description: statement.description,
            operation_type: statement.operation_type,
            created_at: statement.created_at,
            updated_at: statement.updated_at,
        }
    }
}

/// Balance response with the full history.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    /// History in insertion order.
    pub statement: Vec<StatementItem>,
    /// Signed balance.
    pub balance: Decimal,
}

impl From<Balance> for BalanceResponse {
    fn from(balance: Balance) -> Self {
        Self {
            statement: balance
                .statement
                .unwrap_or_default()
                .into_iter()
                .map(StatementItem::from)
                .collect(),
            balance: balance.balance,
        }
    }
}

/// Creates the statements router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/statements/deposit", post(deposit))
        .route("/statements/withdraw", post(withdraw))
        .route("/statements/transfer/{user_id}", post(transfer))
        .route("/statements/balance", get(balance))
        .route("/statements/{statement_id}", get(show_operation))
}

async fn create(
    state: &AppState,
    input: CreateOperationInput,
) -> Result<(StatusCode, Json<Statement>), ApiError> {
    let statement = state.statements.create_operation(input).await?;

    info!(
        statement_id = %statement.id,
        user_id = %statement.user_id,
        operation_type = %statement.operation_type,
        amount = %statement.amount,
        "Statement created"
    );

    Ok((StatusCode::CREATED, Json(statement)))
}

/// POST /statements/deposit
async fn deposit(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<OperationRequest>,
) -> Result<(StatusCode, Json<Statement>), ApiError> {
    create(
        &state,
        CreateOperationInput {
            user_id: auth.user_id(),
            sender_id: None,
            operation_type: OperationType::Deposit,
            amount: payload.amount,
            description: payload.description,
        },
    )
    .await
}

/// POST /statements/withdraw
async fn withdraw(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<OperationRequest>,
) -> Result<(StatusCode, Json<Statement>), ApiError> {
    create(
        &state,
        CreateOperationInput {
            user_id: auth.user_id(),
            sender_id: None,
            operation_type: OperationType::Withdraw,
            amount: payload.amount,
            description: payload.description,
        },
    )
    .await
}

/// POST /statements/transfer/{user_id} - The caller pays the path user.
async fn transfer(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(receiver): Path<Uuid>,
    Json(payload): Json<OperationRequest>,
) -> Result<(StatusCode, Json<Statement>), ApiError> {
    create(
        &state,
        CreateOperationInput {
            user_id: UserId::from_uuid(receiver),
            sender_id: Some(auth.user_id()),
            operation_type: OperationType::Transfer,
            amount: payload.amount,
            description: payload.description,
        },
    )
    .await
}

/// GET /statements/balance
async fn balance(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<BalanceResponse>, ApiError> {
    let balance = state.statements.get_balance(auth.user_id(), true).await?;
    Ok(Json(balance.into()))
}

/// GET /statements/{statement_id}
async fn show_operation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(statement_id): Path<Uuid>,
) -> Result<Json<Statement>, ApiError> {
    let statement = state
        .statements
        .get_operation(auth.user_id(), StatementId::from_uuid(statement_id))
        .await?;
    Ok(Json(statement))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tally_core::statement::NewStatement;

    #[test]
    fn test_balance_item_drops_owner_and_empty_sender() {
        let statement = NewStatement {
            user_id: UserId::new(),
            sender_id: None,
            operation_type: OperationType::Deposit,
            amount: dec!(100),
            description: "Salary".to_string(),
        }
        .into_statement(Utc::now());

        let json = serde_json::to_value(StatementItem::from(statement)).unwrap();

        assert!(json.get("user_id").is_none());
        assert!(json.get("sender_id").is_none());
        assert_eq!(json["type"], "deposit");
        assert_eq!(json["amount"], "100");
    }

    #[test]
    fn test_balance_item_keeps_sender() {
        let sender = UserId::new();
        let statement = NewStatement {
            user_id: UserId::new(),
            sender_id: Some(sender),
            operation_type: OperationType::Transfer,
            amount: dec!(50),
            description: String::new(),
        }
        .into_statement(Utc::now());

        let json = serde_json::to_value(StatementItem::from(statement)).unwrap();

        assert_eq!(json["sender_id"], sender.into_inner().to_string());
    }
}
