//! `SeaORM` active enums backed by Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Postgres `operation_type` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "operation_type")]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    #[sea_orm(string_value = "deposit")]
    Deposit,
    #[sea_orm(string_value = "withdraw")]
    Withdraw,
    #[sea_orm(string_value = "transfer")]
    Transfer,
}

impl From<tally_core::statement::OperationType> for OperationType {
    fn from(value: tally_core::statement::OperationType) -> Self {
        use tally_core::statement::OperationType as Core;
        match value {
            Core::Deposit => Self::Deposit,
            Core::Withdraw => Self::Withdraw,
            Core::Transfer => Self::Transfer,
        }
    }
}

impl From<OperationType> for tally_core::statement::OperationType {
    fn from(value: OperationType) -> Self {
        match value {
            OperationType::Deposit => Self::Deposit,
            OperationType::Withdraw => Self::Withdraw,
            OperationType::Transfer => Self::Transfer,
        }
    }
}
