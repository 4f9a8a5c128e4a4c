// src/models/customer.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// --- Cliente ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    // 0 = inativo, 1 = ativo (o conjunto de valores é dado do domínio)
    pub condition: i32,
}

impl Customer {
    /// Cliente ainda não persistido (o id é atribuído no `save`).
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, condition: i32) -> Self {
        Self {
            id: 0,
            first_name: first_name.into(),
            last_name: last_name.into(),
            condition,
        }
    }
}

// --- Derivados (nunca persistidos) ---

/// Soma das faturas dos clientes de uma mesma condição.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TotalByCondition {
    pub condition: i32,
    pub total: Decimal,
}

/// Quanto um cliente gastou no total.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAmount {
    pub first_name: String,
    pub last_name: String,
    pub amount: Decimal,
}
