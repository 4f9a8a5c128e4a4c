// src/models/sale.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i32,
    pub quantity: i32,
    pub product_id: i32,
    pub invoice_id: i32,
}
