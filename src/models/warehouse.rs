// src/models/warehouse.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub telephone: String,
    pub capacity: i32,
}

/// Quantidade de produtos em cada armazém (0 quando vazio).
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseReportProducts {
    pub warehouse_name: String,
    pub product_count: i64,
}
