// src/models/product.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// --- Produto ---
// Pertence a exatamente um armazém (warehouse_id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub quantity: i32,
    pub code_value: String, // único
    pub is_published: bool,
    pub expiration: NaiveDate,
    pub price: Decimal,
    pub warehouse_id: i32,
}

// --- Ranking de vendas (derivado) ---
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub product_description: String,
    pub sales: i64,
}
