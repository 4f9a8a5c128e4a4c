// src/handlers/products.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use super::{validate_not_negative, LimitQuery};
use crate::{common::error::AppError, config::AppState, models::product::Product};

// ---
// Payload: Produto (POST e PUT)
// ---
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(range(min = 0, message = "A quantidade não pode ser negativa."))]
    pub quantity: i32,

    #[validate(length(min = 1, max = 100, message = "O código deve ter entre 1 e 100 caracteres."))]
    pub code_value: String,

    #[serde(default)]
    pub is_published: bool,

    pub expiration: NaiveDate, // ex: 2030-12-31

    #[validate(custom(function = "validate_not_negative"))]
    pub price: Decimal,

    #[validate(range(min = 1, message = "O campo 'warehouseId' é obrigatório."))]
    pub warehouse_id: i32,
}

impl ProductPayload {
    fn into_product(self, id: i32) -> Product {
        Product {
            id,
            name: self.name,
            quantity: self.quantity,
            code_value: self.code_value,
            is_published: self.is_published,
            expiration: self.expiration,
            price: self.price,
            warehouse_id: self.warehouse_id,
        }
    }
}

impl From<Product> for ProductPayload {
    fn from(p: Product) -> Self {
        Self {
            name: p.name,
            quantity: p.quantity,
            code_value: p.code_value,
            is_published: p.is_published,
            expiration: p.expiration,
            price: p.price,
            warehouse_id: p.warehouse_id,
        }
    }
}

// ---
// Payload: PATCH (todos os campos opcionais)
// ---
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchProductPayload {
    pub name: Option<String>,
    pub quantity: Option<i32>,
    pub code_value: Option<String>,
    pub is_published: Option<bool>,
    pub expiration: Option<NaiveDate>,
    pub price: Option<Decimal>,
    pub warehouse_id: Option<i32>,
}

impl PatchProductPayload {
    /// Sobrepõe os campos presentes ao produto atual.
    fn apply(self, current: Product) -> ProductPayload {
        let mut merged = ProductPayload::from(current);
        if let Some(name) = self.name {
            merged.name = name;
        }
        if let Some(quantity) = self.quantity {
            merged.quantity = quantity;
        }
        if let Some(code_value) = self.code_value {
            merged.code_value = code_value;
        }
        if let Some(is_published) = self.is_published {
            merged.is_published = is_published;
        }
        if let Some(expiration) = self.expiration {
            merged.expiration = expiration;
        }
        if let Some(price) = self.price {
            merged.price = price;
        }
        if let Some(warehouse_id) = self.warehouse_id {
            merged.warehouse_id = warehouse_id;
        }
        merged
    }
}

// POST /api/products
pub async fn create_product(
    State(app_state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut product = payload.into_product(0);
    app_state.product_service.save(&mut product).await?;

    Ok((StatusCode::CREATED, Json(product)))
}

// GET /api/products
pub async fn get_all_products(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state.product_service.find_all().await?;

    Ok((StatusCode::OK, Json(products)))
}

// GET /api/products/{id}
pub async fn get_product(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let product = app_state.product_service.find_by_id(id).await?;

    Ok((StatusCode::OK, Json(product)))
}

// PUT /api/products/{id}
// Substitui o produto; se o id não existir, cria um novo com id gerado.
// A resposta traz o id final.
pub async fn update_or_create_product(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut product = payload.into_product(id);
    app_state.product_service.update_or_save(&mut product).await?;

    Ok((StatusCode::OK, Json(product)))
}

// PATCH /api/products/{id}
pub async fn patch_product(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<PatchProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    let current = app_state.product_service.find_by_id(id).await?;

    let merged = payload.apply(current);
    merged.validate()?;

    let product = merged.into_product(id);
    app_state.product_service.update(&product).await?;

    Ok((StatusCode::OK, Json(product)))
}

// DELETE /api/products/{id}
pub async fn delete_product(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    app_state.product_service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/products/top-sold?limit=n
pub async fn get_top_sold_products(
    State(app_state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<impl IntoResponse, AppError> {
    query.validate()?;

    let top = app_state.sale_service.top_sold_products(query.limit).await?;

    Ok((StatusCode::OK, Json(top)))
}
