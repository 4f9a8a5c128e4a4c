// src/handlers/sales.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use validator::Validate;

use crate::{common::error::AppError, config::AppState, models::sale::Sale};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalePayload {
    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub quantity: i32,

    #[validate(range(min = 1, message = "O campo 'productId' é obrigatório."))]
    pub product_id: i32,

    #[validate(range(min = 1, message = "O campo 'invoiceId' é obrigatório."))]
    pub invoice_id: i32,
}

// POST /api/sales
pub async fn create_sale(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateSalePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut sale = Sale {
        id: 0,
        quantity: payload.quantity,
        product_id: payload.product_id,
        invoice_id: payload.invoice_id,
    };
    app_state.sale_service.save(&mut sale).await?;

    Ok((StatusCode::CREATED, Json(sale)))
}

// GET /api/sales
pub async fn get_all_sales(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let sales = app_state.sale_service.find_all().await?;

    Ok((StatusCode::OK, Json(sales)))
}
