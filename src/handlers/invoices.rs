// src/handlers/invoices.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use super::validate_not_negative;
use crate::{common::error::AppError, config::AppState, models::invoice::Invoice};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoicePayload {
    pub datetime: NaiveDateTime, // ex: 2021-01-01T10:30:00

    // Se não vier, começa zerado (o recálculo preenche a partir das vendas)
    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub total: Decimal,

    #[validate(range(min = 1, message = "O campo 'customerId' é obrigatório."))]
    pub customer_id: i32,
}

// POST /api/invoices
pub async fn create_invoice(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateInvoicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut invoice = Invoice {
        id: 0,
        datetime: payload.datetime,
        total: payload.total,
        customer_id: payload.customer_id,
    };
    app_state.invoice_service.save(&mut invoice).await?;

    Ok((StatusCode::CREATED, Json(invoice)))
}

// GET /api/invoices
pub async fn get_all_invoices(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let invoices = app_state.invoice_service.find_all().await?;

    Ok((StatusCode::OK, Json(invoices)))
}

// POST /api/invoices/recompute-totals
pub async fn recompute_totals(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let updated = app_state.invoice_service.update_totals().await?;

    Ok((StatusCode::OK, Json(json!({ "updated": updated }))))
}
