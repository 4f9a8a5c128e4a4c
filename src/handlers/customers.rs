// src/handlers/customers.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use super::LimitQuery;
use crate::{common::error::AppError, config::AppState, models::customer::Customer};

// ---
// Payload: CreateCustomer
// ---
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub first_name: String,

    #[validate(length(min = 1, message = "O sobrenome é obrigatório."))]
    pub last_name: String,

    #[validate(range(min = 0, message = "A condição não pode ser negativa."))]
    #[serde(default)]
    pub condition: i32,
}

// POST /api/customers
pub async fn create_customer(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateCustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut customer = Customer::new(payload.first_name, payload.last_name, payload.condition);
    app_state.customer_service.save(&mut customer).await?;

    Ok((StatusCode::CREATED, Json(customer)))
}

// GET /api/customers
pub async fn get_all_customers(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let customers = app_state.customer_service.find_all().await?;

    Ok((StatusCode::OK, Json(customers)))
}

// GET /api/customers/totals-by-condition
pub async fn get_totals_by_condition(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let totals = app_state.customer_service.total_by_condition().await?;

    Ok((StatusCode::OK, Json(totals)))
}

// GET /api/customers/top-active?limit=n
pub async fn get_top_active_customers(
    State(app_state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<impl IntoResponse, AppError> {
    query.validate()?;

    let top = app_state
        .customer_service
        .top_active_customers(query.limit)
        .await?;

    Ok((StatusCode::OK, Json(top)))
}
