// src/handlers/warehouses.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::{common::error::AppError, config::AppState, models::warehouse::Warehouse};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWarehousePayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub telephone: String,

    #[validate(range(min = 0, message = "A capacidade não pode ser negativa."))]
    #[serde(default)]
    pub capacity: i32,
}

/// `?ids=1,2,3`. Ausente ou vazio = todos os armazéns.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub ids: Option<String>,
}

impl ReportQuery {
    fn parse_ids(&self) -> Result<Vec<i32>, AppError> {
        let Some(raw) = self.ids.as_deref() else {
            return Ok(Vec::new());
        };

        raw.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<i32>()
                    .map_err(|_| AppError::BadRequest(format!("Id de armazém inválido: '{}'", part)))
            })
            .collect()
    }
}

// POST /api/warehouses
pub async fn create_warehouse(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateWarehousePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut warehouse = Warehouse {
        id: 0,
        name: payload.name,
        address: payload.address,
        telephone: payload.telephone,
        capacity: payload.capacity,
    };
    app_state.warehouse_service.save(&mut warehouse).await?;

    Ok((StatusCode::CREATED, Json(warehouse)))
}

// GET /api/warehouses
pub async fn get_all_warehouses(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let warehouses = app_state.warehouse_service.find_all().await?;

    Ok((StatusCode::OK, Json(warehouses)))
}

// GET /api/warehouses/{id}
pub async fn get_warehouse(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let warehouse = app_state.warehouse_service.find_by_id(id).await?;

    Ok((StatusCode::OK, Json(warehouse)))
}

// GET /api/warehouses/reportProducts?ids=1,2
pub async fn get_product_report(
    State(app_state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let ids = query.parse_ids()?;

    let report = app_state.warehouse_service.product_report(&ids).await?;

    Ok((StatusCode::OK, Json(report)))
}
