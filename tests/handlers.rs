// tests/handlers.rs
//
// Handlers chamados diretamente, sobre o backend em memória.

mod support;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use mercado::{
    common::error::AppError,
    config::AppState,
    handlers::{
        customers::{self, CreateCustomerPayload},
        invoices,
        products::{self, PatchProductPayload, ProductPayload},
        warehouses::{self, ReportQuery},
        LimitQuery,
    },
};
use support::*;

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn rice_payload(code_value: &str, warehouse_id: i32) -> ProductPayload {
    ProductPayload {
        name: "Arroz".into(),
        quantity: 3,
        code_value: code_value.into(),
        is_published: true,
        expiration: chrono::NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
        price: money(1250),
        warehouse_id,
    }
}

#[tokio::test]
async fn create_customer_returns_201_with_the_new_id() {
    let state = AppState::in_memory();
    let payload = CreateCustomerPayload {
        first_name: "Ana".into(),
        last_name: "Souza".into(),
        condition: 1,
    };

    let response = customers::create_customer(State(state), Json(payload))
        .await
        .unwrap()
        .into_response();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["firstName"], "Ana");
}

#[tokio::test]
async fn invalid_payload_is_a_validation_error() {
    let state = AppState::in_memory();
    let payload = CreateCustomerPayload {
        first_name: "".into(),
        last_name: "Souza".into(),
        condition: 1,
    };

    let err = customers::create_customer(State(state), Json(payload))
        .await
        .err()
        .unwrap();

    assert!(matches!(err, AppError::ValidationError(_)));
    assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn top_active_rejects_a_zero_limit() {
    let state = AppState::in_memory();

    let err = customers::get_top_active_customers(State(state), Query(LimitQuery { limit: 0 }))
        .await
        .err()
        .unwrap();

    assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_code_value_is_a_conflict() {
    let state = AppState::in_memory();
    let w = add_warehouse(&state, "Central").await.unwrap();

    products::create_product(State(state.clone()), Json(rice_payload("AR-1", w)))
        .await
        .unwrap();
    let err = products::create_product(State(state), Json(rice_payload("AR-1", w)))
        .await
        .err()
        .unwrap();

    assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn put_on_missing_product_creates_it_with_a_new_id() {
    let state = AppState::in_memory();
    let w = add_warehouse(&state, "Central").await.unwrap();

    let response =
        products::update_or_create_product(State(state.clone()), Path(50), Json(rice_payload("AR-1", w)))
            .await
            .unwrap()
            .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["id"], 1);
    assert!(state.product_service.find_by_id(1).await.is_ok());
}

#[tokio::test]
async fn patch_keeps_fields_not_sent() {
    let state = AppState::in_memory();
    let w = add_warehouse(&state, "Central").await.unwrap();
    let id = add_product(&state, "Arroz", "AR-1", money(500), w).await.unwrap();
    let patch = PatchProductPayload {
        quantity: Some(99),
        ..Default::default()
    };

    let response = products::patch_product(State(state.clone()), Path(id), Json(patch))
        .await
        .unwrap()
        .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let stored = state.product_service.find_by_id(id).await.unwrap();
    assert_eq!(stored.quantity, 99);
    assert_eq!(stored.code_value, "AR-1");
    assert_eq!(stored.price, money(500));
}

#[tokio::test]
async fn patch_on_missing_product_is_404() {
    let state = AppState::in_memory();

    let err = products::patch_product(State(state), Path(7), Json(PatchProductPayload::default()))
        .await
        .err()
        .unwrap();

    assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_returns_204_then_404() {
    let state = AppState::in_memory();
    let w = add_warehouse(&state, "Central").await.unwrap();
    let id = add_product(&state, "Arroz", "AR-1", money(500), w).await.unwrap();

    let first = products::delete_product(State(state.clone()), Path(id))
        .await
        .unwrap()
        .into_response();
    let second = products::delete_product(State(state), Path(id))
        .await
        .err()
        .unwrap();

    assert_eq!(first.status(), StatusCode::NO_CONTENT);
    assert_eq!(second.into_response().status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn report_products_lists_counts_per_warehouse() {
    let state = AppState::in_memory();
    let central = add_warehouse(&state, "Central").await.unwrap();
    add_warehouse(&state, "Norte").await.unwrap();
    add_product(&state, "Arroz", "AR-1", money(500), central).await.unwrap();

    let response = warehouses::get_product_report(
        State(state),
        Query(ReportQuery { ids: Some("2,1".into()) }),
    )
    .await
    .unwrap()
    .into_response();

    let body = body_json(response).await;
    assert_eq!(
        body,
        serde_json::json!([
            { "warehouseName": "Central", "productCount": 1 },
            { "warehouseName": "Norte", "productCount": 0 },
        ])
    );
}

#[tokio::test]
async fn recompute_totals_reports_how_many_invoices_changed() {
    let state = AppState::in_memory();
    let c = add_customer(&state, "Ana", 1).await.unwrap();
    add_invoice(&state, c, money(100)).await.unwrap();

    let response = invoices::recompute_totals(State(state))
        .await
        .unwrap()
        .into_response();

    assert_eq!(body_json(response).await["updated"], 1);
}
