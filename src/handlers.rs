// src/handlers.rs

use axum::{
    routing::{get, post},
    Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::config::AppState;

pub mod customers;
pub mod invoices;
pub mod products;
pub mod sales;
pub mod warehouses;

// ---
// Validação Customizada
// ---
pub(crate) fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

fn default_limit() -> u32 {
    5
}

/// `?limit=n` dos rankings.
#[derive(Debug, Deserialize, Validate)]
pub struct LimitQuery {
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 1000, message = "O limite deve estar entre 1 e 1000."))]
    pub limit: u32,
}

impl Default for LimitQuery {
    fn default() -> Self {
        Self { limit: default_limit() }
    }
}

/// Todas as rotas da API.
pub fn router(app_state: AppState) -> Router {
    let customer_routes = Router::new()
        .route("/"
               ,post(customers::create_customer)
               .get(customers::get_all_customers)
        )
        .route("/totals-by-condition", get(customers::get_totals_by_condition))
        .route("/top-active", get(customers::get_top_active_customers));

    let invoice_routes = Router::new()
        .route("/"
               ,post(invoices::create_invoice)
               .get(invoices::get_all_invoices)
        )
        .route("/recompute-totals", post(invoices::recompute_totals));

    let product_routes = Router::new()
        .route("/"
               ,post(products::create_product)
               .get(products::get_all_products)
        )
        .route("/top-sold", get(products::get_top_sold_products))
        .route("/{id}"
               ,get(products::get_product)
               .put(products::update_or_create_product)
               .patch(products::patch_product)
               .delete(products::delete_product)
        );

    let sale_routes = Router::new()
        .route("/"
               ,post(sales::create_sale)
               .get(sales::get_all_sales)
        );

    let warehouse_routes = Router::new()
        .route("/"
               ,post(warehouses::create_warehouse)
               .get(warehouses::get_all_warehouses)
        )
        .route("/reportProducts", get(warehouses::get_product_report))
        .route("/{id}", get(warehouses::get_warehouse));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/customers", customer_routes)
        .nest("/api/invoices", invoice_routes)
        .nest("/api/products", product_routes)
        .nest("/api/sales", sale_routes)
        .nest("/api/warehouses", warehouse_routes)
        .with_state(app_state)
}
