// tests/support/mod.rs
//
// Montagem de dados compartilhada pelos testes de integração.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use mercado::{
    common::error::AppError,
    config::AppState,
    models::{
        customer::Customer, invoice::Invoice, product::Product, sale::Sale, warehouse::Warehouse,
    },
};

pub fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

pub fn at(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, day)
        .and_then(|d| d.and_hms_opt(10, 0, 0))
        .unwrap()
}

pub fn warehouse(name: &str) -> Warehouse {
    Warehouse {
        id: 0,
        name: name.into(),
        address: "Rua das Flores, 10".into(),
        telephone: "4555-0000".into(),
        capacity: 100,
    }
}

pub fn product(name: &str, code_value: &str, price: Decimal, warehouse_id: i32) -> Product {
    Product {
        id: 0,
        name: name.into(),
        quantity: 10,
        code_value: code_value.into(),
        is_published: true,
        expiration: NaiveDate::from_ymd_opt(2030, 12, 31).unwrap(),
        price,
        warehouse_id,
    }
}

pub async fn add_warehouse(state: &AppState, name: &str) -> Result<i32, AppError> {
    let mut w = warehouse(name);
    state.warehouse_service.save(&mut w).await?;
    Ok(w.id)
}

pub async fn add_customer(state: &AppState, first: &str, condition: i32) -> Result<i32, AppError> {
    let mut c = Customer::new(first, "Silva", condition);
    state.customer_service.save(&mut c).await?;
    Ok(c.id)
}

pub async fn add_invoice(state: &AppState, customer_id: i32, total: Decimal) -> Result<i32, AppError> {
    let mut i = Invoice {
        id: 0,
        datetime: at(1),
        total,
        customer_id,
    };
    state.invoice_service.save(&mut i).await?;
    Ok(i.id)
}

pub async fn add_product(
    state: &AppState,
    name: &str,
    code_value: &str,
    price: Decimal,
    warehouse_id: i32,
) -> Result<i32, AppError> {
    let mut p = product(name, code_value, price, warehouse_id);
    state.product_service.save(&mut p).await?;
    Ok(p.id)
}

pub async fn add_sale(
    state: &AppState,
    product_id: i32,
    invoice_id: i32,
    quantity: i32,
) -> Result<i32, AppError> {
    let mut s = Sale {
        id: 0,
        quantity,
        product_id,
        invoice_id,
    };
    state.sale_service.save(&mut s).await?;
    Ok(s.id)
}
