// tests/memory_repositories.rs
//
// Contratos dos repositórios exercitados pelos serviços, sobre o backend em memória.

mod support;

use rstest::{fixture, rstest};

use mercado::{
    common::error::{AppError, ErrorKind},
    config::AppState,
    models::customer::{CustomerAmount, TotalByCondition},
    models::product::ProductSales,
    models::warehouse::WarehouseReportProducts,
};
use support::*;

#[fixture]
fn state() -> AppState {
    AppState::in_memory()
}

/// Clientes 1 (ativo), 2 (inativo), 3 (ativo), uma fatura para cada.
async fn seed_customers(state: &AppState, totals: [i64; 3]) -> Result<(), AppError> {
    let ana = add_customer(state, "Ana", 1).await?;
    let bruno = add_customer(state, "Bruno", 0).await?;
    let carla = add_customer(state, "Carla", 1).await?;
    for (customer_id, cents) in [ana, bruno, carla].into_iter().zip(totals) {
        add_invoice(state, customer_id, money(cents)).await?;
    }
    Ok(())
}

#[rstest]
#[tokio::test]
async fn find_all_on_empty_store_is_empty(state: AppState) {
    assert!(state.customer_service.find_all().await.unwrap().is_empty());
    assert!(state.invoice_service.find_all().await.unwrap().is_empty());
    assert!(state.product_service.find_all().await.unwrap().is_empty());
    assert!(state.sale_service.find_all().await.unwrap().is_empty());
    assert!(state.warehouse_service.find_all().await.unwrap().is_empty());
}

#[rstest]
#[tokio::test]
async fn totals_are_grouped_by_condition(state: AppState) {
    seed_customers(&state, [10000, 5000, 5000]).await.unwrap();

    let totals = state.customer_service.total_by_condition().await.unwrap();

    assert_eq!(
        totals,
        vec![
            TotalByCondition { condition: 0, total: money(5000) },
            TotalByCondition { condition: 1, total: money(15000) },
        ]
    );
}

#[rstest]
#[tokio::test]
async fn condition_without_invoices_has_no_row(state: AppState) {
    add_customer(&state, "Sem Compras", 7).await.unwrap();
    seed_customers(&state, [100, 200, 300]).await.unwrap();

    let totals = state.customer_service.total_by_condition().await.unwrap();

    assert!(totals.iter().all(|t| t.condition != 7));
}

#[rstest]
#[case(2, vec![("Ana", 10000), ("Bruno", 5000)])]
#[case(4, vec![("Ana", 10000), ("Bruno", 5000), ("Carla", 1000)])]
#[case(0, vec![])]
#[tokio::test]
async fn top_active_customers_are_ranked_by_spend(
    state: AppState,
    #[case] limit: u32,
    #[case] expected: Vec<(&str, i64)>,
) {
    seed_customers(&state, [10000, 5000, 1000]).await.unwrap();

    let top = state.customer_service.top_active_customers(limit).await.unwrap();

    let expected: Vec<CustomerAmount> = expected
        .into_iter()
        .map(|(first, cents)| CustomerAmount {
            first_name: first.into(),
            last_name: "Silva".into(),
            amount: money(cents),
        })
        .collect();
    assert_eq!(top, expected);
}

#[rstest]
#[tokio::test]
async fn customer_amount_is_rounded_after_the_sum(state: AppState) {
    let ana = add_customer(&state, "Ana", 1).await.unwrap();
    // 3 × 0.335 = 1.005 → 1.01 (arredondar cada uma daria 1.02)
    for _ in 0..3 {
        add_invoice(&state, ana, rust_decimal::Decimal::new(335, 3)).await.unwrap();
    }

    let top = state.customer_service.top_active_customers(1).await.unwrap();

    assert_eq!(top[0].amount, money(101));
}

#[rstest]
#[tokio::test]
async fn top_sold_products_sum_quantities(state: AppState) {
    let w = add_warehouse(&state, "Central").await.unwrap();
    let c = add_customer(&state, "Ana", 1).await.unwrap();
    let inv = add_invoice(&state, c, money(0)).await.unwrap();
    let a = add_product(&state, "A", "A-1", money(100), w).await.unwrap();
    let b = add_product(&state, "B", "B-1", money(100), w).await.unwrap();
    let p_c = add_product(&state, "C", "C-1", money(100), w).await.unwrap();
    for (product_id, quantity) in [(a, 1), (b, 2), (p_c, 3), (p_c, 4)] {
        add_sale(&state, product_id, inv, quantity).await.unwrap();
    }

    let top = state.sale_service.top_sold_products(2).await.unwrap();

    assert_eq!(
        top,
        vec![
            ProductSales { product_description: "C".into(), sales: 7 },
            ProductSales { product_description: "B".into(), sales: 2 },
        ]
    );
}

#[rstest]
#[tokio::test]
async fn warehouse_report_keeps_empty_warehouses(state: AppState) {
    let full = add_warehouse(&state, "Cheio").await.unwrap();
    let empty = add_warehouse(&state, "Vazio").await.unwrap();
    add_product(&state, "Arroz", "AR-1", money(500), full).await.unwrap();
    add_product(&state, "Feijão", "FE-1", money(700), full).await.unwrap();

    let all = state.warehouse_service.product_report(&[]).await.unwrap();
    let only_empty = state.warehouse_service.product_report(&[empty, empty, 99]).await.unwrap();

    assert_eq!(
        all,
        vec![
            WarehouseReportProducts { warehouse_name: "Cheio".into(), product_count: 2 },
            WarehouseReportProducts { warehouse_name: "Vazio".into(), product_count: 0 },
        ]
    );
    assert_eq!(
        only_empty,
        vec![WarehouseReportProducts { warehouse_name: "Vazio".into(), product_count: 0 }]
    );
}

#[rstest]
#[tokio::test]
async fn update_or_save_replaces_an_existing_product(state: AppState) {
    let w = add_warehouse(&state, "Central").await.unwrap();
    let id = add_product(&state, "Arroz", "AR-1", money(500), w).await.unwrap();

    let mut changed = product("Arroz Integral", "AR-1", money(650), w);
    changed.id = id;
    state.product_service.update_or_save(&mut changed).await.unwrap();

    assert_eq!(changed.id, id);
    assert_eq!(state.product_service.find_by_id(id).await.unwrap(), changed);
    assert_eq!(state.product_service.find_all().await.unwrap().len(), 1);
}

#[rstest]
#[tokio::test]
async fn update_or_save_creates_when_missing(state: AppState) {
    let w = add_warehouse(&state, "Central").await.unwrap();
    add_product(&state, "Arroz", "AR-1", money(500), w).await.unwrap();

    let mut fresh = product("Café", "CA-1", money(1590), w);
    fresh.id = 42;
    state.product_service.update_or_save(&mut fresh).await.unwrap();

    assert_eq!(fresh.id, 2);
    assert_eq!(state.product_service.find_by_id(2).await.unwrap(), fresh);
}

#[rstest]
#[tokio::test]
async fn update_or_save_does_not_hide_other_errors(state: AppState) {
    let w = add_warehouse(&state, "Central").await.unwrap();
    add_product(&state, "Arroz", "AR-1", money(500), w).await.unwrap();
    let id = add_product(&state, "Feijão", "FE-1", money(700), w).await.unwrap();

    let mut clash = product("Feijão", "AR-1", money(700), w);
    clash.id = id;
    let err = state.product_service.update_or_save(&mut clash).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DuplicateKey);
    assert_eq!(state.product_service.find_all().await.unwrap().len(), 2);
}

#[rstest]
#[tokio::test]
async fn rows_breaking_the_schema_are_never_stored(state: AppState) {
    let c = add_customer(&state, "Ana", 1).await.unwrap();

    let negative_price = add_product(&state, "Arroz", "AR-1", money(-500), 77).await.unwrap_err();
    let negative_total = add_invoice(&state, c, money(-1000)).await.unwrap_err();
    let unknown_customer = add_invoice(&state, 999, money(1000)).await.unwrap_err();
    let unknown_refs = add_sale(&state, 555, 444, 3).await.unwrap_err();

    for err in [negative_price, negative_total, unknown_customer, unknown_refs] {
        assert!(matches!(err, AppError::BadRequest(_)), "{:?}", err);
        assert_eq!(err.kind(), ErrorKind::Other);
    }
    assert!(state.product_service.find_all().await.unwrap().is_empty());
    assert!(state.invoice_service.find_all().await.unwrap().is_empty());
    assert!(state.sale_service.find_all().await.unwrap().is_empty());
    assert!(state.customer_service.total_by_condition().await.unwrap().is_empty());
}

#[rstest]
#[tokio::test]
async fn top_sold_ties_are_broken_by_product_id(state: AppState) {
    let w = add_warehouse(&state, "Central").await.unwrap();
    let c = add_customer(&state, "Ana", 1).await.unwrap();
    let inv = add_invoice(&state, c, money(0)).await.unwrap();
    let first = add_product(&state, "Primeiro", "P-1", money(100), w).await.unwrap();
    let second = add_product(&state, "Segundo", "P-2", money(100), w).await.unwrap();
    // o de id maior vende antes, mas o empate é decidido pelo id
    add_sale(&state, second, inv, 5).await.unwrap();
    add_sale(&state, first, inv, 2).await.unwrap();
    add_sale(&state, first, inv, 3).await.unwrap();

    let top = state.sale_service.top_sold_products(5).await.unwrap();

    assert_eq!(
        top,
        vec![
            ProductSales { product_description: "Primeiro".into(), sales: 5 },
            ProductSales { product_description: "Segundo".into(), sales: 5 },
        ]
    );
}

#[rstest]
#[tokio::test]
async fn delete_then_find_is_not_found(state: AppState) {
    let w = add_warehouse(&state, "Central").await.unwrap();
    let id = add_product(&state, "Arroz", "AR-1", money(500), w).await.unwrap();

    let missing = state.product_service.delete(id + 1).await.unwrap_err();
    state.product_service.delete(id).await.unwrap();
    let gone = state.product_service.find_by_id(id).await.unwrap_err();

    assert_eq!(missing.kind(), ErrorKind::NotFound);
    assert_eq!(gone.kind(), ErrorKind::NotFound);
}

#[rstest]
#[tokio::test]
async fn recompute_totals_uses_sales_prices(state: AppState) {
    let w = add_warehouse(&state, "Central").await.unwrap();
    let c = add_customer(&state, "Ana", 1).await.unwrap();
    let with_sales = add_invoice(&state, c, money(0)).await.unwrap();
    let without_sales = add_invoice(&state, c, money(999)).await.unwrap();
    let arroz = add_product(&state, "Arroz", "AR-1", money(550), w).await.unwrap();
    let cafe = add_product(&state, "Café", "CA-1", money(1599), w).await.unwrap();
    add_sale(&state, arroz, with_sales, 2).await.unwrap();
    add_sale(&state, cafe, with_sales, 3).await.unwrap();

    let updated = state.invoice_service.update_totals().await.unwrap();

    let invoices = state.invoice_service.find_all().await.unwrap();
    assert_eq!(updated, 2);
    assert_eq!(invoices[(with_sales - 1) as usize].total, money(5897));
    assert_eq!(invoices[(without_sales - 1) as usize].total, money(0));
}
