// src/services/aggregation.rs
//
// Agregações (join fato -> dimensão + group by) calculadas em memória.
// O backend Postgres faz o mesmo em SQL; aqui valem as mesmas regras:
// join interno, arredondamento único no valor final e desempate pelo id.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use crate::{
    common::{error::AppError, money::round_money},
    models::{
        customer::{Customer, CustomerAmount, TotalByCondition},
        invoice::Invoice,
        product::{Product, ProductSales},
        sale::Sale,
        warehouse::{Warehouse, WarehouseReportProducts},
    },
};

/// Soma com `Decimal` estoura em ~7.9e28; vira erro em vez de pânico.
fn checked_sum(acc: &mut Decimal, value: Decimal) -> Result<(), AppError> {
    *acc = acc.checked_add(value).ok_or_else(overflow)?;
    Ok(())
}

fn overflow() -> AppError {
    AppError::InternalServerError(anyhow::anyhow!("Estouro numérico ao agregar valores monetários"))
}

/// Ordena os grupos `(id, valor)` do maior valor para o menor (empate: id
/// crescente) e mantém no máximo `limit`.
fn rank_top<V: Ord>(groups: impl IntoIterator<Item = (i32, V)>, limit: u32) -> Vec<(i32, V)> {
    let mut ranked: Vec<(i32, V)> = groups.into_iter().collect();
    ranked.sort_by(|(a_id, a), (b_id, b)| b.cmp(a).then_with(|| a_id.cmp(b_id)));
    ranked.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    ranked
}

/// Soma das faturas por condição do cliente, em ordem crescente de condição.
/// Condições sem nenhuma fatura não aparecem.
pub fn total_by_condition<'a>(
    customers: impl IntoIterator<Item = &'a Customer>,
    invoices: impl IntoIterator<Item = &'a Invoice>,
) -> Result<Vec<TotalByCondition>, AppError> {
    let condition_of: HashMap<i32, i32> = customers
        .into_iter()
        .map(|c| (c.id, c.condition))
        .collect();

    let mut totals: BTreeMap<i32, Decimal> = BTreeMap::new();
    for invoice in invoices {
        if let Some(&condition) = condition_of.get(&invoice.customer_id) {
            checked_sum(totals.entry(condition).or_default(), invoice.total)?;
        }
    }

    Ok(totals
        .into_iter()
        .map(|(condition, total)| TotalByCondition {
            condition,
            total: round_money(total),
        })
        .collect())
}

/// Ranking de clientes por total gasto.
pub fn top_active_customers<'a>(
    customers: impl IntoIterator<Item = &'a Customer>,
    invoices: impl IntoIterator<Item = &'a Invoice>,
    limit: u32,
) -> Result<Vec<CustomerAmount>, AppError> {
    let by_id: HashMap<i32, &Customer> = customers.into_iter().map(|c| (c.id, c)).collect();

    let mut spent: HashMap<i32, Decimal> = HashMap::new();
    for invoice in invoices {
        if by_id.contains_key(&invoice.customer_id) {
            checked_sum(spent.entry(invoice.customer_id).or_default(), invoice.total)?;
        }
    }

    Ok(rank_top(spent, limit)
        .into_iter()
        .filter_map(|(id, amount)| {
            by_id.get(&id).map(|c| CustomerAmount {
                first_name: c.first_name.clone(),
                last_name: c.last_name.clone(),
                amount: round_money(amount),
            })
        })
        .collect())
}

/// Ranking de produtos pela soma das quantidades vendidas.
pub fn top_sold_products<'a>(
    products: impl IntoIterator<Item = &'a Product>,
    sales: impl IntoIterator<Item = &'a Sale>,
    limit: u32,
) -> Vec<ProductSales> {
    let by_id: HashMap<i32, &Product> = products.into_iter().map(|p| (p.id, p)).collect();

    let mut sold: HashMap<i32, i64> = HashMap::new();
    for sale in sales {
        if by_id.contains_key(&sale.product_id) {
            *sold.entry(sale.product_id).or_default() += i64::from(sale.quantity);
        }
    }

    rank_top(sold, limit)
        .into_iter()
        .filter_map(|(id, sales)| {
            by_id.get(&id).map(|p| ProductSales {
                product_description: p.name.clone(),
                sales,
            })
        })
        .collect()
}

/// Contagem de produtos por armazém (left join: armazém vazio conta 0).
/// Com `ids` vazio reporta todos; ids inexistentes são ignorados.
pub fn warehouse_product_report<'a>(
    warehouses: impl IntoIterator<Item = &'a Warehouse>,
    products: impl IntoIterator<Item = &'a Product>,
    ids: &[i32],
) -> Vec<WarehouseReportProducts> {
    let mut counts: HashMap<i32, i64> = HashMap::new();
    for product in products {
        *counts.entry(product.warehouse_id).or_default() += 1;
    }

    let mut selected: Vec<&Warehouse> = warehouses
        .into_iter()
        .filter(|w| ids.is_empty() || ids.contains(&w.id))
        .collect();
    selected.sort_by_key(|w| w.id);
    selected.dedup_by_key(|w| w.id);

    selected
        .into_iter()
        .map(|w| WarehouseReportProducts {
            warehouse_name: w.name.clone(),
            product_count: counts.get(&w.id).copied().unwrap_or(0),
        })
        .collect()
}

/// Novo total de cada fatura: soma de quantidade × preço das suas vendas,
/// arredondada a 2 casas. Fatura sem vendas fica com total 0.
pub fn invoice_totals<'a>(
    invoices: impl IntoIterator<Item = &'a Invoice>,
    sales: impl IntoIterator<Item = &'a Sale>,
    products: impl IntoIterator<Item = &'a Product>,
) -> Result<Vec<(i32, Decimal)>, AppError> {
    let price_of: HashMap<i32, Decimal> = products.into_iter().map(|p| (p.id, p.price)).collect();

    let mut totals: HashMap<i32, Decimal> = HashMap::new();
    for sale in sales {
        if let Some(price) = price_of.get(&sale.product_id) {
            let line = Decimal::from(sale.quantity)
                .checked_mul(*price)
                .ok_or_else(overflow)?;
            checked_sum(totals.entry(sale.invoice_id).or_default(), line)?;
        }
    }

    Ok(invoices
        .into_iter()
        .map(|i| {
            let total = totals.get(&i.id).copied().unwrap_or(Decimal::ZERO);
            (i.id, round_money(total))
        })
        .collect())
}
