// src/db/memory.rs
//
// Backend em memória: mesmas regras do Postgres (ids sequenciais, code_value
// único, CHECKs e chaves estrangeiras do schema, NotFound em update/delete)
// e agregações via services::aggregation.

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::{
    common::error::AppError,
    db::contracts::{
        CustomerRepository, InvoiceRepository, ProductRepository, SaleRepository, WarehouseRepository,
    },
    models::{
        customer::{Customer, CustomerAmount, TotalByCondition},
        invoice::Invoice,
        product::{Product, ProductSales},
        sale::Sale,
        warehouse::{Warehouse, WarehouseReportProducts},
    },
    services::aggregation,
};

/// Uma "tabela": linhas por id + a sequência do SERIAL.
/// A sequência nunca volta atrás, nem depois de um delete.
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i32, T>,
    last_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

/// Linha que recebe o id gerado na inserção.
trait Identified {
    fn set_id(&mut self, id: i32);
}

macro_rules! identified {
    ($($entity:ty),+) => {
        $(impl Identified for $entity {
            fn set_id(&mut self, id: i32) {
                self.id = id;
            }
        })+
    };
}

identified!(Customer, Invoice, Product, Sale, Warehouse);

impl<T: Clone + Identified> Table<T> {
    /// Grava a linha com o próximo id da sequência e o devolve no próprio `row`.
    fn insert(&mut self, row: &mut T) {
        self.last_id += 1;
        row.set_id(self.last_id);
        self.rows.insert(self.last_id, row.clone());
    }

    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }
}

#[derive(Debug, Default)]
struct Tables {
    customers: Table<Customer>,
    invoices: Table<Invoice>,
    products: Table<Product>,
    sales: Table<Sale>,
    warehouses: Table<Warehouse>,
}

/// Falha com o nome da restrição, como o Postgres faria.
fn check(ok: bool, constraint: &str) -> Result<(), AppError> {
    if ok {
        Ok(())
    } else {
        Err(AppError::constraint_violation(constraint))
    }
}

impl Tables {
    fn code_value_taken(&self, code_value: &str, except_id: Option<i32>) -> bool {
        self.products
            .rows
            .values()
            .any(|p| p.code_value == code_value && Some(p.id) != except_id)
    }

    fn check_product(&self, product: &Product, except_id: Option<i32>) -> Result<(), AppError> {
        check(product.price >= Decimal::ZERO, "products_price_check")?;
        check(
            self.warehouses.rows.contains_key(&product.warehouse_id),
            "products_warehouse_id_fkey",
        )?;
        if self.code_value_taken(&product.code_value, except_id) {
            return Err(AppError::DuplicateKey("products_code_value_key".into()));
        }
        Ok(())
    }

    fn check_invoice(&self, invoice: &Invoice) -> Result<(), AppError> {
        check(invoice.total >= Decimal::ZERO, "invoices_total_check")?;
        check(
            self.customers.rows.contains_key(&invoice.customer_id),
            "invoices_customer_id_fkey",
        )
    }

    fn check_sale(&self, sale: &Sale) -> Result<(), AppError> {
        check(self.products.rows.contains_key(&sale.product_id), "sales_product_id_fkey")?;
        check(self.invoices.rows.contains_key(&sale.invoice_id), "sales_invoice_id_fkey")
    }
}

/// Clonar o store compartilha os mesmos dados.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Customer>, AppError> {
        Ok(self.tables.read().await.customers.all())
    }

    async fn save(&self, customer: &mut Customer) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        tables.customers.insert(customer);
        Ok(())
    }

    async fn total_by_condition(&self) -> Result<Vec<TotalByCondition>, AppError> {
        let tables = self.tables.read().await;
        aggregation::total_by_condition(tables.customers.rows.values(), tables.invoices.rows.values())
    }

    async fn top_active_customers(&self, limit: u32) -> Result<Vec<CustomerAmount>, AppError> {
        let tables = self.tables.read().await;
        aggregation::top_active_customers(
            tables.customers.rows.values(),
            tables.invoices.rows.values(),
            limit,
        )
    }
}

#[async_trait]
impl InvoiceRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Invoice>, AppError> {
        Ok(self.tables.read().await.invoices.all())
    }

    async fn save(&self, invoice: &mut Invoice) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        tables.check_invoice(invoice)?;
        tables.invoices.insert(invoice);
        Ok(())
    }

    async fn update_totals(&self) -> Result<u64, AppError> {
        let mut tables = self.tables.write().await;
        let totals = aggregation::invoice_totals(
            tables.invoices.rows.values(),
            tables.sales.rows.values(),
            tables.products.rows.values(),
        )?;

        let mut updated = 0;
        for (id, total) in totals {
            if let Some(invoice) = tables.invoices.rows.get_mut(&id) {
                invoice.total = total;
                updated += 1;
            }
        }
        Ok(updated)
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.tables.read().await.products.all())
    }

    async fn find_by_id(&self, id: i32) -> Result<Product, AppError> {
        self.tables
            .read()
            .await
            .products
            .rows
            .get(&id)
            .cloned()
            .ok_or(AppError::NotFound("produto"))
    }

    async fn save(&self, product: &mut Product) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        tables.check_product(product, None)?;

        tables.products.insert(product);
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        if !tables.products.rows.contains_key(&product.id) {
            return Err(AppError::NotFound("produto"));
        }
        tables.check_product(product, Some(product.id))?;

        tables.products.rows.insert(product.id, product.clone());
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        if !tables.products.rows.contains_key(&id) {
            return Err(AppError::NotFound("produto"));
        }
        // Produto com vendas continua referenciado
        check(
            !tables.sales.rows.values().any(|s| s.product_id == id),
            "sales_product_id_fkey",
        )?;

        tables.products.rows.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl SaleRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Sale>, AppError> {
        Ok(self.tables.read().await.sales.all())
    }

    async fn save(&self, sale: &mut Sale) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        tables.check_sale(sale)?;
        tables.sales.insert(sale);
        Ok(())
    }

    async fn top_sold_products(&self, limit: u32) -> Result<Vec<ProductSales>, AppError> {
        let tables = self.tables.read().await;
        Ok(aggregation::top_sold_products(
            tables.products.rows.values(),
            tables.sales.rows.values(),
            limit,
        ))
    }
}

#[async_trait]
impl WarehouseRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Warehouse>, AppError> {
        Ok(self.tables.read().await.warehouses.all())
    }

    async fn find_by_id(&self, id: i32) -> Result<Warehouse, AppError> {
        self.tables
            .read()
            .await
            .warehouses
            .rows
            .get(&id)
            .cloned()
            .ok_or(AppError::NotFound("armazém"))
    }

    async fn save(&self, warehouse: &mut Warehouse) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        tables.warehouses.insert(warehouse);
        Ok(())
    }

    async fn product_report(&self, ids: &[i32]) -> Result<Vec<WarehouseReportProducts>, AppError> {
        let tables = self.tables.read().await;
        Ok(aggregation::warehouse_product_report(
            tables.warehouses.rows.values(),
            tables.products.rows.values(),
            ids,
        ))
    }
}
