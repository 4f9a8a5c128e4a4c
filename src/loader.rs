// src/loader.rs
//
// Carga inicial a partir de arquivos JSON (um array por entidade).
// Cada registro vira um `save` no repositório; o id do arquivo é ignorado,
// quem atribui é o armazenamento.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Deserialize, Deserializer};

use crate::{
    config::AppState,
    models::{
        customer::Customer, invoice::Invoice, product::Product, sale::Sale, warehouse::Warehouse,
    },
};

pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn deserialize_datetime<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, DATETIME_FORMAT).map_err(serde::de::Error::custom)
}

// ---
// Registros como aparecem nos arquivos
// ---
#[derive(Debug, Deserialize)]
struct WarehouseRecord {
    name: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    telephone: String,
    #[serde(default)]
    capacity: i32,
}

#[derive(Debug, Deserialize)]
struct CustomerRecord {
    first_name: String,
    last_name: String,
    #[serde(default)]
    condition: i32,
}

#[derive(Debug, Deserialize)]
struct ProductRecord {
    #[serde(alias = "description")]
    name: String,
    #[serde(default)]
    quantity: i32,
    code_value: String,
    #[serde(default)]
    is_published: bool,
    expiration: NaiveDate,
    price: Decimal,
    warehouse_id: i32,
}

#[derive(Debug, Deserialize)]
struct InvoiceRecord {
    #[serde(deserialize_with = "deserialize_datetime")]
    datetime: NaiveDateTime,
    #[serde(default)]
    total: Decimal,
    customer_id: i32,
}

#[derive(Debug, Deserialize)]
struct SaleRecord {
    quantity: i32,
    product_id: i32,
    invoice_id: i32,
}

/// Quantos registros de cada entidade foram gravados.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub warehouses: usize,
    pub customers: usize,
    pub products: usize,
    pub invoices: usize,
    pub sales: usize,
}

pub struct JsonLoader {
    dir: PathBuf,
}

impl JsonLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Grava tudo na ordem das chaves estrangeiras e para no primeiro erro.
    pub async fn migrate(&self, state: &AppState) -> anyhow::Result<LoadSummary> {
        let mut summary = LoadSummary::default();

        for record in self.read::<WarehouseRecord>("warehouses.json").await? {
            let mut warehouse = Warehouse {
                id: 0,
                name: record.name,
                address: record.address,
                telephone: record.telephone,
                capacity: record.capacity,
            };
            state
                .warehouse_service
                .save(&mut warehouse)
                .await
                .with_context(|| format!("Falha ao gravar o armazém '{}'", warehouse.name))?;
            summary.warehouses += 1;
        }
        tracing::info!(count = summary.warehouses, "Armazéns carregados");

        for record in self.read::<CustomerRecord>("customers.json").await? {
            let mut customer = Customer::new(record.first_name, record.last_name, record.condition);
            state
                .customer_service
                .save(&mut customer)
                .await
                .with_context(|| {
                    format!("Falha ao gravar o cliente '{} {}'", customer.first_name, customer.last_name)
                })?;
            summary.customers += 1;
        }
        tracing::info!(count = summary.customers, "Clientes carregados");

        for record in self.read::<ProductRecord>("products.json").await? {
            let mut product = Product {
                id: 0,
                name: record.name,
                quantity: record.quantity,
                code_value: record.code_value,
                is_published: record.is_published,
                expiration: record.expiration,
                price: record.price,
                warehouse_id: record.warehouse_id,
            };
            state
                .product_service
                .save(&mut product)
                .await
                .with_context(|| format!("Falha ao gravar o produto '{}'", product.code_value))?;
            summary.products += 1;
        }
        tracing::info!(count = summary.products, "Produtos carregados");

        for record in self.read::<InvoiceRecord>("invoices.json").await? {
            let mut invoice = Invoice {
                id: 0,
                datetime: record.datetime,
                total: record.total,
                customer_id: record.customer_id,
            };
            state
                .invoice_service
                .save(&mut invoice)
                .await
                .with_context(|| format!("Falha ao gravar a fatura de {}", invoice.datetime))?;
            summary.invoices += 1;
        }
        tracing::info!(count = summary.invoices, "Faturas carregadas");

        for record in self.read::<SaleRecord>("sales.json").await? {
            let mut sale = Sale {
                id: 0,
                quantity: record.quantity,
                product_id: record.product_id,
                invoice_id: record.invoice_id,
            };
            state
                .sale_service
                .save(&mut sale)
                .await
                .with_context(|| format!("Falha ao gravar a venda da fatura {}", sale.invoice_id))?;
            summary.sales += 1;
        }
        tracing::info!(count = summary.sales, "Vendas carregadas");

        Ok(summary)
    }

    /// Arquivo ausente = nada a carregar (com aviso).
    async fn read<T: DeserializeOwned>(&self, file_name: &str) -> anyhow::Result<Vec<T>> {
        let path = self.dir.join(file_name);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => parse_records(&path, &content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "Arquivo não encontrado, pulando");
                Ok(Vec::new())
            }
            Err(e) => Err(e).with_context(|| format!("Falha ao ler {}", path.display())),
        }
    }
}

fn parse_records<T: DeserializeOwned>(path: &Path, content: &str) -> anyhow::Result<Vec<T>> {
    serde_json::from_str(content).with_context(|| format!("JSON inválido em {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_description_is_accepted_as_name() {
        let records: Vec<ProductRecord> = parse_records(
            Path::new("products.json"),
            r#"[{"id": 9, "description": "Leite", "code_value": "L1",
                 "expiration": "2030-01-01", "price": 4.5, "warehouse_id": 1}]"#,
        )
        .unwrap();

        assert_eq!(records[0].name, "Leite");
        assert_eq!(records[0].quantity, 0);
        assert!(!records[0].is_published);
        assert_eq!(records[0].price, Decimal::new(45, 1));
    }

    #[test]
    fn invoice_datetime_uses_the_file_format() {
        let records: Vec<InvoiceRecord> = parse_records(
            Path::new("invoices.json"),
            r#"[{"datetime": "2022-03-01 17:45:10", "total": 10.0, "customer_id": 2}]"#,
        )
        .unwrap();

        assert_eq!(records[0].datetime.to_string(), "2022-03-01 17:45:10");

        let bad: anyhow::Result<Vec<InvoiceRecord>> = parse_records(
            Path::new("invoices.json"),
            r#"[{"datetime": "01/03/2022", "customer_id": 2}]"#,
        );
        assert!(bad.is_err());
    }
}
