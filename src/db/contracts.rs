// src/db/contracts.rs
//
// Contratos dos repositórios. Qualquer backend (Postgres, memória) implementa
// exatamente este conjunto de operações e é escolhido na montagem do AppState.

use async_trait::async_trait;

use crate::{
    common::error::{AppError, ErrorKind},
    models::{
        customer::{Customer, CustomerAmount, TotalByCondition},
        invoice::Invoice,
        product::{Product, ProductSales},
        sale::Sale,
        warehouse::{Warehouse, WarehouseReportProducts},
    },
};

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Todos os clientes. Lista vazia não é erro.
    async fn find_all(&self) -> Result<Vec<Customer>, AppError>;

    /// Insere e grava no `customer.id` o id gerado pelo banco.
    async fn save(&self, customer: &mut Customer) -> Result<(), AppError>;

    /// Soma das faturas agrupada por condição do cliente (2 casas).
    async fn total_by_condition(&self) -> Result<Vec<TotalByCondition>, AppError>;

    /// Os `limit` clientes que mais gastaram, do maior para o menor.
    async fn top_active_customers(&self, limit: u32) -> Result<Vec<CustomerAmount>, AppError>;
}

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Invoice>, AppError>;

    async fn save(&self, invoice: &mut Invoice) -> Result<(), AppError>;

    /// Recalcula o total de cada fatura a partir das suas vendas
    /// (quantidade × preço). Retorna quantas faturas foram atualizadas.
    async fn update_totals(&self) -> Result<u64, AppError>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Product>, AppError>;

    async fn find_by_id(&self, id: i32) -> Result<Product, AppError>;

    /// Falha com `DuplicateKey` se o `code_value` já existir.
    async fn save(&self, product: &mut Product) -> Result<(), AppError>;

    /// Nunca cria: `NotFound` se o id não existir.
    async fn update(&self, product: &Product) -> Result<(), AppError>;

    /// `NotFound` quando nenhuma linha foi apagada.
    async fn delete(&self, id: i32) -> Result<(), AppError>;

    /// Tenta `update`; só se a falha for `NotFound` cai para `save`,
    /// que atribui um id novo ao produto. Qualquer outro erro é devolvido.
    ///
    /// São duas idas ao banco sem transação: um DELETE concorrente entre
    /// as duas pode acontecer.
    async fn update_or_save(&self, product: &mut Product) -> Result<(), AppError> {
        match self.update(product).await {
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let requested_id = product.id;
                self.save(product).await?;
                tracing::debug!(
                    requested_id,
                    assigned_id = product.id,
                    "Produto inexistente, criado via update_or_save"
                );
                Ok(())
            }
            other => other,
        }
    }
}

#[async_trait]
pub trait SaleRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Sale>, AppError>;

    async fn save(&self, sale: &mut Sale) -> Result<(), AppError>;

    /// Os `limit` produtos com maior soma de quantidades vendidas.
    async fn top_sold_products(&self, limit: u32) -> Result<Vec<ProductSales>, AppError>;
}

#[async_trait]
pub trait WarehouseRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Warehouse>, AppError>;

    async fn find_by_id(&self, id: i32) -> Result<Warehouse, AppError>;

    async fn save(&self, warehouse: &mut Warehouse) -> Result<(), AppError>;

    /// Contagem de produtos por armazém, incluindo os vazios.
    /// `ids` vazio = todos os armazéns.
    async fn product_report(&self, ids: &[i32]) -> Result<Vec<WarehouseReportProducts>, AppError>;
}
