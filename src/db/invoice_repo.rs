// src/db/invoice_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{common::error::AppError, db::contracts::InvoiceRepository, models::invoice::Invoice};

#[derive(Clone)]
pub struct PgInvoiceRepository {
    pool: PgPool,
}

impl PgInvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvoiceRepository for PgInvoiceRepository {
    async fn find_all(&self) -> Result<Vec<Invoice>, AppError> {
        let invoices = sqlx::query_as::<_, Invoice>(
            "SELECT id, datetime, total, customer_id FROM invoices",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(invoices)
    }

    async fn save(&self, invoice: &mut Invoice) -> Result<(), AppError> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO invoices (datetime, total, customer_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(invoice.datetime)
        .bind(invoice.total)
        .bind(invoice.customer_id)
        .fetch_one(&self.pool)
        .await?;

        invoice.id = id;
        Ok(())
    }

    async fn update_totals(&self) -> Result<u64, AppError> {
        // Um único UPDATE: cada fatura recebe a soma (quantidade × preço)
        // das suas vendas, ou 0 quando não tem nenhuma.
        let result = sqlx::query(
            r#"
            UPDATE invoices i
            SET total = COALESCE((
                SELECT ROUND(SUM(s.quantity * p.price), 2)
                FROM sales s
                INNER JOIN products p ON p.id = s.product_id
                WHERE s.invoice_id = i.id
            ), 0)
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
