// src/db/sale_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::contracts::SaleRepository,
    models::{product::ProductSales, sale::Sale},
};

#[derive(Clone)]
pub struct PgSaleRepository {
    pool: PgPool,
}

impl PgSaleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SaleRepository for PgSaleRepository {
    async fn find_all(&self) -> Result<Vec<Sale>, AppError> {
        let sales = sqlx::query_as::<_, Sale>(
            "SELECT id, quantity, product_id, invoice_id FROM sales",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    async fn save(&self, sale: &mut Sale) -> Result<(), AppError> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO sales (quantity, product_id, invoice_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(sale.quantity)
        .bind(sale.product_id)
        .bind(sale.invoice_id)
        .fetch_one(&self.pool)
        .await?;

        sale.id = id;
        Ok(())
    }

    async fn top_sold_products(&self, limit: u32) -> Result<Vec<ProductSales>, AppError> {
        let top = sqlx::query_as::<_, ProductSales>(
            r#"
            SELECT p.name AS product_description, SUM(s.quantity)::BIGINT AS sales
            FROM sales s
            INNER JOIN products p ON p.id = s.product_id
            GROUP BY p.id, p.name
            ORDER BY sales DESC, p.id ASC
            LIMIT $1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(top)
    }
}
