// src/db/product_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{common::error::AppError, db::contracts::ProductRepository, models::product::Product};

const PRODUCT: &str = "produto";

#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, quantity, code_value, is_published, expiration, price, warehouse_id
            FROM products
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn find_by_id(&self, id: i32) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, quantity, code_value, is_published, expiration, price, warehouse_id
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound(PRODUCT))
    }

    async fn save(&self, product: &mut Product) -> Result<(), AppError> {
        // Violação do UNIQUE(code_value) vira AppError::DuplicateKey no `?`
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO products (name, quantity, code_value, is_published, expiration, price, warehouse_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&product.name)
        .bind(product.quantity)
        .bind(&product.code_value)
        .bind(product.is_published)
        .bind(product.expiration)
        .bind(product.price)
        .bind(product.warehouse_id)
        .fetch_one(&self.pool)
        .await?;

        product.id = id;
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $1, quantity = $2, code_value = $3, is_published = $4,
                expiration = $5, price = $6, warehouse_id = $7
            WHERE id = $8
            "#,
        )
        .bind(&product.name)
        .bind(product.quantity)
        .bind(&product.code_value)
        .bind(product.is_published)
        .bind(product.expiration)
        .bind(product.price)
        .bind(product.warehouse_id)
        .bind(product.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(PRODUCT));
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(PRODUCT));
        }
        Ok(())
    }
}
