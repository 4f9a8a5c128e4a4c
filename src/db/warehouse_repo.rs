// src/db/warehouse_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::contracts::WarehouseRepository,
    models::warehouse::{Warehouse, WarehouseReportProducts},
};

#[derive(Clone)]
pub struct PgWarehouseRepository {
    pool: PgPool,
}

impl PgWarehouseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WarehouseRepository for PgWarehouseRepository {
    async fn find_all(&self) -> Result<Vec<Warehouse>, AppError> {
        let warehouses = sqlx::query_as::<_, Warehouse>(
            "SELECT id, name, address, telephone, capacity FROM warehouses",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(warehouses)
    }

    async fn find_by_id(&self, id: i32) -> Result<Warehouse, AppError> {
        sqlx::query_as::<_, Warehouse>(
            "SELECT id, name, address, telephone, capacity FROM warehouses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("armazém"))
    }

    async fn save(&self, warehouse: &mut Warehouse) -> Result<(), AppError> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO warehouses (name, address, telephone, capacity)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&warehouse.name)
        .bind(&warehouse.address)
        .bind(&warehouse.telephone)
        .bind(warehouse.capacity)
        .fetch_one(&self.pool)
        .await?;

        warehouse.id = id;
        Ok(())
    }

    async fn product_report(&self, ids: &[i32]) -> Result<Vec<WarehouseReportProducts>, AppError> {
        // LEFT JOIN: armazém sem produtos aparece com contagem 0.
        // Lista de ids vazia = sem filtro.
        let report = sqlx::query_as::<_, WarehouseReportProducts>(
            r#"
            SELECT w.name AS warehouse_name, COUNT(p.id) AS product_count
            FROM warehouses w
            LEFT JOIN products p ON p.warehouse_id = w.id
            WHERE cardinality($1::INT4[]) = 0 OR w.id = ANY($1)
            GROUP BY w.id, w.name
            ORDER BY w.id ASC
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(report)
    }
}
