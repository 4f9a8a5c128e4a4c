// src/db/customer_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::{error::AppError, money::round_money},
    db::contracts::CustomerRepository,
    models::customer::{Customer, CustomerAmount, TotalByCondition},
};

#[derive(Clone)]
pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn find_all(&self) -> Result<Vec<Customer>, AppError> {
        let customers = sqlx::query_as::<_, Customer>(
            r#"SELECT id, first_name, last_name, "condition" FROM customers"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    async fn save(&self, customer: &mut Customer) -> Result<(), AppError> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO customers (first_name, last_name, "condition")
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(customer.condition)
        .fetch_one(&self.pool)
        .await?;

        customer.id = id;
        Ok(())
    }

    async fn total_by_condition(&self) -> Result<Vec<TotalByCondition>, AppError> {
        let rows = sqlx::query_as::<_, TotalByCondition>(
            r#"
            SELECT c."condition" AS "condition", SUM(i.total) AS total
            FROM customers c
            INNER JOIN invoices i ON i.customer_id = c.id
            GROUP BY c."condition"
            ORDER BY c."condition" ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        // Arredonda só o valor final do SUM
        Ok(rows
            .into_iter()
            .map(|row| TotalByCondition {
                total: round_money(row.total),
                ..row
            })
            .collect())
    }

    async fn top_active_customers(&self, limit: u32) -> Result<Vec<CustomerAmount>, AppError> {
        let rows = sqlx::query_as::<_, CustomerAmount>(
            r#"
            SELECT c.first_name, c.last_name, SUM(i.total) AS amount
            FROM customers c
            INNER JOIN invoices i ON i.customer_id = c.id
            GROUP BY c.id, c.first_name, c.last_name
            ORDER BY amount DESC, c.id ASC
            LIMIT $1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| CustomerAmount {
                amount: round_money(row.amount),
                ..row
            })
            .collect())
    }
}
