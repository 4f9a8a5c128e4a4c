// src/services/customer_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::CustomerRepository,
    models::customer::{Customer, CustomerAmount, TotalByCondition},
};

#[derive(Clone)]
pub struct CustomerService {
    repo: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(repo: Arc<dyn CustomerRepository>) -> Self {
        Self { repo }
    }

    pub async fn find_all(&self) -> Result<Vec<Customer>, AppError> {
        self.repo.find_all().await
    }

    pub async fn save(&self, customer: &mut Customer) -> Result<(), AppError> {
        self.repo.save(customer).await
    }

    pub async fn total_by_condition(&self) -> Result<Vec<TotalByCondition>, AppError> {
        self.repo.total_by_condition().await
    }

    pub async fn top_active_customers(&self, limit: u32) -> Result<Vec<CustomerAmount>, AppError> {
        self.repo.top_active_customers(limit).await
    }
}
