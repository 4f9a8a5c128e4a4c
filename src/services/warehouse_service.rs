// src/services/warehouse_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::WarehouseRepository,
    models::warehouse::{Warehouse, WarehouseReportProducts},
};

#[derive(Clone)]
pub struct WarehouseService {
    repo: Arc<dyn WarehouseRepository>,
}

impl WarehouseService {
    pub fn new(repo: Arc<dyn WarehouseRepository>) -> Self {
        Self { repo }
    }

    pub async fn find_all(&self) -> Result<Vec<Warehouse>, AppError> {
        self.repo.find_all().await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Warehouse, AppError> {
        self.repo.find_by_id(id).await
    }

    pub async fn save(&self, warehouse: &mut Warehouse) -> Result<(), AppError> {
        self.repo.save(warehouse).await
    }

    pub async fn product_report(&self, ids: &[i32]) -> Result<Vec<WarehouseReportProducts>, AppError> {
        self.repo.product_report(ids).await
    }
}
