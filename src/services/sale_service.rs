// src/services/sale_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::SaleRepository,
    models::{product::ProductSales, sale::Sale},
};

#[derive(Clone)]
pub struct SaleService {
    repo: Arc<dyn SaleRepository>,
}

impl SaleService {
    pub fn new(repo: Arc<dyn SaleRepository>) -> Self {
        Self { repo }
    }

    pub async fn find_all(&self) -> Result<Vec<Sale>, AppError> {
        self.repo.find_all().await
    }

    pub async fn save(&self, sale: &mut Sale) -> Result<(), AppError> {
        self.repo.save(sale).await
    }

    pub async fn top_sold_products(&self, limit: u32) -> Result<Vec<ProductSales>, AppError> {
        self.repo.top_sold_products(limit).await
    }
}
