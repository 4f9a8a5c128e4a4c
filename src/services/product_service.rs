// src/services/product_service.rs

use std::sync::Arc;

use crate::{common::error::AppError, db::ProductRepository, models::product::Product};

#[derive(Clone)]
pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    pub async fn find_all(&self) -> Result<Vec<Product>, AppError> {
        self.repo.find_all().await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Product, AppError> {
        self.repo.find_by_id(id).await
    }

    pub async fn save(&self, product: &mut Product) -> Result<(), AppError> {
        self.repo.save(product).await
    }

    pub async fn update(&self, product: &Product) -> Result<(), AppError> {
        self.repo.update(product).await
    }

    /// PUT: substitui o produto ou, se o id não existir, cria um novo
    /// (com id gerado pelo banco, gravado em `product.id`).
    pub async fn update_or_save(&self, product: &mut Product) -> Result<(), AppError> {
        self.repo.update_or_save(product).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.repo.delete(id).await?;
        tracing::info!(id, "Produto removido");
        Ok(())
    }
}
