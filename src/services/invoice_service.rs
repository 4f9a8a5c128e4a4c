// src/services/invoice_service.rs

use std::sync::Arc;

use crate::{common::error::AppError, db::InvoiceRepository, models::invoice::Invoice};

#[derive(Clone)]
pub struct InvoiceService {
    repo: Arc<dyn InvoiceRepository>,
}

impl InvoiceService {
    pub fn new(repo: Arc<dyn InvoiceRepository>) -> Self {
        Self { repo }
    }

    pub async fn find_all(&self) -> Result<Vec<Invoice>, AppError> {
        self.repo.find_all().await
    }

    pub async fn save(&self, invoice: &mut Invoice) -> Result<(), AppError> {
        self.repo.save(invoice).await
    }

    pub async fn update_totals(&self) -> Result<u64, AppError> {
        let updated = self.repo.update_totals().await?;
        tracing::info!(updated, "Totais das faturas recalculados");
        Ok(updated)
    }
}
