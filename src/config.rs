// src/config.rs

use std::{env, path::PathBuf, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        MemoryStore, PgCustomerRepository, PgInvoiceRepository, PgProductRepository, PgSaleRepository,
        PgWarehouseRepository,
    },
    services::{CustomerService, InvoiceService, ProductService, SaleService, WarehouseService},
};

/// Onde os dados moram. Escolhido uma vez, na montagem do AppState.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => anyhow::bail!("STORAGE_BACKEND inválido: '{}' (use 'postgres' ou 'memory')", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageBackend,
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub bind_addr: String,
    pub data_dir: PathBuf,
}

impl Config {
    /// Lê a configuração das variáveis de ambiente (e do `.env`, se existir).
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let storage = match env::var("STORAGE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => StorageBackend::Postgres,
        };

        let database_url = env::var("DATABASE_URL").ok();
        if storage == StorageBackend::Postgres && database_url.is_none() {
            anyhow::bail!("DATABASE_URL deve ser definida para o backend postgres");
        }

        Ok(Self {
            storage,
            database_url,
            max_connections: parse_var("DB_MAX_CONNECTIONS", 5)?,
            acquire_timeout: Duration::from_secs(parse_var("DB_ACQUIRE_TIMEOUT_SECS", 3)?),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("docs/db/json")),
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} inválida: '{}'", name, raw)),
        Err(_) => Ok(default),
    }
}

#[derive(Clone)]
pub struct AppState {
    // Só existe no backend postgres; usado pelas migrações e fechado no shutdown
    pub db_pool: Option<PgPool>,
    pub customer_service: CustomerService,
    pub invoice_service: InvoiceService,
    pub product_service: ProductService,
    pub sale_service: SaleService,
    pub warehouse_service: WarehouseService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        match config.storage {
            StorageBackend::Memory => {
                tracing::info!("Usando armazenamento em memória");
                Ok(Self::in_memory())
            }
            StorageBackend::Postgres => {
                let database_url = config
                    .database_url
                    .as_deref()
                    .context("DATABASE_URL deve ser definida")?;

                let db_pool = PgPoolOptions::new()
                    .max_connections(config.max_connections)
                    .acquire_timeout(config.acquire_timeout)
                    .connect(database_url)
                    .await
                    .context("Falha ao conectar ao banco de dados")?;

                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
                Ok(Self::with_pool(db_pool))
            }
        }
    }

    /// Monta o gráfico de dependências sobre o Postgres.
    pub fn with_pool(db_pool: PgPool) -> Self {
        Self {
            customer_service: CustomerService::new(Arc::new(PgCustomerRepository::new(db_pool.clone()))),
            invoice_service: InvoiceService::new(Arc::new(PgInvoiceRepository::new(db_pool.clone()))),
            product_service: ProductService::new(Arc::new(PgProductRepository::new(db_pool.clone()))),
            sale_service: SaleService::new(Arc::new(PgSaleRepository::new(db_pool.clone()))),
            warehouse_service: WarehouseService::new(Arc::new(PgWarehouseRepository::new(db_pool.clone()))),
            db_pool: Some(db_pool),
        }
    }

    /// Mesmo gráfico, com todos os repositórios num único `MemoryStore`.
    pub fn in_memory() -> Self {
        Self::with_store(MemoryStore::new())
    }

    pub fn with_store(store: MemoryStore) -> Self {
        Self {
            db_pool: None,
            customer_service: CustomerService::new(Arc::new(store.clone())),
            invoice_service: InvoiceService::new(Arc::new(store.clone())),
            product_service: ProductService::new(Arc::new(store.clone())),
            sale_service: SaleService::new(Arc::new(store.clone())),
            warehouse_service: WarehouseService::new(Arc::new(store)),
        }
    }

    /// Roda as migrações (no-op fora do postgres).
    pub async fn migrate(&self) -> anyhow::Result<()> {
        if let Some(pool) = &self.db_pool {
            sqlx::migrate!()
                .run(pool)
                .await
                .context("Falha ao rodar as migrações do banco de dados")?;
            tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");
        }
        Ok(())
    }

    /// Libera as conexões da pool. Chamado uma vez, no encerramento.
    pub async fn close(&self) {
        if let Some(pool) = &self.db_pool {
            pool.close().await;
            tracing::info!("Conexões com o banco de dados encerradas");
        }
    }
}
