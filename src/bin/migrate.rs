//src/bin/migrate.rs
//
// Carga única: cria o schema e grava os arquivos JSON de DATA_DIR.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use mercado::{
    config::{AppState, Config},
    loader::JsonLoader,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    let app_state = AppState::new(&config)
        .await
        .context("Falha ao inicializar o estado da aplicação.")?;
    app_state.migrate().await?;

    let result = JsonLoader::new(&config.data_dir).migrate(&app_state).await;
    app_state.close().await;

    let summary = result?;
    tracing::info!(
        warehouses = summary.warehouses,
        customers = summary.customers,
        products = summary.products,
        invoices = summary.invoices,
        sales = summary.sales,
        "✅ Carga concluída"
    );
    Ok(())
}
