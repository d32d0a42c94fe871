//! Invoice dashboard server
//!
//! ```text
//! invoice-dashboard [config.yaml]
//! ```
//!
//! Without `database.url` (or `DATABASE_URL`) invoices are kept in memory.

use anyhow::Result;
use dashboard::config::DashboardConfig;
use dashboard::server::DashboardBuilder;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => DashboardConfig::from_yaml_file(&path)?,
        None => DashboardConfig::default(),
    }
    .apply_env();
    config.validate()?;

    let builder = DashboardBuilder::new().with_config(config.clone());
    let builder = match config.database.url.as_deref() {
        Some(url) => with_database(builder, url, config.database.max_connections).await?,
        None => {
            tracing::info!("no database configured, using the in-memory store");
            builder.with_store(dashboard::storage::InMemoryInvoiceStore::new())
        }
    };

    builder.serve().await
}

#[cfg(feature = "postgres")]
async fn with_database(
    builder: DashboardBuilder,
    url: &str,
    max_connections: u32,
) -> Result<DashboardBuilder> {
    use dashboard::storage::postgres::{PostgresInvoiceStore, connect, ensure_schema};

    let pool = connect(url, max_connections).await?;
    ensure_schema(&pool).await?;
    tracing::info!("connected to PostgreSQL");
    Ok(builder.with_store(PostgresInvoiceStore::new(pool)))
}

#[cfg(not(feature = "postgres"))]
async fn with_database(
    _builder: DashboardBuilder,
    _url: &str,
    _max_connections: u32,
) -> Result<DashboardBuilder> {
    anyhow::bail!("a database url is configured but the `postgres` feature is not enabled")
}
