use anyhow::Context;
use backend::{api, config::Config, store::PieceStore};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("backend=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Database Connection
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .with_context(|| format!("Invalid database URL {}", config.database_url))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;

    PieceStore::new(pool.clone())
        .init_schema()
        .await
        .context("Failed to initialize database schema")?;

    let app = api::router(pool);
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %config.bind_addr, db = %config.database_url, "API listening");
    axum::serve(listener, app).await?;
    Ok(())
}
