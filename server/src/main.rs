use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use finance_dashboard::backend::{create_router, initialize_backend};
use finance_dashboard::config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("finance_dashboard=info,tower_http=info")),
        )
        .init();

    info!("Starting finance dashboard");

    let config = AppConfig::from_env()?;
    let state = initialize_backend(&config).await?;
    let app = create_router(state, &config)?;

    let addr = config.socket_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
