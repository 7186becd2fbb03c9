//! Server: reads settings, connects the pool, discovers the schema, then serves.

use db_explorer::{app, connect, AppState, MySqlDriver, Settings};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("db_explorer=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let pool = connect(&settings.database_url, settings.max_connections).await?;
    let driver = MySqlDriver::new(pool);

    // The schema model is never written again once serving starts.
    let state = AppState::bootstrap(Arc::new(driver)).await?;

    let listener = TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state, settings.body_limit)).await?;
    Ok(())
}
