use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};

use multiverse::core::Config;
use multiverse::server::{bind_with_retry, router, AppState};
use multiverse::storage::open_store;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting Financial Multiverse API server...");

    let store = open_store(&config);
    info!("💾 Persona storage backend: {}", store.backend_name());

    let app = router(AppState::new(store));
    let listener = bind_with_retry(&config.host, config.port, config.port_retries).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl-C, shutting down..."),
        Err(e) => {
            error!("Failed to listen for Ctrl-C, running until killed: {e}");
            std::future::pending::<()>().await;
        }
    }
}
