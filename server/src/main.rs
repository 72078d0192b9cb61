//! Customer CRM server: reads settings, opens the SQLite store, sets up the schema and
//! serves the API under `/api`.
//!
//! Run from repo root: `cargo run -p crm-server`

use customer_crm::{app, ensure_schema, AppState, Settings, Store};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("customer_crm=info,crm_server=info,tower_http=info")
            }),
        )
        .init();

    let settings = Settings::from_env()?;
    let store = Store::open(&settings.database_path).await?;
    ensure_schema(&store).await?;

    let router = app(AppState::new(store.clone()));
    let listener = TcpListener::bind(settings.bind_addr()).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("store closed, bye");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
