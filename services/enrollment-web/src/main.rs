mod config;
mod state;
mod store_exec;
mod types;
mod routes;
mod routes_dataset;
mod routes_department;
mod routes_predict;
mod routes_forecast;


use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use enrollment::{DatasetStore, DepartmentCatalog};

use crate::config::AppConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env()?;

    tokio::fs::create_dir_all(&cfg.upload_dir)
        .await
        .with_context(|| format!("Failed to create upload dir {}", cfg.upload_dir.display()))?;

    let store = Arc::new(DatasetStore::in_dir(&cfg.upload_dir));

    // Pick up the dataset left by a previous run, if any.
    let records = store_exec::with_store_blocking(store.clone(), |s| s.load().map(|ds| ds.len()))
        .await
        .context("Dataset load task failed")?;
    match records {
        Some(n) => info!(records = n, path = %store.path().display(), "dataset restored"),
        None => info!(path = %store.path().display(), "no dataset loaded"),
    }

    let app_state = Arc::new(AppState::new(store, DepartmentCatalog::default(), cfg.clone()));
    let app = routes::router(app_state);

    let addr = &cfg.bind_addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("enrollment-web listening on http://{addr}");
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
