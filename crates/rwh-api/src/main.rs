//! Binary entry point for the compliance API.
//!
//! Environment:
//! - `RWH_BIND_ADDR` — listen address, default `0.0.0.0:8080`.
//! - `RWH_CATALOG_PATH` — YAML catalogue override; built-in content when absent.
//! - `DATABASE_URL` — optional Postgres mirror for compliance records.
//! - `RUST_LOG` / `RWH_LOG_JSON` — log filtering and JSON output.
//! - `RWH_METRICS_ENABLED` — set to `false` to disable `/metrics`.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use rwh_api::state::AppState;
use rwh_reg::RegulationCatalog;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let catalog = load_catalog()?;
    tracing::info!(regulations = catalog.len(), "regulation catalogue loaded");

    let pool = rwh_api::db::init_pool()
        .await
        .context("database initialization failed")?;

    let state = AppState::with_parts(Arc::new(catalog), pool.clone());

    // Rehydrate the in-memory store from the mirror.
    if let Some(pool) = &pool {
        let records = rwh_api::db::compliance_records::load_all(pool)
            .await
            .context("failed to load compliance records")?;
        let count = records.len();
        for record in records {
            state.records.insert(record.id, record);
        }
        tracing::info!(records = count, "compliance records loaded from database");
    }

    let addr = std::env::var("RWH_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "rwh-api listening");

    axum::serve(listener, rwh_api::app(state)).await?;
    Ok(())
}

/// Initialize tracing from `RUST_LOG`, defaulting to `info`.
/// `RWH_LOG_JSON=true` switches to JSON output for log aggregation.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("RWH_LOG_JSON")
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false);
    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Load the regulation catalogue. `RWH_CATALOG_PATH` points at a YAML
/// override file; the built-in content is used when the variable is absent.
fn load_catalog() -> anyhow::Result<RegulationCatalog> {
    match std::env::var("RWH_CATALOG_PATH") {
        Ok(path) => {
            let yaml = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read catalogue file {path}"))?;
            let catalog = RegulationCatalog::from_yaml_str(&yaml)
                .with_context(|| format!("invalid catalogue file {path}"))?;
            tracing::info!(%path, "using catalogue override");
            Ok(catalog)
        }
        Err(_) => Ok(RegulationCatalog::builtin()),
    }
}
