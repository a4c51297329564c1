//! Documentation of the NutriRate lookup service.
//!
//! Packaged-food nutrition lookup by barcode or free-text name, with a health grade (A-E)
//! filled in when the dataset does not carry one.
//!
//!
//!
//! # General Infrastructure
//! - Single process, single dataset file
//! - Dataset is loaded into RAM before the listener binds, see [`database`]
//! - Every response is derived per request from the raw rows, nothing is cached
//! - Clients are the barcode scanner and the name search box
//!
//!
//!
//! # Endpoints
//!
//! | Route | Response |
//! |---|---|
//! | `GET /` | `{message, items_loaded}` |
//! | `GET /scan/{barcode}` | `{status, data}`, 404 when absent |
//! | `GET /search?query=...` | `{status, count, results}`, at most 10 results |
//! | `GET /debug/barcodes` | `{sample_barcodes, total_items}` |
//!
//! Every route except `/` answers 503 when the dataset could not be loaded.
//!
//!
//!
//! # Grading
//!
//! Existing `a`-`e` grades are passed through. Otherwise sugar and fat per 100g decide:
//!
//! | Condition | Grade |
//! |---|---|
//! | sugar > 22.5 or fat > 17.5 | e |
//! | sugar > 10 or fat > 10 | c |
//! | sugar > 5 or fat > 3 | b |
//! | otherwise | a |
//!
//! `d` only ever comes from the dataset. Unparseable sugar or fat gives `unknown`.
//!
//!
//!
//! # Setup
//!
//! Environment.
//! ```sh
//! export DATASET_PATH=./master_food_database.csv
//! export RUST_PORT=8000
//! export RUST_LOG=info
//! ```
//!
//! Run.
//! ```sh
//! cargo run -p nutrirate
//! ```
//!
//! Run with per-request logs.
//! ```sh
//! cargo run -p nutrirate --features verbose
//! ```
//!
//! Inspect a dataset without the server.
//! ```sh
//! cargo run -p process -- ./master_food_database.csv stats
//! ```
use std::{sync::Arc, time::Duration};

use anyhow::Result;
use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod database;
pub mod error;
pub mod routes;
pub mod state;

use config::Config;
use routes::{barcodes_handler, home_handler, scan_handler, search_handler};
use state::AppState;

pub async fn start_server() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let config = Config::load()?;
    let state = AppState::new(config);

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");

    Ok(())
}

pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/", get(home_handler))
        .route("/scan/{barcode}", get(scan_handler))
        .route("/search", get(search_handler))
        .route("/debug/barcodes", get(barcodes_handler))
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
