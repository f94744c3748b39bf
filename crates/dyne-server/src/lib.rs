//! HTTP front for the Dyne matching engine.
//!
//! # Routes
//! - `GET /health`
//! - `GET /api/restaurants` with optional `area`, `cuisine`, `maxPriceLevel`, `minRating`
//! - `GET /api/restaurants/:id`
//! - `POST /api/assistant/query` with `{"message": "cheap biryani"}`
//! - `GET /api/assistant/surprise`
//! - `POST /api/admin/restaurants`
//! - `POST /api/admin/dishes` with `{"name": ..., "restaurantIds": [1, 2]}`
//!
//! # Configuration
//! Read from the environment at start-up, see [`config::Config`]. Logging
//! honours `RUST_LOG` and defaults to `info`.
//!
//! ```sh
//! DYNE_CATALOG_PATH=data/restaurants.json RUST_LOG=debug cargo run -p dyne-server
//! ```
use std::{sync::Arc, time::Duration};

use anyhow::Context;
use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tokio::{
    net::TcpListener,
    signal::{self, ctrl_c},
};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;

use config::Config;
use routes::{
    add_dish_handler, add_restaurant_handler, health_handler, query_handler, restaurant_handler,
    restaurants_handler, surprise_handler,
};
use state::AppState;

pub fn app(state: Arc<AppState>) -> anyhow::Result<Router> {
    let origin: HeaderValue = state
        .config
        .cors_origin
        .parse()
        .with_context(|| format!("Invalid CORS origin {}", state.config.cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Ok(Router::new()
        .route("/health", get(health_handler))
        .route("/api/restaurants", get(restaurants_handler))
        .route("/api/restaurants/:id", get(restaurant_handler))
        .route("/api/assistant/query", post(query_handler))
        .route("/api/assistant/surprise", get(surprise_handler))
        .route("/api/admin/restaurants", post(add_restaurant_handler))
        .route("/api/admin/dishes", post(add_dish_handler))
        .layer(cors)
        .with_state(state))
}

pub async fn start_server() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Loading configuration...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = AppState::new(config)?;

    let address = format!("0.0.0.0:{}", state.config.port);
    let app = app(state)?;

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dyne_core::{ConceptDictionary, MemoryStore};
    use std::collections::HashMap;

    fn state_with(vars: &[(&str, &str)]) -> Arc<AppState> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppState::with_store(
            Config::from_vars(&vars).unwrap(),
            Arc::new(MemoryStore::default()),
            ConceptDictionary::default(),
        )
    }

    #[test]
    fn test_app_builds() {
        assert!(app(state_with(&[])).is_ok());
    }

    #[test]
    fn test_app_rejects_bad_origin() {
        assert!(app(state_with(&[("DYNE_CORS_ORIGIN", "bad\norigin")])).is_err());
    }
}
