//! Documentation of a skin-care quiz funnel backend.
//!
//!
//!
//! # General Infrastructure
//! - Frontend is a static quiz page, talks JSON to this server
//! - Server owns the skin-type classification, the checkout link gate and
//!   the funnel event log
//! - Redis is the only stateful collaborator, holds the click counter and
//!   the capped event list
//! - Checkout payments happen on an external payment page, we only hand
//!   out the URL
//!
//!
//!
//! # Checkout Gate
//!
//! **Goal**: Make the official checkout link authoritative once click
//! volume crosses a threshold, so a cloned page that substitutes its own
//! link stops converting for the cloner.
//!
//! - Every checkout request increments a persistent click counter first
//! - Under the threshold, a supplied link containing "http" is returned
//!   as-is, which keeps a cloner convinced their substitution works
//! - At or over the threshold, the official URL is returned no matter what
//! - The counter only grows, so the gate never reopens
//! - A configurable delay precedes the answer so the lookup reads like a
//!   remote call
//!
//!
//!
//! # Notes
//!
//! ## Redis
//! The click counter needs atomic increments and the event log needs cheap
//! newest-first reads. Redis gives both with INCR and LPUSH/LRANGE, without
//! a schema or a query planner we would not use.
//!
//! The event list is capped at the last 5000 entries. The admin metrics
//! are a reduce over that window, not over all history, which is the same
//! window the dashboard always analyzed.
//!
//!
//!
//! # Setup
//!
//! View current docs.
//! ```sh
//! cargo doc --open
//! `````
//!
//! Run with logging.
//! ```sh
//! RUST_LOG=info cargo run
//! ```
//!
//! The admin key is read from `/run/secrets/ADMIN_KEY`. Port, Redis URL,
//! checkout URL and simulated delay come from `RUST_PORT`, `REDIS_URL`,
//! `CHECKOUT_URL` and `CHECKOUT_DELAY_MS`, each with a logged default.
use std::time::Duration;

use axum::{
    Router,
    http::{HeaderName, Method, header::CONTENT_TYPE},
    routing::{get, post},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod analytics;
pub mod checkout;
pub mod config;
pub mod database;
pub mod error;
pub mod quiz;
pub mod routes;
pub mod skin;
pub mod state;

use routes::{
    ADMIN_KEY_HEADER, checkout_handler, classify_handler, events_handler, metrics_handler,
    questions_handler,
};
use state::AppState;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new().await;

    info!("Starting server...");

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(ADMIN_KEY_HEADER)])
        .max_age(Duration::from_secs(60 * 60));

    let app = Router::new()
        .route("/questions", get(questions_handler))
        .route("/classify", post(classify_handler))
        .route("/checkout", post(checkout_handler))
        .route("/events", post(events_handler))
        .route("/metrics", get(metrics_handler))
        .layer(cors)
        .with_state(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
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
