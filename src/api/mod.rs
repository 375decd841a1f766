//! HTTP boundary.
//!
//! | Method | Path                   | Handler                        |
//! |--------|------------------------|--------------------------------|
//! | GET    | `/api/events`          | [`handlers::list_events`]      |
//! | GET    | `/api/events/featured` | [`handlers::featured_events`]  |
//! | GET    | `/api/events/slugs`    | [`handlers::event_slugs`]      |
//! | GET    | `/api/events/:slug`    | [`handlers::get_event`]        |
//! | GET    | `/api/categories`      | [`handlers::categories`]       |
//! | GET    | `/api/countries`       | [`handlers::countries`]        |
//! | GET    | `/api/locations`       | [`handlers::locations`]        |
//! | GET    | `/api/locales`         | [`handlers::locales`]          |
//! | POST   | `/api/bookings`        | [`handlers::create_booking`]   |
//! | GET    | `/api/tickets`         | [`handlers::tickets`]          |
//! | GET    | `/health`              | [`handlers::health_check`]     |

pub mod error;
pub mod handlers;

pub use error::ApiError;

use crate::config::Config;
use crate::query::QueryEngine;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

/// Shared, read-only state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: QueryEngine,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(engine: QueryEngine, config: Config) -> Self {
        Self {
            engine,
            config: Arc::new(config),
        }
    }

    /// Stand-in for network/database latency on read routes.
    pub async fn simulate_latency(&self) {
        if !self.config.query_latency.is_zero() {
            tokio::time::sleep(self.config.query_latency).await;
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/events", get(handlers::list_events))
        .route("/api/events/featured", get(handlers::featured_events))
        .route("/api/events/slugs", get(handlers::event_slugs))
        .route("/api/events/:slug", get(handlers::get_event))
        .route("/api/categories", get(handlers::categories))
        .route("/api/countries", get(handlers::countries))
        .route("/api/locations", get(handlers::locations))
        .route("/api/locales", get(handlers::locales))
        .route("/api/bookings", post(handlers::create_booking))
        .route("/api/tickets", get(handlers::tickets))
        .route("/health", get(handlers::health_check))
        .with_state(state)
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(TraceLayer::new_for_http())
}
