//! ppov-api library - period poverty analytics service
//!
//! Exposes the router and state for the binary and for integration tests.

use std::sync::Arc;

use axum::Router;
use ppov_common::analytics::SeverityWeights;
use ppov_common::config::Config;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;
pub mod seed;

pub use crate::error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Immutable service configuration
    pub config: Arc<Config>,
    /// Severity weights validated from `config.analytics`
    pub weights: SeverityWeights,
}

impl AppState {
    /// Create application state, validating the analytics configuration
    pub fn new(db: SqlitePool, config: Config) -> ppov_common::Result<Self> {
        let weights = config.analytics.severity_weights()?;
        Ok(Self {
            db,
            config: Arc::new(config),
            weights,
        })
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let basket = Router::new()
        .route(
            "/v1/basket-items",
            get(api::list_items).post(api::create_item),
        )
        .route(
            "/v1/basket-items/:id",
            get(api::get_item)
                .put(api::update_item)
                .patch(api::update_item)
                .delete(api::delete_item),
        );

    // The `/uk` paths are the published ones; the shorter forms are aliases
    let datasets = Router::new()
        .route("/v1/price-index", get(api::list_price_index))
        .route("/v1/pip/uk/:year", get(api::pip_year))
        .route("/v1/pip/uk/:year/:percentile", get(api::pip_percentile))
        .route("/v1/pip/:year", get(api::pip_year))
        .route("/v1/pip/:year/:percentile", get(api::pip_percentile))
        .route("/v1/hygiene/uk", get(api::hygiene_latest))
        .route("/v1/hygiene/uk/:year", get(api::hygiene_year))
        .route("/v1/hygiene", get(api::hygiene_latest))
        .route("/v1/hygiene/:year", get(api::hygiene_year));

    let analytics = Router::new()
        .route("/v1/analytics/inflation-trend", get(api::inflation_trend))
        .route("/v1/analytics/cost-estimate", axum::routing::post(api::cost_estimate))
        .route("/v1/analytics/cost-burden", get(api::cost_burden))
        .route("/v1/analytics/severity-score", get(api::severity_score));

    Router::new()
        .merge(basket)
        .merge(datasets)
        .merge(analytics)
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
