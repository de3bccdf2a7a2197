//! HTTP API handlers for ppov-api

pub mod analytics;
pub mod basket;
pub mod datasets;
pub mod health;

pub use analytics::{cost_burden, cost_estimate, inflation_trend, severity_score};
pub use basket::{create_item, delete_item, get_item, list_items, update_item};
pub use datasets::{hygiene_latest, hygiene_year, list_price_index, pip_percentile, pip_year};
pub use health::health_routes;
