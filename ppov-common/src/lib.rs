//! # Period Poverty Common Library
//!
//! Shared code for the period poverty analytics service:
//! - Database schema initialization and row models
//! - Year-month period keys for the CPI series
//! - Configuration loading
//! - The analytics engine (inflation trend, basket cost, cost burden, severity)

pub mod analytics;
pub mod config;
pub mod db;
pub mod error;
pub mod period;

pub use error::{Error, Result};
pub use period::PeriodKey;
