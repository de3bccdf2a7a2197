//! Database models, schema and row decoding helpers

pub mod init;
pub mod models;

pub use init::*;
pub use models::*;

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::{Error, Result};

/// Decode a decimal stored as TEXT
///
/// Decimals are persisted as their exact string form because SQLite has no
/// fixed-point column type.
pub fn decode_decimal(column: &str, value: &str) -> Result<Decimal> {
    Decimal::from_str(value)
        .map_err(|e| Error::CorruptRow(format!("{} is not a decimal ('{}'): {}", column, value, e)))
}

/// Decode an optional decimal stored as TEXT
pub fn decode_optional_decimal(column: &str, value: Option<String>) -> Result<Option<Decimal>> {
    value.map(|v| decode_decimal(column, &v)).transpose()
}
