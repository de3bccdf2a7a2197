//! Store layer for ppov-api
//!
//! - `basket`: the user-editable basket item table
//! - `datasets`: the read-only CPI, PIP and hygiene series

pub mod basket;
pub mod datasets;
