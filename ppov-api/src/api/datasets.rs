//! Read-only dataset endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use ppov_common::analytics::HygieneYear;
use ppov_common::db::{HygieneProxy, PriceIndexPoint, WelfarePercentile};
use ppov_common::period::PeriodRange;
use serde::Deserialize;

use crate::db::datasets;
use crate::{ApiError, ApiResult, AppState};

/// Query parameters for CPI ranges (`YYYY-MM` or `YYYY-MM-DD`, both inclusive)
#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl RangeQuery {
    pub fn to_range(&self) -> ApiResult<PeriodRange> {
        Ok(PeriodRange::parse(self.from.as_deref(), self.to.as_deref())?)
    }
}

pub(crate) fn check_year(year: i32) -> ApiResult<i32> {
    if !(1900..=2100).contains(&year) {
        return Err(ApiError::Validation(format!(
            "year must be within 1900-2100 (got {})",
            year
        )));
    }
    Ok(year)
}

pub(crate) fn check_percentile(percentile: i32) -> ApiResult<i32> {
    if !(1..=99).contains(&percentile) {
        return Err(ApiError::Validation(format!(
            "percentile must be within 1-99 (got {})",
            percentile
        )));
    }
    Ok(percentile)
}

/// GET /v1/price-index?from=&to=
pub async fn list_price_index(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> ApiResult<Json<Vec<PriceIndexPoint>>> {
    let range = query.to_range()?;
    Ok(Json(datasets::get_price_index(&state.db, &range).await?))
}

/// GET /v1/pip/uk/:year (alias /v1/pip/:year)
pub async fn pip_year(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> ApiResult<Json<Vec<WelfarePercentile>>> {
    let year = check_year(year)?;
    Ok(Json(datasets::list_pip_year(&state.db, year).await?))
}

/// GET /v1/pip/uk/:year/:percentile
pub async fn pip_percentile(
    State(state): State<AppState>,
    Path((year, percentile)): Path<(i32, i32)>,
) -> ApiResult<Json<WelfarePercentile>> {
    let year = check_year(year)?;
    let percentile = check_percentile(percentile)?;
    Ok(Json(datasets::get_pip(&state.db, year, percentile).await?))
}

/// GET /v1/hygiene/uk (alias /v1/hygiene)
///
/// All indicators for the most recent year.
pub async fn hygiene_latest(State(state): State<AppState>) -> ApiResult<Json<Vec<HygieneProxy>>> {
    Ok(Json(datasets::list_hygiene_latest(&state.db).await?))
}

/// GET /v1/hygiene/uk/:year
///
/// The configured series' value for one year.
pub async fn hygiene_year(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> ApiResult<Json<HygieneProxy>> {
    let year = check_year(year)?;
    let row = datasets::get_hygiene(&state.db, &state.config.hygiene, HygieneYear::Year(year)).await?;
    Ok(Json(row))
}
