//! Analytics endpoints
//!
//! Each handler validates its request, looks the inputs up in the stores and
//! hands them to the pure engine in `ppov_common::analytics`.

use axum::{
    extract::{Query, State},
    Json,
};
use ppov_common::analytics::{
    compute_basket_cost, compute_cost_burden, compute_inflation_trend, compute_severity,
    BasketCostEstimate, BasketCostOptions, CostBurden, CpiUplift, HygieneYear, InflationTrend,
    PricePeriod, PricedItem, SeverityScore,
};
use ppov_common::PeriodKey;
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::debug;

use super::datasets::{check_percentile, check_year, RangeQuery};
use crate::db::{basket, datasets};
use crate::{ApiError, ApiResult, AppState};

// ============================================================================
// Request Types
// ============================================================================

/// Ad-hoc basket line supplied directly in a cost estimate request
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BasketLine {
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: i64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl BasketLine {
    fn validate(&self) -> ApiResult<()> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation("line name must not be empty".to_string()));
        }
        if self.unit_price < Decimal::ZERO {
            return Err(ApiError::Validation(format!(
                "unit_price of '{}' must be >= 0",
                self.name
            )));
        }
        if self.quantity < 0 {
            return Err(ApiError::Validation(format!(
                "quantity of '{}' must be >= 0",
                self.name
            )));
        }
        Ok(())
    }
}

impl From<&BasketLine> for PricedItem {
    fn from(line: &BasketLine) -> Self {
        Self {
            unit_price: line.unit_price,
            quantity: line.quantity,
        }
    }
}

/// POST /v1/analytics/cost-estimate body
///
/// Unit prices are assumed to be monthly unless `price_period` says otherwise.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CostEstimateRequest {
    /// Ad-hoc lines; mutually exclusive with `item_ids`
    pub items: Option<Vec<BasketLine>>,
    /// Stored basket item ids; mutually exclusive with `items`
    pub item_ids: Option<Vec<i64>>,
    pub apply_cpi_uplift: bool,
    /// Month whose CPI is compared with the same month a year earlier (default: latest)
    pub reference_period: Option<PeriodKey>,
    pub price_period: PricePeriod,
    /// Report annual totals (monthly prices are multiplied by 12)
    pub annualize: bool,
}

/// Where the basket comes from
#[derive(Debug, Clone, PartialEq)]
enum BasketSource {
    /// Every stored basket item
    AllStored,
    /// Stored basket items by id
    Stored(Vec<i64>),
    /// Lines supplied by the caller
    AdHoc(Vec<BasketLine>),
}

impl CostEstimateRequest {
    fn source(&self) -> ApiResult<BasketSource> {
        match (&self.items, &self.item_ids) {
            (Some(_), Some(_)) => Err(ApiError::Validation(
                "supply either items or item_ids, not both".to_string(),
            )),
            (Some(lines), None) => {
                for line in lines {
                    line.validate()?;
                }
                Ok(BasketSource::AdHoc(lines.clone()))
            }
            (None, Some(ids)) => Ok(BasketSource::Stored(ids.clone())),
            (None, None) => Ok(BasketSource::AllStored),
        }
    }
}

async fn resolve_items(pool: &SqlitePool, source: &BasketSource) -> ApiResult<Vec<PricedItem>> {
    let items = match source {
        BasketSource::AdHoc(lines) => lines.iter().map(PricedItem::from).collect(),
        BasketSource::Stored(ids) => basket::get_many(pool, ids)
            .await?
            .iter()
            .map(PricedItem::from)
            .collect(),
        BasketSource::AllStored => basket::list(pool)
            .await?
            .iter()
            .map(PricedItem::from)
            .collect(),
    };
    Ok(items)
}

async fn resolve_uplift(pool: &SqlitePool, reference: Option<PeriodKey>) -> ApiResult<CpiUplift> {
    let current = match reference {
        Some(period) => datasets::get_price_point(pool, period).await?,
        None => datasets::latest_price_point(pool).await?,
    };

    let prior_period = reference
        .or_else(|| current.as_ref().map(|p| p.period))
        .map(|p| p.previous_year());
    let prior = match prior_period {
        Some(period) => datasets::get_price_point(pool, period).await?,
        None => None,
    };

    Ok(CpiUplift { current, prior })
}

/// Query parameters for cost burden
#[derive(Debug, Deserialize)]
pub struct CostBurdenQuery {
    /// Annual basket cost (e.g. from an annualized cost estimate)
    pub annual_cost: Decimal,
    pub year: i32,
    /// Defaults to the configured reference percentile (the median)
    pub percentile: Option<i32>,
}

/// Query parameters for severity score
#[derive(Debug, Deserialize)]
pub struct SeverityQuery {
    /// Burden percentage (e.g. from cost burden)
    pub burden_percent: Decimal,
    /// Defaults to the latest hygiene year available
    pub hygiene_year: Option<i32>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /v1/analytics/inflation-trend?from=&to=
pub async fn inflation_trend(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> ApiResult<Json<InflationTrend>> {
    let range = query.to_range()?;
    let points = datasets::get_price_index(&state.db, &range).await?;
    let trend = compute_inflation_trend(&points)?;
    Ok(Json(trend))
}

/// POST /v1/analytics/cost-estimate
pub async fn cost_estimate(
    State(state): State<AppState>,
    Json(request): Json<CostEstimateRequest>,
) -> ApiResult<Json<BasketCostEstimate>> {
    let source = request.source()?;
    let items = resolve_items(&state.db, &source).await?;

    let uplift = if request.apply_cpi_uplift {
        Some(resolve_uplift(&state.db, request.reference_period).await?)
    } else {
        None
    };

    let options = BasketCostOptions {
        price_period: request.price_period,
        annualize: request.annualize,
        uplift,
    };

    let estimate = compute_basket_cost(&items, &options)?;
    debug!(
        "Cost estimate over {} items: base_total={}",
        estimate.item_count, estimate.base_total
    );
    Ok(Json(estimate))
}

/// GET /v1/analytics/cost-burden?annual_cost=&year=&percentile=
pub async fn cost_burden(
    State(state): State<AppState>,
    Query(query): Query<CostBurdenQuery>,
) -> ApiResult<Json<CostBurden>> {
    let year = check_year(query.year)?;
    let percentile = check_percentile(
        query
            .percentile
            .unwrap_or(state.config.analytics.reference_percentile),
    )?;

    let welfare = datasets::get_pip(&state.db, year, percentile).await?;
    let burden = compute_cost_burden(query.annual_cost, &welfare)?;
    Ok(Json(burden))
}

/// GET /v1/analytics/severity-score?burden_percent=&hygiene_year=
pub async fn severity_score(
    State(state): State<AppState>,
    Query(query): Query<SeverityQuery>,
) -> ApiResult<Json<SeverityScore>> {
    let hygiene_year = HygieneYear::from(query.hygiene_year.map(check_year).transpose()?);

    let hygiene = datasets::get_hygiene(&state.db, &state.config.hygiene, hygiene_year).await?;
    let score = compute_severity(query.burden_percent, &hygiene, &state.weights)?;
    Ok(Json(score))
}
