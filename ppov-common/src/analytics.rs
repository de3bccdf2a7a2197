//! Analytics engine
//!
//! Pure functions turning dataset rows and a basket definition into the
//! published affordability metrics:
//! - Inflation trend over a CPI range
//! - Basket cost estimate (optionally CPI-uplifted and annualized)
//! - Cost burden against PIP welfare
//! - Severity score blending burden and the hygiene access gap
//!
//! Nothing here touches the database or global state. Callers look the rows
//! up and pass them in; configuration (weights, ceilings) arrives as values.
//! Identical inputs always produce identical outputs.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::models::{BasketItem, HygieneProxy, PriceIndexPoint, WelfarePercentile};
use crate::PeriodKey;

/// Days used to annualize daily welfare
///
/// Fixed calendar-year approximation; leap years are not adjusted for.
pub const DAYS_PER_YEAR: i64 = 365;

/// Months used to annualize monthly basket prices
pub const MONTHS_PER_YEAR: i64 = 12;

/// Decimal places for percentages and money
pub const DISPLAY_DP: u32 = 2;

/// Decimal places for ratios and factors
pub const RATIO_DP: u32 = 4;

/// Engine failures, returned as values and mapped to responses by the API layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    /// Requested dataset row or basket item absent
    #[error("Not found: {0}")]
    NotFound(String),

    /// Range too narrow to derive a trend
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// A divisor (reference index or welfare) was zero
    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    /// CPI uplift requested but a reference index is missing
    #[error("Missing reference data: {0}")]
    MissingReferenceData(String),

    /// Malformed input (e.g. negative cost)
    #[error("Validation error: {0}")]
    Validation(String),
}

pub type AnalyticsResult<T> = std::result::Result<T, AnalyticsError>;

fn round_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DISPLAY_DP, RoundingStrategy::MidpointAwayFromZero)
}

fn round_ratio(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(RATIO_DP, RoundingStrategy::MidpointAwayFromZero)
}

fn checked_div(numerator: Decimal, denominator: Decimal, what: &str) -> AnalyticsResult<Decimal> {
    if denominator.is_zero() {
        return Err(AnalyticsError::DivisionByZero(format!("{} is zero", what)));
    }
    numerator
        .checked_div(denominator)
        .ok_or_else(|| AnalyticsError::Validation(format!("{} overflowed", what)))
}

fn checked_mul(a: Decimal, b: Decimal, what: &str) -> AnalyticsResult<Decimal> {
    a.checked_mul(b)
        .ok_or_else(|| AnalyticsError::Validation(format!("{} overflowed", what)))
}

// ============================================================================
// Inflation Trend
// ============================================================================

/// Percentage change of the CPI across a range
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InflationTrend {
    pub percent_change: Decimal,
    pub start_value: Decimal,
    pub end_value: Decimal,
    pub start_period: PeriodKey,
    pub end_period: PeriodKey,
    pub point_count: usize,
    pub month_span: i64,
}

/// Compute the inflation trend over an ordered CPI sequence
///
/// `points` must be ordered by period (as the dataset store returns them).
/// percent_change = (last - first) / first x 100, rounded to 2 dp.
pub fn compute_inflation_trend(points: &[PriceIndexPoint]) -> AnalyticsResult<InflationTrend> {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() >= 2 => (first, last),
        _ => {
            return Err(AnalyticsError::InsufficientData(format!(
                "at least 2 CPI points are required, range contains {}",
                points.len()
            )))
        }
    };

    let change = checked_div(
        last.index_value - first.index_value,
        first.index_value,
        "start index value",
    )?;
    let percent_change = round_display(checked_mul(change, Decimal::ONE_HUNDRED, "percent change")?);

    Ok(InflationTrend {
        percent_change,
        start_value: first.index_value,
        end_value: last.index_value,
        start_period: first.period,
        end_period: last.period,
        point_count: points.len(),
        month_span: first.period.months_until(&last.period),
    })
}

// ============================================================================
// Basket Cost Estimate
// ============================================================================

/// The priced-item shape shared by stored basket items and ad-hoc lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedItem {
    pub unit_price: Decimal,
    pub quantity: i64,
}

impl From<&BasketItem> for PricedItem {
    fn from(item: &BasketItem) -> Self {
        Self {
            unit_price: item.unit_price,
            quantity: item.quantity,
        }
    }
}

/// Period of the input unit prices
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricePeriod {
    /// Prices describe one month of consumption (default)
    #[default]
    Monthly,
    /// Prices already describe one year of consumption
    Annual,
}

/// CPI reference points for a year-over-year uplift
///
/// Either point may be absent when the dataset has no row for that month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpiUplift {
    pub current: Option<PriceIndexPoint>,
    pub prior: Option<PriceIndexPoint>,
}

/// How the basket totals should be reported
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BasketCostOptions {
    pub price_period: PricePeriod,
    pub annualize: bool,
    pub uplift: Option<CpiUplift>,
}

/// Basket cost totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BasketCostEstimate {
    pub base_total: Decimal,
    pub uplifted_total: Option<Decimal>,
    pub uplift_factor: Option<Decimal>,
    pub item_count: usize,
    /// Period the totals cover after any annualization
    pub period: PricePeriod,
    pub reference_period: Option<PeriodKey>,
}

/// Compute the basket cost
///
/// An empty basket costs nothing; it is not an error.
pub fn compute_basket_cost(
    items: &[PricedItem],
    options: &BasketCostOptions,
) -> AnalyticsResult<BasketCostEstimate> {
    let mut base_total = Decimal::ZERO;
    for item in items {
        if item.unit_price < Decimal::ZERO || item.quantity < 0 {
            return Err(AnalyticsError::Validation(
                "unit_price and quantity must be >= 0".to_string(),
            ));
        }
        let line = checked_mul(item.unit_price, Decimal::from(item.quantity), "line total")?;
        base_total = base_total
            .checked_add(line)
            .ok_or_else(|| AnalyticsError::Validation("basket total overflowed".to_string()))?;
    }

    let period = match (options.price_period, options.annualize) {
        (PricePeriod::Monthly, true) => {
            base_total = checked_mul(base_total, Decimal::from(MONTHS_PER_YEAR), "annual total")?;
            PricePeriod::Annual
        }
        (period, _) => period,
    };

    let (uplifted_total, uplift_factor, reference_period) = match &options.uplift {
        Some(uplift) => {
            let (current, prior) = match (&uplift.current, &uplift.prior) {
                (Some(current), Some(prior)) => (current, prior),
                (None, _) => {
                    return Err(AnalyticsError::MissingReferenceData(
                        "no CPI value for the reference period".to_string(),
                    ))
                }
                (Some(current), None) => {
                    return Err(AnalyticsError::MissingReferenceData(format!(
                        "no CPI value for {}",
                        current.period.previous_year()
                    )))
                }
            };

            let factor = checked_div(current.index_value, prior.index_value, "prior-year CPI value")?;
            let uplifted = checked_mul(base_total, factor, "uplifted total")?;
            (
                Some(round_display(uplifted)),
                Some(round_ratio(factor)),
                Some(current.period),
            )
        }
        None => (None, None, None),
    };

    Ok(BasketCostEstimate {
        base_total: round_display(base_total),
        uplifted_total,
        uplift_factor,
        item_count: items.len(),
        period,
        reference_period,
    })
}

// ============================================================================
// Cost Burden
// ============================================================================

/// Annual basket cost relative to annual welfare at one percentile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostBurden {
    pub annual_cost: Decimal,
    pub annual_welfare: Decimal,
    pub burden_ratio: Decimal,
    pub burden_percent: Decimal,
    pub percentile_used: i32,
    pub year_used: i32,
}

/// Compute the cost burden of an annual basket cost
///
/// annual_welfare = daily_welfare_ppp x 365; burden_ratio = cost / welfare.
pub fn compute_cost_burden(
    annual_cost: Decimal,
    welfare: &WelfarePercentile,
) -> AnalyticsResult<CostBurden> {
    if annual_cost < Decimal::ZERO {
        return Err(AnalyticsError::Validation(format!(
            "annual_cost must be >= 0 (got {})",
            annual_cost
        )));
    }

    let annual_welfare = checked_mul(
        welfare.daily_welfare_ppp,
        Decimal::from(DAYS_PER_YEAR),
        "annual welfare",
    )?;
    let ratio = checked_div(annual_cost, annual_welfare, "annual welfare")?;
    let percent = checked_mul(ratio, Decimal::ONE_HUNDRED, "burden percent")?;

    Ok(CostBurden {
        annual_cost: round_display(annual_cost),
        annual_welfare: round_display(annual_welfare),
        burden_ratio: round_ratio(ratio),
        burden_percent: round_display(percent),
        percentile_used: welfare.percentile,
        year_used: welfare.year,
    })
}

// ============================================================================
// Severity Score
// ============================================================================

/// Which hygiene year to score against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HygieneYear {
    /// Most recent year in the dataset
    #[default]
    Latest,
    Year(i32),
}

impl From<Option<i32>> for HygieneYear {
    fn from(year: Option<i32>) -> Self {
        year.map_or(HygieneYear::Latest, HygieneYear::Year)
    }
}

/// Severity score weights; the two weights sum to exactly 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeverityWeights {
    burden: Decimal,
    hygiene: Decimal,
    burden_ceiling_percent: Decimal,
}

impl SeverityWeights {
    pub fn new(
        burden: Decimal,
        hygiene: Decimal,
        burden_ceiling_percent: Decimal,
    ) -> AnalyticsResult<Self> {
        if burden < Decimal::ZERO || hygiene < Decimal::ZERO {
            return Err(AnalyticsError::Validation(
                "severity weights must be >= 0".to_string(),
            ));
        }
        if burden + hygiene != Decimal::ONE {
            return Err(AnalyticsError::Validation(format!(
                "severity weights must sum to 1.0 (got {} + {})",
                burden, hygiene
            )));
        }
        if burden_ceiling_percent <= Decimal::ZERO {
            return Err(AnalyticsError::Validation(
                "burden ceiling must be > 0".to_string(),
            ));
        }
        Ok(Self {
            burden,
            hygiene,
            burden_ceiling_percent,
        })
    }

    pub fn burden(&self) -> Decimal {
        self.burden
    }

    pub fn hygiene(&self) -> Decimal {
        self.hygiene
    }

    pub fn burden_ceiling_percent(&self) -> Decimal {
        self.burden_ceiling_percent
    }
}

impl Default for SeverityWeights {
    fn default() -> Self {
        Self {
            burden: Decimal::new(6, 1),
            hygiene: Decimal::new(4, 1),
            burden_ceiling_percent: Decimal::ONE_HUNDRED,
        }
    }
}

/// Weighted blend of cost burden and hygiene access gap, in [0, 100]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeverityScore {
    pub severity_score: Decimal,
    pub burden_component: Decimal,
    pub hygiene_component: Decimal,
    pub normalized_burden: Decimal,
    pub hygiene_gap: Decimal,
    pub burden_weight: Decimal,
    pub hygiene_weight: Decimal,
    pub burden_ceiling_percent: Decimal,
    pub hygiene_year_used: i32,
}

/// Compute the severity score
///
/// The burden is capped at the configured ceiling and rescaled to 0-100 so a
/// single extreme basket cannot dominate the hygiene component.
pub fn compute_severity(
    burden_percent: Decimal,
    hygiene: &HygieneProxy,
    weights: &SeverityWeights,
) -> AnalyticsResult<SeverityScore> {
    let ceiling = weights.burden_ceiling_percent;
    let capped = burden_percent.max(Decimal::ZERO).min(ceiling);
    let normalized_burden = checked_mul(
        checked_div(capped, ceiling, "burden ceiling")?,
        Decimal::ONE_HUNDRED,
        "normalized burden",
    )?;

    let access = hygiene
        .indicator_value
        .max(Decimal::ZERO)
        .min(Decimal::ONE_HUNDRED);
    let hygiene_gap = Decimal::ONE_HUNDRED - access;

    let burden_component = weights.burden * normalized_burden;
    let hygiene_component = weights.hygiene * hygiene_gap;
    let severity = (burden_component + hygiene_component)
        .max(Decimal::ZERO)
        .min(Decimal::ONE_HUNDRED);

    Ok(SeverityScore {
        severity_score: round_display(severity),
        burden_component: round_display(burden_component),
        hygiene_component: round_display(hygiene_component),
        normalized_burden: round_display(normalized_burden),
        hygiene_gap: round_display(hygiene_gap),
        burden_weight: weights.burden,
        hygiene_weight: weights.hygiene,
        burden_ceiling_percent: ceiling,
        hygiene_year_used: hygiene.year,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn point(year: i32, month: u32, value: &str) -> PriceIndexPoint {
        PriceIndexPoint::new(PeriodKey::new(year, month).unwrap(), d(value))
    }

    fn welfare(daily: &str) -> WelfarePercentile {
        WelfarePercentile {
            year: 2018,
            percentile: 50,
            daily_welfare_ppp: d(daily),
            welfare_type: Some("income".to_string()),
        }
    }

    fn hygiene(value: &str) -> HygieneProxy {
        HygieneProxy {
            country: "United Kingdom".to_string(),
            year: 2022,
            indicator: "bathing_facility".to_string(),
            indicator_value: d(value),
        }
    }

    // ------------------------------------------------------------------
    // Inflation trend
    // ------------------------------------------------------------------

    #[test]
    fn test_trend_percent_change() {
        let points = vec![
            point(2018, 1, "100.0"),
            point(2018, 6, "101.2"),
            point(2019, 1, "103.5"),
        ];
        let trend = compute_inflation_trend(&points).unwrap();

        assert_eq!(trend.percent_change, d("3.50"));
        assert_eq!(trend.start_value, d("100.0"));
        assert_eq!(trend.end_value, d("103.5"));
        assert_eq!(trend.start_period.to_string(), "2018-01");
        assert_eq!(trend.end_period.to_string(), "2019-01");
        assert_eq!(trend.point_count, 3);
        assert_eq!(trend.month_span, 12);
    }

    #[test]
    fn test_trend_rounds_to_two_places() {
        let points = vec![point(2020, 1, "3"), point(2020, 2, "4")];
        let trend = compute_inflation_trend(&points).unwrap();
        assert_eq!(trend.percent_change, d("33.33"));
    }

    #[test]
    fn test_trend_requires_two_points() {
        assert!(matches!(
            compute_inflation_trend(&[]),
            Err(AnalyticsError::InsufficientData(_))
        ));
        assert!(matches!(
            compute_inflation_trend(&[point(2020, 1, "100")]),
            Err(AnalyticsError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_trend_zero_start_is_guarded() {
        let points = vec![point(2020, 1, "0"), point(2020, 2, "100")];
        assert!(matches!(
            compute_inflation_trend(&points),
            Err(AnalyticsError::DivisionByZero(_))
        ));
    }

    // ------------------------------------------------------------------
    // Basket cost
    // ------------------------------------------------------------------

    fn priced(price: &str, quantity: i64) -> PricedItem {
        PricedItem {
            unit_price: d(price),
            quantity,
        }
    }

    #[test]
    fn test_basket_base_total() {
        let items = vec![priced("2.50", 4), priced("1.00", 2)];
        let estimate = compute_basket_cost(&items, &BasketCostOptions::default()).unwrap();

        assert_eq!(estimate.base_total, d("12.00"));
        assert_eq!(estimate.item_count, 2);
        assert_eq!(estimate.uplifted_total, None);
        assert_eq!(estimate.uplift_factor, None);
        assert_eq!(estimate.period, PricePeriod::Monthly);
    }

    #[test]
    fn test_empty_basket_costs_nothing() {
        let estimate = compute_basket_cost(&[], &BasketCostOptions::default()).unwrap();
        assert_eq!(estimate.base_total, Decimal::ZERO);
        assert_eq!(estimate.uplifted_total, None);
        assert_eq!(estimate.item_count, 0);
    }

    #[test]
    fn test_basket_annualize_monthly_prices() {
        let options = BasketCostOptions {
            annualize: true,
            ..Default::default()
        };
        let estimate = compute_basket_cost(&[priced("2.50", 2)], &options).unwrap();
        assert_eq!(estimate.base_total, d("60.00"));
        assert_eq!(estimate.period, PricePeriod::Annual);
    }

    #[test]
    fn test_basket_annual_prices_not_multiplied() {
        let options = BasketCostOptions {
            price_period: PricePeriod::Annual,
            annualize: true,
            uplift: None,
        };
        let estimate = compute_basket_cost(&[priced("60", 1)], &options).unwrap();
        assert_eq!(estimate.base_total, d("60"));
        assert_eq!(estimate.period, PricePeriod::Annual);
    }

    #[test]
    fn test_basket_cpi_uplift() {
        let options = BasketCostOptions {
            uplift: Some(CpiUplift {
                current: Some(point(2024, 3, "110")),
                prior: Some(point(2023, 3, "100")),
            }),
            ..Default::default()
        };
        let estimate = compute_basket_cost(&[priced("5.00", 2)], &options).unwrap();

        assert_eq!(estimate.base_total, d("10.00"));
        assert_eq!(estimate.uplift_factor, Some(d("1.1")));
        assert_eq!(estimate.uplifted_total, Some(d("11.00")));
        assert_eq!(estimate.reference_period, Some(PeriodKey::new(2024, 3).unwrap()));
    }

    #[test]
    fn test_basket_uplift_missing_reference() {
        let options = BasketCostOptions {
            uplift: Some(CpiUplift {
                current: Some(point(2024, 3, "110")),
                prior: None,
            }),
            ..Default::default()
        };
        let err = compute_basket_cost(&[priced("5.00", 2)], &options).unwrap_err();
        assert!(matches!(err, AnalyticsError::MissingReferenceData(ref msg) if msg.contains("2023-03")));

        let options = BasketCostOptions {
            uplift: Some(CpiUplift {
                current: None,
                prior: None,
            }),
            ..Default::default()
        };
        assert!(matches!(
            compute_basket_cost(&[], &options),
            Err(AnalyticsError::MissingReferenceData(_))
        ));
    }

    #[test]
    fn test_basket_uplift_zero_prior_is_guarded() {
        let options = BasketCostOptions {
            uplift: Some(CpiUplift {
                current: Some(point(2024, 3, "110")),
                prior: Some(point(2023, 3, "0")),
            }),
            ..Default::default()
        };
        assert!(matches!(
            compute_basket_cost(&[priced("1", 1)], &options),
            Err(AnalyticsError::DivisionByZero(_))
        ));
    }

    #[test]
    fn test_basket_rejects_negative_quantity() {
        assert!(matches!(
            compute_basket_cost(&[priced("1", -1)], &BasketCostOptions::default()),
            Err(AnalyticsError::Validation(_))
        ));
    }

    #[test]
    fn test_stored_item_converts_to_priced_item() {
        let item = BasketItem {
            id: 7,
            name: "pads pack".to_string(),
            unit_price: d("2.50"),
            quantity: 4,
            category: None,
            currency: "GBP".to_string(),
            notes: None,
        };
        assert_eq!(PricedItem::from(&item), priced("2.50", 4));
    }

    // ------------------------------------------------------------------
    // Cost burden
    // ------------------------------------------------------------------

    #[test]
    fn test_cost_burden_reference_values() {
        let burden = compute_cost_burden(d("100"), &welfare("5.00")).unwrap();

        assert_eq!(burden.annual_welfare, d("1825.00"));
        assert_eq!(burden.burden_ratio, d("0.0548"));
        assert_eq!(burden.burden_percent, d("5.48"));
        assert_eq!(burden.percentile_used, 50);
        assert_eq!(burden.year_used, 2018);
    }

    #[test]
    fn test_cost_burden_zero_welfare_is_guarded() {
        assert!(matches!(
            compute_cost_burden(d("100"), &welfare("0")),
            Err(AnalyticsError::DivisionByZero(_))
        ));
    }

    #[test]
    fn test_cost_burden_rejects_negative_cost() {
        assert!(matches!(
            compute_cost_burden(d("-1"), &welfare("5")),
            Err(AnalyticsError::Validation(_))
        ));
    }

    // ------------------------------------------------------------------
    // Severity
    // ------------------------------------------------------------------

    #[test]
    fn test_severity_reference_values() {
        let score = compute_severity(d("50"), &hygiene("80"), &SeverityWeights::default()).unwrap();

        assert_eq!(score.normalized_burden, d("50"));
        assert_eq!(score.hygiene_gap, d("20"));
        assert_eq!(score.burden_component, d("30"));
        assert_eq!(score.hygiene_component, d("8"));
        assert_eq!(score.severity_score, d("38.00"));
        assert_eq!(score.burden_weight, d("0.6"));
        assert_eq!(score.hygiene_weight, d("0.4"));
        assert_eq!(score.hygiene_year_used, 2022);
    }

    #[test]
    fn test_severity_caps_extreme_burden() {
        let score = compute_severity(d("450"), &hygiene("100"), &SeverityWeights::default()).unwrap();
        assert_eq!(score.normalized_burden, d("100"));
        assert_eq!(score.severity_score, d("60"));
    }

    #[test]
    fn test_severity_rescales_to_ceiling() {
        let weights = SeverityWeights::new(d("1"), d("0"), d("20")).unwrap();
        let score = compute_severity(d("5"), &hygiene("0"), &weights).unwrap();
        assert_eq!(score.normalized_burden, d("25"));
        assert_eq!(score.severity_score, d("25"));
    }

    #[test]
    fn test_weights_validation() {
        assert!(SeverityWeights::new(d("0.5"), d("0.4"), d("100")).is_err());
        assert!(SeverityWeights::new(d("1.2"), d("-0.2"), d("100")).is_err());
        assert!(SeverityWeights::new(d("0.5"), d("0.5"), d("0")).is_err());
        assert!(SeverityWeights::new(d("0.7"), d("0.3"), d("100")).is_ok());
    }

    #[test]
    fn test_hygiene_year_from_option() {
        assert_eq!(HygieneYear::from(None), HygieneYear::Latest);
        assert_eq!(HygieneYear::from(Some(2019)), HygieneYear::Year(2019));
    }

    // ------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------

    proptest! {
        #[test]
        fn prop_trend_matches_formula(start in 1i64..100_000, end in 0i64..100_000) {
            let start = Decimal::new(start, 1);
            let end = Decimal::new(end, 1);
            let points = vec![
                PriceIndexPoint::new(PeriodKey::new(2020, 1).unwrap(), start),
                PriceIndexPoint::new(PeriodKey::new(2021, 1).unwrap(), end),
            ];
            let trend = compute_inflation_trend(&points).unwrap();
            let expected = (end - start) / start * Decimal::ONE_HUNDRED;
            prop_assert!((trend.percent_change - expected).abs() <= Decimal::new(5, 3));
        }

        #[test]
        fn prop_compute_is_idempotent(price in 0i64..100_000, quantity in 0i64..1_000, daily in 1i64..10_000) {
            let items = vec![PricedItem { unit_price: Decimal::new(price, 2), quantity }];
            let options = BasketCostOptions { annualize: true, ..Default::default() };
            let first = compute_basket_cost(&items, &options).unwrap();
            let second = compute_basket_cost(&items, &options).unwrap();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.base_total.to_string(), second.base_total.to_string());

            let w = WelfarePercentile {
                year: 2018,
                percentile: 20,
                daily_welfare_ppp: Decimal::new(daily, 2),
                welfare_type: None,
            };
            let a = compute_cost_burden(first.base_total, &w).unwrap();
            let b = compute_cost_burden(first.base_total, &w).unwrap();
            prop_assert_eq!(&a, &b);

            let h = HygieneProxy {
                country: "United Kingdom".to_string(),
                year: 2022,
                indicator: "bathing_facility".to_string(),
                indicator_value: Decimal::new(997, 1),
            };
            let s1 = compute_severity(a.burden_percent, &h, &SeverityWeights::default()).unwrap();
            let s2 = compute_severity(a.burden_percent, &h, &SeverityWeights::default()).unwrap();
            prop_assert_eq!(s1, s2);
        }
    }
}
