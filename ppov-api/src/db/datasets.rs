//! Read-only dataset queries (CPI, PIP, JMP hygiene)

use ppov_common::analytics::HygieneYear;
use ppov_common::config::HygieneConfig;
use ppov_common::db::{
    decode_decimal, decode_optional_decimal, HygieneProxy, PriceIndexPoint, WelfarePercentile,
    CPI_BASE_YEAR,
};
use ppov_common::period::PeriodRange;
use ppov_common::{Error, PeriodKey, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

// ============================================================================
// CPI personal care
// ============================================================================

fn price_point_from_row(row: &SqliteRow) -> Result<PriceIndexPoint> {
    let period: String = row.get("period");
    let cpi_index: String = row.get("cpi_index");

    Ok(PriceIndexPoint {
        period: PeriodKey::from_db_date(&period)?,
        index_value: decode_decimal("cpi_index", &cpi_index)?,
        base_year: CPI_BASE_YEAR,
        pct_change_mom: decode_optional_decimal("pct_change_mom", row.get("pct_change_mom"))?,
        pct_change_yoy: decode_optional_decimal("pct_change_yoy", row.get("pct_change_yoy"))?,
    })
}

/// CPI points within an inclusive range, ordered by period
pub async fn get_price_index(pool: &SqlitePool, range: &PeriodRange) -> Result<Vec<PriceIndexPoint>> {
    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT period, cpi_index, pct_change_mom, pct_change_yoy FROM price_index WHERE 1 = 1",
    );

    if let Some(from) = range.from {
        query.push(" AND period >= ").push_bind(from.to_db_date());
    }
    if let Some(to) = range.to {
        query.push(" AND period <= ").push_bind(to.to_db_date());
    }
    query.push(" ORDER BY period ASC");

    let rows = query.build().fetch_all(pool).await?;
    rows.iter().map(price_point_from_row).collect()
}

/// CPI point for exactly one month, if present
pub async fn get_price_point(pool: &SqlitePool, period: PeriodKey) -> Result<Option<PriceIndexPoint>> {
    let row = sqlx::query(
        "SELECT period, cpi_index, pct_change_mom, pct_change_yoy FROM price_index WHERE period = ?",
    )
    .bind(period.to_db_date())
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(price_point_from_row).transpose()
}

/// Most recent CPI point, if any data has been seeded
pub async fn latest_price_point(pool: &SqlitePool) -> Result<Option<PriceIndexPoint>> {
    let row = sqlx::query(
        "SELECT period, cpi_index, pct_change_mom, pct_change_yoy FROM price_index
         ORDER BY period DESC LIMIT 1",
    )
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(price_point_from_row).transpose()
}

// ============================================================================
// PIP welfare percentiles
// ============================================================================

fn welfare_from_row(row: &SqliteRow) -> Result<WelfarePercentile> {
    let avg_welfare: String = row.get("avg_welfare");

    Ok(WelfarePercentile {
        year: row.get("year"),
        percentile: row.get("percentile"),
        daily_welfare_ppp: decode_decimal("avg_welfare", &avg_welfare)?,
        welfare_type: row.get("welfare_type"),
    })
}

/// All percentiles for a year, ascending; `NotFound` when the year is absent
pub async fn list_pip_year(pool: &SqlitePool, year: i32) -> Result<Vec<WelfarePercentile>> {
    let rows = sqlx::query(
        "SELECT year, percentile, avg_welfare, welfare_type FROM income_poverty
         WHERE year = ? ORDER BY percentile ASC",
    )
    .bind(year)
    .fetch_all(pool)
    .await?;

    if rows.is_empty() {
        return Err(Error::NotFound(format!(
            "No PIP percentiles found for year={}",
            year
        )));
    }

    rows.iter().map(welfare_from_row).collect()
}

/// One welfare percentile row
pub async fn get_pip(pool: &SqlitePool, year: i32, percentile: i32) -> Result<WelfarePercentile> {
    let row = sqlx::query(
        "SELECT year, percentile, avg_welfare, welfare_type FROM income_poverty
         WHERE year = ? AND percentile = ?",
    )
    .bind(year)
    .bind(percentile)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| {
        Error::NotFound(format!(
            "No PIP data for year={}, percentile={}",
            year, percentile
        ))
    })?;

    welfare_from_row(&row)
}

// ============================================================================
// JMP hygiene proxy
// ============================================================================

fn hygiene_from_row(row: &SqliteRow) -> Result<HygieneProxy> {
    let value: String = row.get("value");

    Ok(HygieneProxy {
        country: row.get("country"),
        year: row.get("year"),
        indicator: row.get("indicator"),
        indicator_value: decode_decimal("value", &value)?,
    })
}

/// Hygiene value for the configured series, for one year or the latest year
pub async fn get_hygiene(
    pool: &SqlitePool,
    series: &HygieneConfig,
    year: HygieneYear,
) -> Result<HygieneProxy> {
    let row = match year {
        HygieneYear::Latest => {
            sqlx::query(
                "SELECT country, year, indicator, value FROM hygiene_access
                 WHERE country = ? AND indicator = ?
                 ORDER BY year DESC LIMIT 1",
            )
            .bind(&series.country)
            .bind(&series.indicator)
            .fetch_optional(pool)
            .await?
        }
        HygieneYear::Year(year) => {
            sqlx::query(
                "SELECT country, year, indicator, value FROM hygiene_access
                 WHERE country = ? AND indicator = ? AND year = ?",
            )
            .bind(&series.country)
            .bind(&series.indicator)
            .bind(year)
            .fetch_optional(pool)
            .await?
        }
    };

    let row = row.ok_or_else(|| match year {
        HygieneYear::Latest => Error::NotFound(format!(
            "No hygiene data available for {} ({})",
            series.country, series.indicator
        )),
        HygieneYear::Year(year) => Error::NotFound(format!(
            "No hygiene data for {} ({}) in {}",
            series.country, series.indicator, year
        )),
    })?;

    hygiene_from_row(&row)
}

/// Every indicator recorded for the most recent year in the dataset
pub async fn list_hygiene_latest(pool: &SqlitePool) -> Result<Vec<HygieneProxy>> {
    let rows = sqlx::query(
        "SELECT country, year, indicator, value FROM hygiene_access
         WHERE year = (SELECT MAX(year) FROM hygiene_access)
         ORDER BY country ASC, indicator ASC",
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(hygiene_from_row).collect()
}
