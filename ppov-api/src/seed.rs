//! Dataset seeding from processed CSV files
//!
//! Loads the three read-only series into SQLite. Re-running is safe: rows are
//! upserted on their natural keys, so a newer snapshot overwrites older values.
//!
//! Expected files in the data directory:
//! - `cpi_personal_care.csv`: date, cpi_index[, pct_change_mom, pct_change_yoy]
//! - `pip_uk_percentiles.csv`: year, percentile, avg_welfare_daily_ppp (or avg_welfare)[, welfare_type]
//! - `hygiene_uk.csv`: country, year, indicator, value

use ppov_common::{Error, PeriodKey, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

pub const CPI_FILE: &str = "cpi_personal_care.csv";
pub const PIP_FILE: &str = "pip_uk_percentiles.csv";
pub const HYGIENE_FILE: &str = "hygiene_uk.csv";

/// Rows written per table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub price_index: usize,
    pub income_poverty: usize,
    pub hygiene_access: usize,
}

#[derive(Debug, Deserialize)]
struct CpiRecord {
    date: String,
    cpi_index: Decimal,
    #[serde(default, deserialize_with = "empty_as_none")]
    pct_change_mom: Option<Decimal>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pct_change_yoy: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct PipRecord {
    year: i32,
    percentile: i32,
    #[serde(alias = "avg_welfare")]
    avg_welfare_daily_ppp: Decimal,
    #[serde(default, deserialize_with = "empty_as_none")]
    welfare_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HygieneRecord {
    country: String,
    year: i32,
    indicator: String,
    value: Decimal,
}

/// Treat empty CSV cells (and pandas' "nan") as missing values
fn empty_as_none<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("nan") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

fn read_records<T, R>(reader: R, source: &str) -> Result<Vec<T>>
where
    T: for<'de> Deserialize<'de>,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    csv_reader
        .deserialize()
        .enumerate()
        .map(|(i, record)| {
            // Line 1 is the header
            record.map_err(|e| Error::InvalidInput(format!("{} line {}: {}", source, i + 2, e)))
        })
        .collect()
}

/// Open one dataset file; the error names the file exactly once
fn open(dir: &Path, file: &str) -> Result<std::fs::File> {
    let path = dir.join(file);
    std::fs::File::open(&path)
        .map_err(|e| Error::InvalidInput(format!("cannot open {}: {}", path.display(), e)))
}

/// Seed all three datasets from `data_dir` in a single transaction
pub async fn seed_from_dir(pool: &SqlitePool, data_dir: &Path) -> Result<SeedSummary> {
    let cpi = read_records::<CpiRecord, _>(open(data_dir, CPI_FILE)?, CPI_FILE)?;
    let pip = read_records::<PipRecord, _>(open(data_dir, PIP_FILE)?, PIP_FILE)?;
    let hygiene = read_records::<HygieneRecord, _>(open(data_dir, HYGIENE_FILE)?, HYGIENE_FILE)?;

    let mut tx = pool.begin().await?;
    let summary = SeedSummary {
        price_index: seed_price_index(&mut tx, &cpi).await?,
        income_poverty: seed_income_poverty(&mut tx, &pip).await?,
        hygiene_access: seed_hygiene_access(&mut tx, &hygiene).await?,
    };
    tx.commit().await?;

    info!(
        "Seeding completed: {} CPI rows, {} PIP rows, {} hygiene rows",
        summary.price_index, summary.income_poverty, summary.hygiene_access
    );
    Ok(summary)
}

async fn seed_price_index(tx: &mut Transaction<'_, Sqlite>, records: &[CpiRecord]) -> Result<usize> {
    for record in records {
        let period: PeriodKey = record.date.parse()?;
        sqlx::query(
            r#"
            INSERT INTO price_index (period, cpi_index, pct_change_mom, pct_change_yoy)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(period) DO UPDATE SET
                cpi_index = excluded.cpi_index,
                pct_change_mom = excluded.pct_change_mom,
                pct_change_yoy = excluded.pct_change_yoy
            "#,
        )
        .bind(period.to_db_date())
        .bind(record.cpi_index.to_string())
        .bind(record.pct_change_mom.map(|v| v.to_string()))
        .bind(record.pct_change_yoy.map(|v| v.to_string()))
        .execute(&mut **tx)
        .await?;
    }

    Ok(records.len())
}

async fn seed_income_poverty(tx: &mut Transaction<'_, Sqlite>, records: &[PipRecord]) -> Result<usize> {
    let mut written = 0;
    for record in records {
        if !(1..=99).contains(&record.percentile) {
            warn!(
                "Skipping PIP row year={} percentile={} (outside 1-99)",
                record.year, record.percentile
            );
            continue;
        }

        sqlx::query(
            r#"
            INSERT INTO income_poverty (year, percentile, avg_welfare, welfare_type)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(year, percentile) DO UPDATE SET
                avg_welfare = excluded.avg_welfare,
                welfare_type = excluded.welfare_type
            "#,
        )
        .bind(record.year)
        .bind(record.percentile)
        .bind(record.avg_welfare_daily_ppp.to_string())
        .bind(&record.welfare_type)
        .execute(&mut **tx)
        .await?;
        written += 1;
    }

    Ok(written)
}

async fn seed_hygiene_access(
    tx: &mut Transaction<'_, Sqlite>,
    records: &[HygieneRecord],
) -> Result<usize> {
    let mut written = 0;
    for record in records {
        if record.value < Decimal::ZERO || record.value > Decimal::ONE_HUNDRED {
            warn!(
                "Skipping hygiene row {} {} {} (value {} outside 0-100)",
                record.country, record.year, record.indicator, record.value
            );
            continue;
        }

        sqlx::query(
            r#"
            INSERT INTO hygiene_access (country, year, indicator, value)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(country, year, indicator) DO UPDATE SET
                value = excluded.value
            "#,
        )
        .bind(&record.country)
        .bind(record.year)
        .bind(&record.indicator)
        .bind(record.value.to_string())
        .execute(&mut **tx)
        .await?;
        written += 1;
    }

    Ok(written)
}
