//! Integration tests for CSV dataset seeding

use ppov_api::seed::{seed_from_dir, SeedSummary, CPI_FILE, HYGIENE_FILE, PIP_FILE};
use ppov_common::db::init_memory_database;
use sqlx::SqlitePool;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_fixtures(dir: &Path, cpi_latest: &str) {
    fs::write(
        dir.join(CPI_FILE),
        format!(
            "date,cpi_index,pct_change_mom,pct_change_yoy\n\
             2023-01-01,100.0,,\n\
             2023-02-01,100.4,0.4,nan\n\
             2024-01-01,{},0.2,3.1\n",
            cpi_latest
        ),
    )
    .unwrap();

    fs::write(
        dir.join(PIP_FILE),
        "year,percentile,avg_welfare_daily_ppp,welfare_type\n\
         2018,20,18.75,income\n\
         2018,50,45.10,income\n\
         2018,100,120.00,income\n",
    )
    .unwrap();

    fs::write(
        dir.join(HYGIENE_FILE),
        "country,year,indicator,value\n\
         United Kingdom,2017,bathing_facility,99.5\n\
         United Kingdom,2022,bathing_facility,99.7\n\
         United Kingdom,2022,handwashing_facility,101.0\n",
    )
    .unwrap();
}

async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_seed_loads_all_datasets() {
    let temp = TempDir::new().unwrap();
    write_fixtures(temp.path(), "103.1");
    let pool = init_memory_database().await.unwrap();

    let summary = seed_from_dir(&pool, temp.path()).await.unwrap();

    // Out-of-range percentile and hygiene rows are skipped
    assert_eq!(
        summary,
        SeedSummary {
            price_index: 3,
            income_poverty: 2,
            hygiene_access: 2,
        }
    );
    assert_eq!(count(&pool, "price_index").await, 3);
    assert_eq!(count(&pool, "income_poverty").await, 2);
    assert_eq!(count(&pool, "hygiene_access").await, 2);

    let mom: Option<String> =
        sqlx::query_scalar("SELECT pct_change_mom FROM price_index WHERE period = '2023-01-01'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(mom, None);
}

#[tokio::test]
async fn test_reseed_upserts_without_duplicates() {
    let temp = TempDir::new().unwrap();
    write_fixtures(temp.path(), "103.1");
    let pool = init_memory_database().await.unwrap();
    seed_from_dir(&pool, temp.path()).await.unwrap();

    write_fixtures(temp.path(), "104.2");
    seed_from_dir(&pool, temp.path()).await.unwrap();

    assert_eq!(count(&pool, "price_index").await, 3);
    let latest: String =
        sqlx::query_scalar("SELECT cpi_index FROM price_index WHERE period = '2024-01-01'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(latest, "104.2");
}

#[tokio::test]
async fn test_missing_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let pool = init_memory_database().await.unwrap();

    let err = seed_from_dir(&pool, temp.path()).await.unwrap_err();
    assert!(err.to_string().contains(CPI_FILE));
    assert_eq!(count(&pool, "price_index").await, 0);
}

#[tokio::test]
async fn test_bad_row_writes_nothing() {
    let temp = TempDir::new().unwrap();
    write_fixtures(temp.path(), "103.1");
    fs::write(
        temp.path().join(HYGIENE_FILE),
        "country,year,indicator,value\nUnited Kingdom,twenty,bathing_facility,99.7\n",
    )
    .unwrap();
    let pool = init_memory_database().await.unwrap();

    assert!(seed_from_dir(&pool, temp.path()).await.is_err());
    assert_eq!(count(&pool, "price_index").await, 0);
    assert_eq!(count(&pool, "income_poverty").await, 0);
}
