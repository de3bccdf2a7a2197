//! Basket item persistence
//!
//! The only writer of `basket_item`. Each operation is a single statement;
//! concurrent updates of one item are last-write-wins.

use ppov_common::db::{decode_decimal, BasketItem, BasketItemPatch, NewBasketItem};
use ppov_common::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

const SELECT_COLUMNS: &str = "SELECT id, name, unit_price, quantity, category, currency, notes FROM basket_item";

fn item_from_row(row: &SqliteRow) -> Result<BasketItem> {
    let unit_price: String = row.get("unit_price");

    Ok(BasketItem {
        id: row.get("id"),
        name: row.get("name"),
        unit_price: decode_decimal("unit_price", &unit_price)?,
        quantity: row.get("quantity"),
        category: row.get("category"),
        currency: row.get("currency"),
        notes: row.get("notes"),
    })
}

/// Translate a UNIQUE(name) violation into a conflict
fn map_write_error(err: sqlx::Error, name: &str) -> Error {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            Error::Conflict(format!("Item name '{}' already exists", name))
        }
        _ => Error::Database(err),
    }
}

fn not_found(id: i64) -> Error {
    Error::NotFound(format!("Basket item {} not found", id))
}

/// Insert a new basket item and return it with its assigned id
pub async fn create(pool: &SqlitePool, new: &NewBasketItem) -> Result<BasketItem> {
    new.validate()?;

    let result = sqlx::query(
        r#"
        INSERT INTO basket_item (name, unit_price, quantity, category, currency, notes)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(new.name.trim())
    .bind(new.unit_price.to_string())
    .bind(new.quantity)
    .bind(&new.category)
    .bind(&new.currency)
    .bind(&new.notes)
    .execute(pool)
    .await
    .map_err(|e| map_write_error(e, &new.name))?;

    let id = result.last_insert_rowid();
    debug!("Created basket item {} ({})", id, new.name);

    get(pool, id).await
}

/// Load one basket item
pub async fn get(pool: &SqlitePool, id: i64) -> Result<BasketItem> {
    let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found(id))?;

    item_from_row(&row)
}

/// All basket items ordered by id
pub async fn list(pool: &SqlitePool) -> Result<Vec<BasketItem>> {
    let rows = sqlx::query(&format!("{} ORDER BY id ASC", SELECT_COLUMNS))
        .fetch_all(pool)
        .await?;

    rows.iter().map(item_from_row).collect()
}

/// Load several items by id, preserving the requested order
///
/// Fails with `NotFound` naming the first id that does not exist.
pub async fn get_many(pool: &SqlitePool, ids: &[i64]) -> Result<Vec<BasketItem>> {
    let mut items = Vec::with_capacity(ids.len());
    for &id in ids {
        items.push(get(pool, id).await?);
    }
    Ok(items)
}

/// Apply a partial update; only patched fields change
pub async fn update(pool: &SqlitePool, id: i64, patch: &BasketItemPatch) -> Result<BasketItem> {
    patch.validate()?;

    let mut item = get(pool, id).await?;
    patch.apply(&mut item);

    let result = sqlx::query(
        r#"
        UPDATE basket_item
        SET name = ?, unit_price = ?, quantity = ?, category = ?, currency = ?, notes = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        "#,
    )
    .bind(item.name.trim())
    .bind(item.unit_price.to_string())
    .bind(item.quantity)
    .bind(&item.category)
    .bind(&item.currency)
    .bind(&item.notes)
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| map_write_error(e, &item.name))?;

    // Deleted between the read and the write
    if result.rows_affected() == 0 {
        return Err(not_found(id));
    }

    debug!("Updated basket item {}", id);
    get(pool, id).await
}

/// Delete a basket item
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM basket_item WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(not_found(id));
    }

    debug!("Deleted basket item {}", id);
    Ok(())
}
