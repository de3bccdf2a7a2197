//! Basket item CRUD endpoints
//!
//! Writes are last-write-wins: concurrent updates to one item are not
//! detected, the later request simply overwrites the earlier one.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use ppov_common::db::{BasketItem, BasketItemPatch, NewBasketItem};
use tracing::info;

use crate::db::basket;
use crate::{ApiResult, AppState};

/// POST /v1/basket-items
pub async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<NewBasketItem>,
) -> ApiResult<(StatusCode, Json<BasketItem>)> {
    let item = basket::create(&state.db, &payload).await?;
    info!("Basket item {} created: {}", item.id, item.name);
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /v1/basket-items
pub async fn list_items(State(state): State<AppState>) -> ApiResult<Json<Vec<BasketItem>>> {
    Ok(Json(basket::list(&state.db).await?))
}

/// GET /v1/basket-items/:id
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<BasketItem>> {
    Ok(Json(basket::get(&state.db, id).await?))
}

/// PUT|PATCH /v1/basket-items/:id
///
/// Partial update: only fields present in the body change.
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<BasketItemPatch>,
) -> ApiResult<Json<BasketItem>> {
    let item = basket::update(&state.db, id, &patch).await?;
    info!("Basket item {} updated", id);
    Ok(Json(item))
}

/// DELETE /v1/basket-items/:id
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    basket::delete(&state.db, id).await?;
    info!("Basket item {} deleted", id);
    Ok(StatusCode::NO_CONTENT)
}
