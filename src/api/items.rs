// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Item CRUD. Any authenticated caller may read and write items.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::ApiError,
    models::{Item, ItemRequest, MessageResponse, PageQuery},
    state::AppState,
    store::StoreError,
};

const INVALID_ITEM: &str = "Title and price are required";

/// Path IDs that do not parse can never match a record.
fn parse_item_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::from(StoreError::ItemNotFound))
}

fn validated(request: ItemRequest) -> Result<ItemRequest, ApiError> {
    if request.is_valid() {
        Ok(request)
    } else {
        Err(ApiError::bad_request(INVALID_ITEM))
    }
}

#[utoipa::path(
    get,
    path = "/api/items",
    tag = "Items",
    security(("bearer" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Page of items", body = Vec<Item>),
        (status = 401, description = "Unauthenticated"),
    )
)]
pub async fn list_items(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Json<Vec<Item>> {
    let items = state
        .store
        .read()
        .await
        .list_items(page.limit(), page.offset());
    Json(items)
}

#[utoipa::path(
    get,
    path = "/api/items/{id}",
    tag = "Items",
    security(("bearer" = [])),
    params(("id" = u64, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item", body = Item),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Item not found"),
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>, ApiError> {
    let id = parse_item_id(&id)?;
    let item = state.store.read().await.get_item(id)?;
    Ok(Json(item))
}

#[utoipa::path(
    post,
    path = "/api/items",
    tag = "Items",
    security(("bearer" = [])),
    request_body = ItemRequest,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, description = "Title and price are required"),
        (status = 401, description = "Unauthenticated"),
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    Json(request): Json<ItemRequest>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let request = validated(request)?;
    let item = state.store.write().await.create_item(request);
    tracing::info!(item_id = item.id, "Item created");
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    put,
    path = "/api/items/{id}",
    tag = "Items",
    security(("bearer" = [])),
    params(("id" = u64, Path, description = "Item ID")),
    request_body = ItemRequest,
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 400, description = "Title and price are required"),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Item not found"),
    )
)]
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ItemRequest>,
) -> Result<Json<Item>, ApiError> {
    let id = parse_item_id(&id)?;
    let request = validated(request)?;
    let item = state.store.write().await.update_item(id, request)?;
    Ok(Json(item))
}

#[utoipa::path(
    delete,
    path = "/api/items/{id}",
    tag = "Items",
    security(("bearer" = [])),
    params(("id" = u64, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item deleted", body = MessageResponse),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Item not found"),
    )
)]
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_item_id(&id)?;
    state.store.write().await.delete_item(id)?;
    tracing::info!(item_id = id, "Item deleted");
    Ok(Json(MessageResponse::new("Item deleted")))
}
