// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints.

use axum::{extract::State, Json};

use crate::{auth::Auth, error::ApiError, models::User, state::AppState, store::StoreError};

/// Get the account behind the presented credential.
///
/// The credential may outlive its account; a deleted account yields 404.
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Missing, malformed, tampered or expired credential"),
        (status = 404, description = "User not found"),
    )
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    Auth(identity): Auth,
) -> Result<Json<User>, ApiError> {
    let user_id: u64 = identity
        .subject_id
        .parse()
        .map_err(|_| ApiError::from(StoreError::UserNotFound))?;
    let user = state.store.read().await.get_user(user_id)?;
    Ok(Json(user))
}
