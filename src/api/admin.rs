// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Admin-only user management.
//!
//! Every route here sits behind `[authentication, authorization(admin)]`,
//! so handlers never re-check the caller's role.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    auth::Auth,
    error::ApiError,
    models::{MessageResponse, PageQuery, UpdateUserRequest, User},
    state::AppState,
    store::StoreError,
};

fn parse_user_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::from(StoreError::UserNotFound))
}

#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "Admin",
    security(("bearer" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Page of users", body = Vec<User>),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Admin role required"),
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Json<Vec<User>> {
    let users = state
        .store
        .read()
        .await
        .list_users(page.limit(), page.offset());
    Json(users)
}

#[utoipa::path(
    get,
    path = "/api/admin/users/{id}",
    tag = "Admin",
    security(("bearer" = [])),
    params(("id" = u64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "User not found"),
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let id = parse_user_id(&id)?;
    let user = state.store.read().await.get_user(id)?;
    Ok(Json(user))
}

/// Change profile fields, email or role. Omitted fields are left as-is.
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}",
    tag = "Admin",
    security(("bearer" = [])),
    params(("id" = u64, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already in use"),
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Auth(admin): Auth,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    let id = parse_user_id(&id)?;
    let role_change = request.role.clone();
    let user = state.store.write().await.update_user(id, request)?;

    if let Some(role) = role_change {
        tracing::info!(
            admin_id = %admin.subject_id,
            user_id = id,
            role = %role,
            "User role changed"
        );
    }
    Ok(Json(user))
}

#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    tag = "Admin",
    security(("bearer" = [])),
    params(("id" = u64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "User not found"),
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Auth(admin): Auth,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_user_id(&id)?;
    state.store.write().await.delete_user(id)?;
    tracing::info!(admin_id = %admin.subject_id, user_id = id, "User deleted");
    Ok(Json(MessageResponse::new("User deleted")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{ClaimSet, ManualClock, Role};
    use crate::models::NewUser;
    use axum::http::StatusCode;
    use std::sync::Arc;

    const NOW: i64 = 1_700_000_000;

    fn admin() -> Auth {
        Auth(ClaimSet::new("1", "root", Role::admin(), NOW, 3600))
    }

    async fn seeded() -> (AppState, User) {
        let state = AppState::for_tests(Arc::new(ManualClock::new(NOW)));
        let user = state
            .store
            .write()
            .await
            .create_user(NewUser {
                username: "bob".into(),
                email: "b@x.io".into(),
                password_hash: "hash".into(),
                first_name: "Bob".into(),
                last_name: "B".into(),
                role: Role::user(),
            })
            .unwrap();
        (state, user)
    }

    #[tokio::test]
    async fn list_and_get() {
        let (state, bob) = seeded().await;
        let Json(users) = list_users(State(state.clone()), Query(PageQuery::default())).await;
        assert_eq!(users, vec![bob.clone()]);

        let Json(fetched) = get_user(State(state), Path(bob.id.to_string())).await.unwrap();
        assert_eq!(fetched, bob);
    }

    #[tokio::test]
    async fn promote_to_admin() {
        let (state, bob) = seeded().await;
        let Json(updated) = update_user(
            State(state),
            admin(),
            Path(bob.id.to_string()),
            Json(UpdateUserRequest {
                role: Some(Role::admin()),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
        assert_eq!(updated.role, Role::admin());
        assert_eq!(updated.first_name, "Bob");
    }

    #[tokio::test]
    async fn delete_then_missing() {
        let (state, bob) = seeded().await;
        let Json(body) = delete_user(State(state.clone()), admin(), Path(bob.id.to_string()))
            .await
            .unwrap();
        assert_eq!(body.message, "User deleted");

        let err = get_user(State(state), Path(bob.id.to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "User not found");
    }
}
