// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Public registration and login endpoints. Both issue a credential.

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    auth::Role,
    error::ApiError,
    models::{AuthResponse, LoginRequest, NewUser, RegisterRequest, User},
    password,
    state::AppState,
};

const INVALID_LOGIN: &str = "Invalid username or password";

/// Register a new account with the `user` role.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Missing username, email or password"),
        (status = 409, description = "Username or email already exists"),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    if request.username.is_empty() || request.email.is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request(
            "Username, email, and password are required",
        ));
    }

    let password_hash = password::hash_password_blocking(request.password)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let user = state.store.write().await.create_user(NewUser {
        username: request.username,
        email: request.email,
        password_hash,
        first_name: request.first_name,
        last_name: request.last_name,
        role: Role::user(),
    })?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");
    Ok((StatusCode::CREATED, Json(issue_response(&state, user)?)))
}

/// Exchange username and password for a credential.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credential issued", body = AuthResponse),
        (status = 400, description = "Missing username or password"),
        (status = 401, description = "Invalid username or password"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    if request.username.is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request("Username and password are required"));
    }

    let Some((user, password_hash)) = state.store.read().await.credentials_for(&request.username)
    else {
        tracing::debug!(username = %request.username, "Login for unknown user");
        return Err(ApiError::unauthorized(INVALID_LOGIN));
    };

    if !password::verify_password_blocking(request.password, password_hash).await {
        tracing::debug!(user_id = user.id, "Login with wrong password");
        return Err(ApiError::unauthorized(INVALID_LOGIN));
    }

    Ok(Json(issue_response(&state, user)?))
}

fn issue_response(state: &AppState, user: User) -> Result<AuthResponse, ApiError> {
    let token = state
        .auth
        .issue(&user)
        .map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(AuthResponse {
        token: token.into_string(),
        user,
    })
}
