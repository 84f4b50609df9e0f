// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{guard, Role},
    models::{
        AuthResponse, Item, ItemRequest, LoginRequest, MessageResponse, RegisterRequest,
        UpdateUserRequest, User,
    },
    state::AppState,
};

pub mod admin;
pub mod auth;
pub mod health;
pub mod items;
pub mod users;

/// Build the full application router.
///
/// | Routes | Chain |
/// |---|---|
/// | `/health`, `/api/auth/*` | none |
/// | `/api/users/me`, `/api/items*` | `[authentication]` |
/// | `/api/admin/*` | `[authentication, authorization(admin)]` |
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login));

    let authenticated = guard(
        Router::new()
            .route("/users/me", get(users::get_current_user))
            .route("/items", get(items::list_items).post(items::create_item))
            .route(
                "/items/{id}",
                get(items::get_item)
                    .put(items::update_item)
                    .delete(items::delete_item),
            ),
        state.auth.authenticated(),
    );

    let admin_only = guard(
        Router::new()
            .route("/admin/users", get(admin::list_users))
            .route(
                "/admin/users/{id}",
                get(admin::get_user)
                    .put(admin::update_user)
                    .delete(admin::delete_user),
            ),
        state.auth.requiring_role(Role::admin()),
    );

    let api_routes = public
        .merge(authenticated)
        .merge(admin_only)
        .with_state(state);

    Router::new()
        .route("/health", get(health::health))
        .nest("/api", api_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        auth::register,
        auth::login,
        users::get_current_user,
        items::list_items,
        items::get_item,
        items::create_item,
        items::update_item,
        items::delete_item,
        admin::list_users,
        admin::get_user,
        admin::update_user,
        admin::delete_user
    ),
    components(
        schemas(
            health::HealthResponse,
            Role,
            User,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            UpdateUserRequest,
            Item,
            ItemRequest,
            MessageResponse
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Auth", description = "Registration and credential issuance"),
        (name = "Users", description = "Current user"),
        (name = "Items", description = "Item management"),
        (name = "Admin", description = "User administration (admin role)")
    )
)]
struct ApiDoc;
