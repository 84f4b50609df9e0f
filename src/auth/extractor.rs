// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for the authenticated identity.
//!
//! Use the `Auth` extractor in handlers behind an authentication chain:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(identity): Auth) -> impl IntoResponse {
//!     // identity is the verified ClaimSet
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use super::stage::RequestContext;
use super::{AuthError, ClaimSet};

/// The identity attached by the authentication stage.
///
/// Rejects with `Unauthenticated` when the route was not guarded by a
/// chain that authenticated the request.
#[derive(Debug, Clone)]
pub struct Auth(pub ClaimSet);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .and_then(RequestContext::identity)
            .cloned()
            .map(Auth)
            .ok_or(AuthError::Unauthenticated)
    }
}
