// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum adapter for [`StageChain`].
//!
//! ```rust,ignore
//! let chain = StageChain::new()
//!     .with(auth.authentication_stage())
//!     .with(AuthorizationStage::new(Role::admin()));
//!
//! let admin = guard(
//!     Router::new().route("/admin/users", get(list_users)),
//!     chain,
//! );
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};

use super::chain::StageChain;

/// Run the chain before the handler.
///
/// On success the [`RequestContext`](super::RequestContext) is stored in
/// the request extensions for extractors; on rejection the rejection is the
/// response.
pub async fn enforce_chain(
    State(chain): State<Arc<StageChain>>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();
    match chain.run(&parts) {
        Ok(context) => {
            parts.extensions.insert(context);
            next.run(Request::from_parts(parts, body)).await
        }
        Err(rejection) => rejection.into_response(),
    }
}

/// Put every route of `router` behind `chain`.
///
/// Uses `route_layer`, so unmatched paths still produce 404 rather than a
/// rejection.
pub fn guard<S>(router: Router<S>, chain: StageChain) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(
        Arc::new(chain),
        enforce_chain,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::clock::ManualClock;
    use crate::auth::token::{self, SigningKey};
    use crate::auth::{Auth, AuthenticationStage, AuthorizationStage, Role};
    use axum::{body::Body, http::StatusCode, routing::get};
    use tower::ServiceExt;

    const NOW: i64 = 1_700_000_000;

    fn key() -> Arc<SigningKey> {
        Arc::new(SigningKey::new("middleware-test-secret").unwrap())
    }

    async fn whoami(Auth(identity): Auth) -> String {
        identity.subject_id
    }

    fn app(required: Role) -> Router {
        let chain = StageChain::new()
            .with(AuthenticationStage::new(key(), Arc::new(ManualClock::new(NOW))))
            .with(AuthorizationStage::new(required));
        guard(Router::new().route("/whoami", get(whoami)), chain)
    }

    fn request(authorization: Option<String>) -> Request {
        let mut builder = axum::http::Request::builder().uri("/whoami");
        if let Some(value) = authorization {
            builder = builder.header("Authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn passes_identity_to_handler() {
        let token = token::issue("42", "alice", Role::user(), NOW, 60, &key()).unwrap();
        let response = app(Role::user())
            .oneshot(request(Some(format!("Bearer {token}"))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"42");
    }

    #[tokio::test]
    async fn missing_header_is_401() {
        let response = app(Role::user()).oneshot(request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn wrong_role_is_403() {
        let token = token::issue("42", "alice", Role::user(), NOW, 60, &key()).unwrap();
        let response = app(Role::admin())
            .oneshot(request(Some(format!("Bearer {token}"))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
