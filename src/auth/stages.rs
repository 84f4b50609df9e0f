// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication and authorization stages.

use std::sync::Arc;

use axum::http::{header::AUTHORIZATION, request::Parts, HeaderMap};

use super::clock::Clock;
use super::stage::{RequestContext, Stage, StageResult};
use super::token::{self, SigningKey};
use super::{AuthError, ClaimSet, Role};

const BEARER_SCHEME: &str = "Bearer";

/// Verifies the bearer credential and attaches the identity to context.
#[derive(Clone)]
pub struct AuthenticationStage {
    key: Arc<SigningKey>,
    clock: Arc<dyn Clock>,
}

impl AuthenticationStage {
    pub fn new(key: Arc<SigningKey>, clock: Arc<dyn Clock>) -> Self {
        Self { key, clock }
    }

    /// Verify the `Authorization` header(s) of a request.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<ClaimSet, AuthError> {
        let token = bearer_token(headers)?;
        token::verify(token, self.clock.now(), &self.key).map_err(AuthError::from)
    }
}

impl Stage for AuthenticationStage {
    fn name(&self) -> &'static str {
        "authentication"
    }

    fn process(&self, request: &Parts, context: &mut RequestContext) -> StageResult {
        let claims = self.authenticate(&request.headers)?;
        context.attach_identity(claims);
        Ok(())
    }
}

/// Extract `<token>` from a single `Bearer <token>` header.
///
/// The value must split on single spaces into exactly two segments, the
/// first being literally `Bearer`. More than one header is rejected.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let mut values = headers.get_all(AUTHORIZATION).iter();
    let value = values.next().ok_or(AuthError::MissingCredential)?;
    if values.next().is_some() {
        return Err(AuthError::MalformedHeader);
    }

    let value = value.to_str().map_err(|_| AuthError::MalformedHeader)?;
    match value.split(' ').collect::<Vec<_>>().as_slice() {
        [BEARER_SCHEME, token] => Ok(*token),
        _ => Err(AuthError::MalformedHeader),
    }
}

/// Lets the request through only when the identity's role equals `required`.
#[derive(Debug, Clone)]
pub struct AuthorizationStage {
    required: Role,
}

impl AuthorizationStage {
    pub fn new(required: Role) -> Self {
        Self { required }
    }

    pub fn authorize(&self, identity: Option<&ClaimSet>) -> StageResult {
        let identity = identity.ok_or(AuthError::Unauthenticated)?;
        if identity.role.satisfies(&self.required) {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }
}

impl Stage for AuthorizationStage {
    fn name(&self) -> &'static str {
        "authorization"
    }

    fn process(&self, _request: &Parts, context: &mut RequestContext) -> StageResult {
        self.authorize(context.identity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::clock::ManualClock;
    use axum::http::Request;

    const NOW: i64 = 1_700_000_000;

    fn key() -> Arc<SigningKey> {
        Arc::new(SigningKey::new("stage-test-secret").unwrap())
    }

    fn stage_at(now: i64) -> AuthenticationStage {
        AuthenticationStage::new(key(), Arc::new(ManualClock::new(now)))
    }

    fn parts_with_header(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/test");
        if let Some(value) = value {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    fn credential(role: Role) -> String {
        token::issue("42", "alice", role, NOW, 3600, &key())
            .unwrap()
            .into_string()
    }

    #[test]
    fn missing_header_is_rejected() {
        let parts = parts_with_header(None);
        let mut ctx = RequestContext::new();
        assert_eq!(
            stage_at(NOW).process(&parts, &mut ctx),
            Err(AuthError::MissingCredential)
        );
        assert!(!ctx.is_authenticated());
    }

    #[test]
    fn non_bearer_headers_are_malformed() {
        let token = credential(Role::user());
        for value in [
            format!("Basic {token}"),
            format!("bearer {token}"),
            format!("Bearer  {token}"),
            format!("Bearer {token} extra"),
            token.clone(),
        ] {
            let parts = parts_with_header(Some(&value));
            let mut ctx = RequestContext::new();
            assert_eq!(
                stage_at(NOW).process(&parts, &mut ctx),
                Err(AuthError::MalformedHeader),
                "{value}"
            );
        }
    }

    #[test]
    fn duplicate_headers_are_malformed() {
        let token = credential(Role::user());
        let mut parts = parts_with_header(Some(&format!("Bearer {token}")));
        parts
            .headers
            .append(AUTHORIZATION, format!("Bearer {token}").parse().unwrap());
        let mut ctx = RequestContext::new();
        assert_eq!(
            stage_at(NOW).process(&parts, &mut ctx),
            Err(AuthError::MalformedHeader)
        );
    }

    #[test]
    fn valid_bearer_attaches_identity() {
        let parts = parts_with_header(Some(&format!("Bearer {}", credential(Role::user()))));
        let mut ctx = RequestContext::new();
        stage_at(NOW + 60).process(&parts, &mut ctx).unwrap();

        let identity = ctx.identity().unwrap();
        assert_eq!(identity.subject_id, "42");
        assert_eq!(identity.role, Role::user());
    }

    #[test]
    fn codec_failure_surfaces_kind() {
        let parts = parts_with_header(Some(&format!("Bearer {}", credential(Role::user()))));
        let mut ctx = RequestContext::new();
        assert_eq!(
            stage_at(NOW + 3600).process(&parts, &mut ctx),
            Err(AuthError::TokenExpired)
        );

        let parts = parts_with_header(Some("Bearer not-a-token"));
        assert_eq!(
            stage_at(NOW).process(&parts, &mut ctx),
            Err(AuthError::MalformedToken)
        );
    }

    #[test]
    fn authorization_without_identity_is_unauthenticated() {
        let parts = parts_with_header(None);
        let mut ctx = RequestContext::new();
        assert_eq!(
            AuthorizationStage::new(Role::admin()).process(&parts, &mut ctx),
            Err(AuthError::Unauthenticated)
        );
    }

    #[test]
    fn authorization_gates_on_exact_role() {
        let user = ClaimSet::new("42", "alice", Role::user(), NOW, 3600);
        let admin = ClaimSet::new("1", "root", Role::admin(), NOW, 3600);
        let admin_only = AuthorizationStage::new(Role::admin());
        let user_only = AuthorizationStage::new(Role::user());

        assert_eq!(admin_only.authorize(Some(&user)), Err(AuthError::Forbidden));
        assert_eq!(admin_only.authorize(Some(&admin)), Ok(()));
        assert_eq!(user_only.authorize(Some(&admin)), Err(AuthError::Forbidden));
    }
}
