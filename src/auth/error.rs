// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication and authorization rejections.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::token::TokenError;

/// Rejection produced by a stage.
///
/// Every variant except `Forbidden` is an unauthenticated outcome (401).
/// Codec failures keep their specific kind so logs and clients get a
/// stable reason, while the status stays uniform.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No `Authorization` header present
    #[error("Authorization header is required")]
    MissingCredential,
    /// Header is not exactly `Bearer <token>`
    #[error("Authorization header format must be 'Bearer <token>'")]
    MalformedHeader,
    /// Credential could not be decoded
    #[error("Token is malformed")]
    MalformedToken,
    /// Signature mismatch (tampering and wrong key are not distinguished)
    #[error("Token signature is invalid")]
    InvalidSignature,
    /// `now >= expires_at`
    #[error("Token has expired")]
    TokenExpired,
    /// `now < issued_at`
    #[error("Token is not yet valid")]
    TokenNotYetValid,
    /// An authorization check ran with no identity in context
    #[error("Authentication is required")]
    Unauthenticated,
    /// Identity present but the role does not match
    #[error("Insufficient permissions for this operation")]
    Forbidden,
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Machine-stable reason string.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "missing_credential",
            AuthError::MalformedHeader => "malformed_header",
            AuthError::MalformedToken => "malformed_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::TokenExpired => "token_expired",
            AuthError::TokenNotYetValid => "token_not_yet_valid",
            AuthError::Unauthenticated => "unauthenticated",
            AuthError::Forbidden => "forbidden",
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        !matches!(self, AuthError::Forbidden)
    }

    pub fn status_code(&self) -> StatusCode {
        if self.is_unauthenticated() {
            StatusCode::UNAUTHORIZED
        } else {
            StatusCode::FORBIDDEN
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Malformed => AuthError::MalformedToken,
            TokenError::InvalidSignature => AuthError::InvalidSignature,
            TokenError::Expired => AuthError::TokenExpired,
            TokenError::NotYetValid => AuthError::TokenNotYetValid,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}
