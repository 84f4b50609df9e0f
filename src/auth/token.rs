// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Credential codec.
//!
//! A credential is an HS256 JWT whose payload is a [`ClaimSet`]:
//!
//! ```text
//! base64url(header) . base64url(claims) . base64url(HMAC-SHA256(secret, seg0 "." seg1))
//! ```
//!
//! Verification needs nothing but the credential, the signing secret and
//! the current time, so any process holding the secret can verify any
//! credential issued by any other. Time checks use the caller's clock, not
//! the library's.

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use super::claims::ClaimSet;
use super::roles::Role;

/// Signature algorithm advertised in the header segment.
pub const ALGORITHM: Algorithm = Algorithm::HS256;

/// Credential verification failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("credential is malformed")]
    Malformed,
    #[error("credential signature is invalid")]
    InvalidSignature,
    #[error("credential has expired")]
    Expired,
    #[error("credential is not yet valid")]
    NotYetValid,
}

/// Signing key construction failures.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("signing secret must not be empty")]
    Empty,
}

#[derive(Debug, thiserror::Error)]
#[error("failed to sign credential: {0}")]
pub struct IssueError(#[from] jsonwebtoken::errors::Error);

/// Process-wide signing secret.
///
/// `Debug` never prints key material.
#[derive(Clone)]
pub struct SigningKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl SigningKey {
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, KeyError> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(KeyError::Empty);
        }

        // Expiry and not-before are checked against the injected clock in
        // `verify`, so the library's own time checks stay off.
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        })
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}

/// An issued, signed credential. Never mutated after issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Issue a credential for a principal, valid from `now` for `ttl_secs`.
pub fn issue(
    subject_id: impl Into<String>,
    subject_name: impl Into<String>,
    role: Role,
    now: i64,
    ttl_secs: i64,
    key: &SigningKey,
) -> Result<Credential, IssueError> {
    let claims = ClaimSet::new(subject_id, subject_name, role, now, ttl_secs);
    encode_claims(&claims, key)
}

/// Sign an already-built claim set.
pub fn encode_claims(claims: &ClaimSet, key: &SigningKey) -> Result<Credential, IssueError> {
    let token = encode(&Header::new(ALGORITHM), claims, &key.encoding)?;
    Ok(Credential(token))
}

/// Verify a credential and return its claims.
///
/// The signature is checked before the claims are parsed, so a tampered
/// payload is reported as `InvalidSignature` rather than `Malformed`.
pub fn verify(credential: &str, now: i64, key: &SigningKey) -> Result<ClaimSet, TokenError> {
    if credential.split('.').count() != 3 {
        return Err(TokenError::Malformed);
    }

    let claims = decode::<ClaimSet>(credential, &key.decoding, &key.validation)
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::Malformed,
        })?
        .claims;

    if claims.expires_at <= claims.issued_at {
        return Err(TokenError::Malformed);
    }
    if claims.is_expired_at(now) {
        return Err(TokenError::Expired);
    }
    if now < claims.issued_at {
        return Err(TokenError::NotYetValid);
    }

    Ok(claims)
}
