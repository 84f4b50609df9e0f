// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Claims carried inside a credential.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::roles::Role;

/// The payload of a credential.
///
/// Once verified and attached to a request this is the caller's
/// authenticated identity. `subject_name` is informational only and is
/// never consulted for authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ClaimSet {
    /// Stable identifier of the principal (user record ID)
    pub subject_id: String,

    /// Display name (username)
    pub subject_name: String,

    /// Single role tag used for authorization
    pub role: Role,

    /// Issued at (Unix seconds)
    pub issued_at: i64,

    /// Expiration (Unix seconds, exclusive)
    pub expires_at: i64,
}

impl ClaimSet {
    /// Build claims valid for `ttl_secs` starting at `now`.
    ///
    /// A non-positive TTL is raised to one second so that
    /// `expires_at > issued_at` always holds.
    pub fn new(
        subject_id: impl Into<String>,
        subject_name: impl Into<String>,
        role: Role,
        now: i64,
        ttl_secs: i64,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            subject_name: subject_name.into(),
            role,
            issued_at: now,
            expires_at: now.saturating_add(ttl_secs.max(1)),
        }
    }

    /// `true` once `now` has reached `expires_at`.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.expires_at
    }

    /// `issued_at <= now < expires_at`
    pub fn is_valid_at(&self, now: i64) -> bool {
        self.issued_at <= now && !self.is_expired_at(now)
    }
}
