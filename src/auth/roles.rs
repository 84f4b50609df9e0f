// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User roles for authorization.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single role tag carried in a credential.
///
/// ## Matching
///
/// Roles are compared by exact string equality. There is no hierarchy:
/// an `admin` credential does not satisfy a route that requires `user`.
/// Well-known tags are `user` (assigned at registration) and `admin`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    pub const USER: &'static str = "user";
    pub const ADMIN: &'static str = "admin";

    pub fn new(tag: impl Into<String>) -> Self {
        Role(tag.into())
    }

    /// Role given to newly registered users.
    pub fn user() -> Self {
        Role::new(Self::USER)
    }

    pub fn admin() -> Self {
        Role::new(Self::ADMIN)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this role satisfies `required`.
    pub fn satisfies(&self, required: &Role) -> bool {
        self.0 == required.0
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::user()
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Role::new(value)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role(value)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_satisfies() {
        assert!(Role::admin().satisfies(&Role::admin()));
        assert!(Role::user().satisfies(&Role::user()));
    }

    #[test]
    fn admin_does_not_imply_user() {
        assert!(!Role::admin().satisfies(&Role::user()));
        assert!(!Role::user().satisfies(&Role::admin()));
    }

    #[test]
    fn comparison_is_case_sensitive() {
        assert!(!Role::from("Admin").satisfies(&Role::admin()));
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&Role::admin()).unwrap();
        assert_eq!(json, r#""admin""#);
        let back: Role = serde_json::from_str(r#""auditor""#).unwrap();
        assert_eq!(back.as_str(), "auditor");
    }

    #[test]
    fn default_role_is_user() {
        assert_eq!(Role::default(), Role::user());
    }
}
