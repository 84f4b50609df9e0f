// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies for the REST API. All types derive
//! `Serialize`/`Deserialize` and `ToSchema` for JSON handling and OpenAPI
//! documentation.
//!
//! ## Model Categories
//!
//! - **Auth**: registration, login, issued credentials
//! - **Users**: public view of an account (never includes the password hash)
//! - **Items**: catalogue entries
//! - **Paging**: `limit`/`offset` query parameters

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::auth::Role;

// =============================================================================
// Users
// =============================================================================

/// A registered account as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating an account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

/// Admin update of an account. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

// =============================================================================
// Auth
// =============================================================================

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Issued credential plus the account it was issued for.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthResponse {
    /// Bearer credential for the `Authorization` header
    pub token: String,
    pub user: User,
}

// =============================================================================
// Items
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Item {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for creating or replacing an item.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ItemRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
}

impl ItemRequest {
    /// Title must be non-blank and price strictly positive.
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && self.price > 0.0 && self.price.is_finite()
    }
}

// =============================================================================
// Shared
// =============================================================================

pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// Paging parameters.
///
/// Values are kept as raw strings so that a bad value falls back to the
/// default instead of failing the request: a missing, unparsable or
/// non-positive limit means 10, and a missing, unparsable or negative
/// offset means 0.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    #[param(value_type = Option<i64>)]
    pub limit: Option<String>,
    #[param(value_type = Option<i64>)]
    pub offset: Option<String>,
}

impl PageQuery {
    pub fn limit(&self) -> usize {
        match parse_non_negative(self.limit.as_deref()) {
            Some(limit) if limit > 0 => limit,
            _ => DEFAULT_PAGE_LIMIT,
        }
    }

    pub fn offset(&self) -> usize {
        parse_non_negative(self.offset.as_deref()).unwrap_or(0)
    }
}

fn parse_non_negative(raw: Option<&str>) -> Option<usize> {
    let value: i64 = raw?.trim().parse().ok()?;
    usize::try_from(value).ok()
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_query_defaults() {
        let q = PageQuery::default();
        assert_eq!(q.limit(), DEFAULT_PAGE_LIMIT);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn page_query_clamps_bad_values() {
        let q = PageQuery {
            limit: Some("0".into()),
            offset: Some("-3".into()),
        };
        assert_eq!(q.limit(), DEFAULT_PAGE_LIMIT);
        assert_eq!(q.offset(), 0);

        let q = PageQuery {
            limit: Some("25".into()),
            offset: Some("5".into()),
        };
        assert_eq!(q.limit(), 25);
        assert_eq!(q.offset(), 5);
    }

    #[test]
    fn page_query_ignores_unparsable_values() {
        let q = PageQuery {
            limit: Some("abc".into()),
            offset: Some("99999999999999999999".into()),
        };
        assert_eq!(q.limit(), DEFAULT_PAGE_LIMIT);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn item_request_validation() {
        let ok = ItemRequest {
            title: "Lamp".into(),
            description: String::new(),
            price: 19.99,
        };
        assert!(ok.is_valid());

        let no_title = ItemRequest {
            title: "  ".into(),
            ..ok.clone()
        };
        assert!(!no_title.is_valid());

        let free = ItemRequest { price: 0.0, ..ok };
        assert!(!free.is_valid());
    }

    #[test]
    fn register_request_names_are_optional() {
        let req: RegisterRequest =
            serde_json::from_str(r#"{"username":"a","email":"a@x.io","password":"pw"}"#).unwrap();
        assert!(req.first_name.is_empty());
        assert!(req.last_name.is_empty());
    }
}
