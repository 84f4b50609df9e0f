// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Gated API - REST service with a staged request-authentication core
//!
//! Every protected request passes through an ordered chain of stages
//! (authentication, then optionally role authorization) before any handler
//! runs. Credentials are self-contained HMAC-signed tokens carrying the
//! caller's identity and role.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers and router (Axum)
//! - `auth` - Credential codec, stages, chain runner and extractor
//! - `config` - Environment configuration
//! - `store` - In-memory users and items
//! - `password` - Argon2 password hashing

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod password;
pub mod state;
pub mod store;
