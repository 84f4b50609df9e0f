// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Stateless bearer authentication and role-based authorization.
//!
//! ## Auth Flow
//!
//! 1. `POST /api/auth/register` or `/api/auth/login` issues a credential
//!    signed with the process-wide secret
//! 2. Client sends `Authorization: Bearer <credential>` on every request
//! 3. Protected routes run a [`StageChain`]:
//!    - [`AuthenticationStage`] verifies signature and expiry, then attaches
//!      the [`ClaimSet`] to the request context
//!    - [`AuthorizationStage`] compares the claimed role to the route's role
//! 4. Handlers read the identity with the [`Auth`] extractor
//!
//! ## Security
//!
//! - No server-side sessions; verification needs only the secret and a clock
//! - Signatures are compared in constant time
//! - Tampering and wrong-key failures are both reported as `invalid_signature`
//! - The secret is never logged

pub mod chain;
pub mod claims;
pub mod clock;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod roles;
pub mod stage;
pub mod stages;
pub mod token;

pub use chain::StageChain;
pub use claims::ClaimSet;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::AuthError;
pub use extractor::Auth;
pub use middleware::{enforce_chain, guard};
pub use roles::Role;
pub use stage::{RequestContext, Stage, StageResult};
pub use stages::{AuthenticationStage, AuthorizationStage};
pub use token::{Credential, SigningKey, TokenError};
