// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request-gating stages and the per-request context they share.

use axum::http::request::Parts;

use super::claims::ClaimSet;
use super::error::AuthError;

/// `Ok(())` continues the chain, `Err` rejects the request.
pub type StageResult = Result<(), AuthError>;

/// One gating unit in a [`StageChain`](super::StageChain).
///
/// Stages see the request head and the shared context only. They must not
/// reach into each other's state; anything a later stage needs has to be
/// published to the context.
pub trait Stage: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn process(&self, request: &Parts, context: &mut RequestContext) -> StageResult;
}

/// Typed context for a single request.
///
/// The identity slot is written only by the authentication stage; every
/// other stage and the handler read it.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    identity: Option<ClaimSet>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The verified identity, if an authentication stage has run.
    pub fn identity(&self) -> Option<&ClaimSet> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub(super) fn attach_identity(&mut self, claims: ClaimSet) {
        self.identity = Some(claims);
    }
}
