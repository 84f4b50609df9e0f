// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ordered, short-circuiting stage chains.

use std::sync::Arc;

use axum::http::request::Parts;

use super::stage::{RequestContext, Stage};
use super::AuthError;

/// Stages guarding one group of operations, run in registration order.
///
/// The first rejection stops the chain: no later stage runs and the
/// handler is never reached. An empty chain lets every request through
/// with an empty context.
#[derive(Clone, Default)]
pub struct StageChain {
    stages: Vec<Arc<dyn Stage>>,
}

impl StageChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage.
    pub fn with(self, stage: impl Stage + 'static) -> Self {
        self.with_shared(Arc::new(stage))
    }

    /// Append a stage that is shared with other chains.
    pub fn with_shared(mut self, stage: Arc<dyn Stage>) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Run every stage against `request`, returning the populated context.
    pub fn run(&self, request: &Parts) -> Result<RequestContext, AuthError> {
        let mut context = RequestContext::new();
        for stage in &self.stages {
            if let Err(rejection) = stage.process(request, &mut context) {
                if rejection.is_unauthenticated() {
                    tracing::debug!(
                        stage = stage.name(),
                        reason = rejection.error_code(),
                        path = %request.uri.path(),
                        "request rejected"
                    );
                } else {
                    tracing::warn!(
                        stage = stage.name(),
                        reason = rejection.error_code(),
                        path = %request.uri.path(),
                        subject_id = context.identity().map(|id| id.subject_id.as_str()),
                        "request forbidden"
                    );
                }
                return Err(rejection);
            }
        }
        Ok(context)
    }
}

impl std::fmt::Debug for StageChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageChain")
            .field("stages", &self.stage_names())
            .finish()
    }
}
