// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::{
    token::{self, IssueError, KeyError},
    AuthenticationStage, AuthorizationStage, Clock, Credential, Role, SigningKey, StageChain,
    SystemClock,
};
use crate::config::{AppConfig, SeedAdmin};
use crate::models::{NewUser, User};
use crate::password::{self, PasswordError};
use crate::store::{InMemoryStore, StoreError};

/// Credential settings shared by issuance and every authentication stage.
///
/// The signing key is immutable for the life of the process and shared
/// read-only by all in-flight requests.
#[derive(Clone)]
pub struct AuthConfig {
    signing_key: Arc<SigningKey>,
    token_ttl_secs: i64,
    clock: Arc<dyn Clock>,
}

impl AuthConfig {
    pub fn new(secret: &str, token_ttl_secs: i64) -> Result<Self, KeyError> {
        Ok(Self {
            signing_key: Arc::new(SigningKey::new(secret)?),
            token_ttl_secs,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the wall clock, e.g. with a `ManualClock` in tests.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Issue a credential for `user`, valid from now for the configured TTL.
    pub fn issue(&self, user: &User) -> Result<Credential, IssueError> {
        token::issue(
            user.id.to_string(),
            user.username.clone(),
            user.role.clone(),
            self.clock.now(),
            self.token_ttl_secs,
            &self.signing_key,
        )
    }

    pub fn authentication_stage(&self) -> AuthenticationStage {
        AuthenticationStage::new(self.signing_key.clone(), self.clock.clone())
    }

    /// `[authentication]`
    pub fn authenticated(&self) -> StageChain {
        StageChain::new().with(self.authentication_stage())
    }

    /// `[authentication, authorization(role)]`
    pub fn requiring_role(&self, role: Role) -> StageChain {
        self.authenticated().with(AuthorizationStage::new(role))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryStore>>,
    pub auth: AuthConfig,
}

impl AppState {
    pub fn new(store: InMemoryStore, auth: AuthConfig) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            auth,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, KeyError> {
        let auth = AuthConfig::new(&config.jwt_secret, config.token_ttl_secs())?;
        Ok(Self::new(InMemoryStore::new(), auth))
    }

    /// Create the bootstrap admin unless the username is already taken.
    ///
    /// Returns `true` when a new account was created.
    pub async fn seed_admin(&self, seed: &SeedAdmin) -> Result<bool, SeedError> {
        if self.store.read().await.credentials_for(&seed.username).is_some() {
            return Ok(false);
        }

        let password_hash = password::hash_password_blocking(seed.password.clone()).await?;
        let user = self.store.write().await.create_user(NewUser {
            username: seed.username.clone(),
            email: format!("{}@localhost", seed.username),
            password_hash,
            first_name: String::new(),
            last_name: String::new(),
            role: Role::admin(),
        })?;
        tracing::info!(user_id = user.id, username = %user.username, "Seeded admin account");
        Ok(true)
    }
}

#[cfg(test)]
impl AppState {
    /// State with a fixed test secret and a one-hour TTL.
    pub(crate) fn for_tests(clock: Arc<dyn Clock>) -> Self {
        let auth = AuthConfig::new("test-signing-secret", 3600)
            .expect("valid test secret")
            .with_clock(clock);
        Self::new(InMemoryStore::new(), auth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::ManualClock;
    use chrono::Utc;

    const NOW: i64 = 1_700_000_000;

    fn user(role: Role) -> User {
        User {
            id: 42,
            username: "alice".into(),
            email: "a@x.io".into(),
            first_name: String::new(),
            last_name: String::new(),
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn issue_uses_clock_and_ttl() {
        let state = AppState::for_tests(Arc::new(ManualClock::new(NOW)));
        let credential = state.auth.issue(&user(Role::user())).unwrap();

        let claims = token::verify(credential.as_str(), NOW, &state.auth.signing_key).unwrap();
        assert_eq!(claims.subject_id, "42");
        assert_eq!(claims.subject_name, "alice");
        assert_eq!(claims.issued_at, NOW);
        assert_eq!(claims.expires_at, NOW + 3600);
    }

    #[test]
    fn chains_have_expected_stages() {
        let state = AppState::for_tests(Arc::new(ManualClock::new(NOW)));
        assert_eq!(state.auth.authenticated().stage_names(), vec!["authentication"]);
        assert_eq!(
            state.auth.requiring_role(Role::admin()).stage_names(),
            vec!["authentication", "authorization"]
        );
    }

    #[tokio::test]
    async fn seed_admin_is_idempotent() {
        let state = AppState::for_tests(Arc::new(ManualClock::new(NOW)));
        let seed = SeedAdmin {
            username: "root".into(),
            password: "hunter2".into(),
        };
        assert!(state.seed_admin(&seed).await.unwrap());
        assert!(!state.seed_admin(&seed).await.unwrap());

        let (user, _) = state.store.read().await.credentials_for("root").unwrap();
        assert_eq!(user.role, Role::admin());
    }
}
