//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! All expensive resources (JWT keys, the auth service and its store
//! handle) are built once here; cloning the state afterwards is just
//! Arc increments, and it is immutable during request handling.

use crate::auth::JwtService;
use crate::config::AppConfig;
use crate::services::AuthService;
use crate::store::CredentialStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Auth service, sole owner of the credential store
    auth: Arc<AuthService>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Pre-computes the JWT keys from the configured secret; call once
    /// at startup.
    pub fn new(config: AppConfig) -> Self {
        let store = CredentialStore::new(&config.store.path);
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.token_expiry_secs);
        let auth = AuthService::new(store, jwt, config.password.hash_cost);

        Self {
            auth: Arc::new(auth),
            config: Arc::new(config),
        }
    }

    /// Get a reference to the auth service
    #[inline]
    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
