//! Credential verification and token issuance
//!
//! The service owns the credential store exclusively and is stateless
//! between calls apart from its configuration (hash cost, JWT service).
//!
//! # Concurrency
//!
//! Registration is a read-modify-write of the full store image. The
//! load → uniqueness check → save cycle runs under a single async mutex,
//! so concurrent signups for the same email cannot both pass the check.
//! Login takes no lock: saves are atomic renames, so an unlocked read
//! always sees a consistent image.

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::store::{CredentialStore, UserRecord};
use crate::types::{LoginRequest, SignupRequest};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Auth service: validates input, enforces uniqueness, hashes and
/// verifies passwords, and issues tokens.
pub struct AuthService {
    store: CredentialStore,
    jwt: JwtService,
    hash_cost: u32,
    register_lock: Mutex<()>,
}

impl AuthService {
    /// Construct the service from explicit configuration; nothing is
    /// read from the environment past this point.
    pub fn new(store: CredentialStore, jwt: JwtService, hash_cost: u32) -> Self {
        Self {
            store,
            jwt,
            hash_cost,
            register_lock: Mutex::new(()),
        }
    }

    /// Register a new user.
    ///
    /// Terminal failures: `Validation` when any field is empty,
    /// `Conflict` when the email is already taken (exact, case-sensitive
    /// match), `Storage` when the backing file cannot be read or written.
    pub async fn register(&self, req: SignupRequest) -> Result<(), ApiError> {
        if req.first_name.is_empty()
            || req.last_name.is_empty()
            || req.email.is_empty()
            || req.password.is_empty()
        {
            return Err(ApiError::Validation("all fields are required".to_string()));
        }

        // Lock spans load, check, and save; the hash runs inside it so the
        // uniqueness check still precedes the expensive work, and the hold
        // time is bounded by one bcrypt evaluation.
        let _guard = self.register_lock.lock().await;

        let mut users = self.store.load_all().await?;
        if users.iter().any(|u| u.email == req.email) {
            return Err(ApiError::Conflict("email already in use".to_string()));
        }

        let password_hash = PasswordService::hash_async(req.password, self.hash_cost)
            .await
            .map_err(ApiError::Internal)?;

        users.push(UserRecord {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email.clone(),
            password_hash,
        });
        self.store.save_all(&users).await?;

        info!(email = %req.email, "user registered");
        Ok(())
    }

    /// Authenticate and issue a bearer token whose subject is the
    /// stored email.
    ///
    /// Terminal failures: `Validation` when a field is empty, `NotFound`
    /// for an unknown email, `InvalidCredentials` on password mismatch.
    pub async fn authenticate(&self, req: LoginRequest) -> Result<String, ApiError> {
        if req.email.is_empty() || req.password.is_empty() {
            return Err(ApiError::Validation(
                "email and password are required".to_string(),
            ));
        }

        let users = self.store.load_all().await?;
        let user = users
            .into_iter()
            .find(|u| u.email == req.email)
            .ok_or_else(|| ApiError::NotFound("user not found".to_string()))?;

        let valid = PasswordService::verify_async(req.password, user.password_hash)
            .await
            .map_err(ApiError::Internal)?;
        if !valid {
            return Err(ApiError::InvalidCredentials);
        }

        let token = self
            .jwt
            .generate_token(&user.email)
            .map_err(ApiError::Internal)?;

        debug!(email = %user.email, "login successful");
        Ok(token)
    }

    /// Probe the store for the readiness check.
    pub async fn check_store(&self) -> Result<(), crate::store::StoreError> {
        self.store.health_check().await
    }

    /// The token service, for callers that need to inspect issued tokens.
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }
}
