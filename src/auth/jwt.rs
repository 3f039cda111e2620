//! JWT token issuance and validation
//!
//! Tokens are stateless bearer credentials: subject, issued-at, and
//! expiry, signed with the process-wide secret. Nothing is recorded
//! server-side, so a token's validity is fully determined by its
//! signature and expiry.
//!
//! Keys are pre-computed once at startup and shared via `Arc`; do not
//! create a service per request.

use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (the user's email)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Pre-computed JWT keys for efficient token operations
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

/// Token issuance service with cached keys
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    token_expiry_secs: i64,
}

impl JwtService {
    /// Create a new JWT service; call once at startup and store in AppState.
    pub fn new(secret: &str, token_expiry_secs: i64) -> Self {
        Self {
            keys: JwtKeys::new(secret),
            token_expiry_secs,
        }
    }

    /// Issue a signed bearer token for a verified identity
    pub fn generate_token(&self, email: &str) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.token_expiry_secs);

        let claims = Claims {
            sub: email.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.keys.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to generate token: {}", e))
    }

    /// Validate a token's signature and expiry, returning its claims.
    ///
    /// No endpoint in this service consumes tokens; this is the library
    /// surface a downstream verifier (and the test suite) uses.
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.keys.decoding, &Validation::default())
            .map_err(|e| anyhow::anyhow!("Invalid token: {}", e))?;

        Ok(token_data.claims)
    }

    /// Configured token lifetime in seconds
    pub fn token_expiry_secs(&self) -> i64 {
        self.token_expiry_secs
    }
}
