//! Password hashing using bcrypt
//!
//! The cost factor is configuration, not a constant: production runs at
//! cost 10, tests drop to the bcrypt minimum to stay fast. Verification
//! uses the library's constant-time comparison.
//!
//! # Performance Considerations
//!
//! bcrypt is intentionally CPU-intensive. The `_async` variants offload
//! to the blocking thread pool so one slow hash does not stall unrelated
//! requests on the async runtime.

use anyhow::Result;

/// Password hashing service
pub struct PasswordService;

impl PasswordService {
    /// Hash a password with a fresh random salt (blocking operation)
    pub fn hash(password: &str, cost: u32) -> Result<String> {
        bcrypt::hash(password, cost)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
    }

    /// Hash a password on the blocking thread pool
    pub async fn hash_async(password: String, cost: u32) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::hash(&password, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a stored hash (blocking operation)
    pub fn verify(password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash)
            .map_err(|e| anyhow::anyhow!("Failed to verify password: {}", e))
    }

    /// Verify a password on the blocking thread pool
    pub async fn verify_async(password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }
}
