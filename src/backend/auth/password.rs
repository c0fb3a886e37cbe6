/**
 * Password Hashing
 *
 * bcrypt hashing and verification. bcrypt salts every hash and compares in
 * constant time, so neither operation leaks timing information about the
 * plaintext. `verify_unknown` spends the same work when there is no stored
 * hash to check against.
 */

use crate::backend::error::ApiError;

/// One-way password hasher
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password
    ///
    /// # Errors
    ///
    /// `ApiError::Internal` if bcrypt rejects the cost or fails to salt.
    pub fn hash(&self, plaintext: &str) -> Result<String, ApiError> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| {
            tracing::error!("Failed to hash password: {:?}", e);
            ApiError::internal("password hashing failed")
        })
    }

    /// Verify a plaintext password against a stored hash
    ///
    /// A malformed stored hash verifies as `false`; callers cannot tell it
    /// apart from a wrong password.
    pub fn verify(&self, plaintext: &str, hash: &str) -> bool {
        match bcrypt::verify(plaintext, hash) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::warn!("Stored password hash could not be parsed: {:?}", e);
                false
            }
        }
    }

    /// Reject a password for an account that does not exist
    ///
    /// Runs one bcrypt round at the configured cost so the caller takes as
    /// long as a real `verify`. Always `false`.
    pub fn verify_unknown(&self, plaintext: &str) -> bool {
        if let Err(e) = bcrypt::hash(plaintext, self.cost) {
            tracing::warn!("Dummy password hash failed: {:?}", e);
        }
        false
    }
}
