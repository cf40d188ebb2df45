//! Password hashing for reuse checks.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Errors raised by a hash function.
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    /// The hashing backend failed.
    #[error("Failed to hash password: {0}")]
    Backend(String),
}

/// Hashes passwords and compares them against stored hashes.
pub trait HashFunction: Send + Sync {
    /// Hashes a password.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn hash(&self, password: &str) -> Result<String, HashError>;

    /// Returns true if `password` matches `hash`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn compare(&self, password: &str, hash: &str) -> Result<bool, HashError>;
}

/// Argon2id hashing in PHC string format.
#[derive(Default)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    /// Creates a hasher with the default Argon2id parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl HashFunction for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| HashError::Backend(e.to_string()))
    }

    fn compare(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        // A stored value that is not a PHC string cannot match.
        let Ok(parsed) = PasswordHash::new(hash) else {
            tracing::debug!("Stored hash is not in PHC format");
            return Ok(false);
        };
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(HashError::Backend(e.to_string())),
        }
    }
}

impl std::fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argon2Hasher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_compare() {
        let hasher = Argon2Hasher::new();
        let hash = hasher.hash("foo").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(hasher.compare("foo", &hash).unwrap());
        assert!(!hasher.compare("bar", &hash).unwrap());
    }

    #[test]
    fn malformed_hash_does_not_match() {
        assert!(!Argon2Hasher::new().compare("foo", "").unwrap());
    }
}
