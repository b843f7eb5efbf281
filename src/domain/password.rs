//! Password hashing - Argon2id value object and hasher.
//!
//! `PasswordHasher` owns the work factor used for new hashes. Verification
//! reads the algorithm, parameters and salt back out of the stored PHC string,
//! so hashes created under an older work factor keep verifying.

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

use crate::config::{HashWorkFactor, MAX_PASSWORD_BYTES};
use crate::errors::{AppError, AppResult};

/// Stored password hash value object.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Wrap an existing hash (from the credential store).
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    ///
    /// A malformed stored hash is a verification failure, never an error.
    pub fn verify(&self, plain_text: &str) -> bool {
        match PasswordHash::new(&self.hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!("Stored password hash is malformed: {}", e);
                false
            }
        }
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}

/// Argon2id hasher configured with a fixed work factor.
#[derive(Clone, Debug, Default)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Create a hasher for the given work factor.
    ///
    /// # Errors
    /// Returns a configuration error if Argon2 rejects the parameters
    /// (e.g. memory below `8 * parallelism` KiB).
    pub fn new(work_factor: HashWorkFactor) -> AppResult<Self> {
        let params = Params::new(
            work_factor.memory_kib,
            work_factor.iterations,
            work_factor.parallelism,
            None,
        )
        .map_err(|e| AppError::config(format!("Invalid Argon2 work factor: {}", e)))?;

        Ok(Self { params })
    }

    /// Hash a plain text password with a fresh random salt.
    ///
    /// # Errors
    /// Returns `InvalidInput` for an empty password or one longer than
    /// `MAX_PASSWORD_BYTES`.
    pub fn hash(&self, plain_text: &str) -> AppResult<Password> {
        if plain_text.is_empty() {
            return Err(AppError::invalid_input("password must not be empty"));
        }
        if plain_text.len() > MAX_PASSWORD_BYTES {
            return Err(AppError::invalid_input(format!(
                "password must be at most {} bytes",
                MAX_PASSWORD_BYTES
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;

        Ok(Password::from_hash(hash.to_string()))
    }

    /// Verify a plain text candidate against a stored hash string.
    pub fn verify(&self, plain_text: &str, hash: &str) -> bool {
        Password::from_hash(hash).verify(plain_text)
    }

    #[inline]
    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::new(HashWorkFactor {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_password_hash_and_verify() {
        let hasher = fast_hasher();
        let password = hasher.hash("pw123").unwrap();

        assert!(password.verify("pw123"));
        assert!(!password.verify("wrong"));
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let hasher = fast_hasher();
        let password = hasher.hash("SecurePassword123!").unwrap();

        assert_ne!(password.as_str(), "SecurePassword123!");
        assert!(password.as_str().starts_with("$argon2id$"));
    }

    #[test]
    fn test_same_password_different_salts() {
        let hasher = fast_hasher();
        let pass1 = hasher.hash("SamePassword123").unwrap();
        let pass2 = hasher.hash("SamePassword123").unwrap();

        // Different salts produce different hashes
        assert_ne!(pass1.as_str(), pass2.as_str());
        // Same output length regardless of salt
        assert_eq!(pass1.as_str().len(), pass2.as_str().len());
        // But both verify correctly
        assert!(hasher.verify("SamePassword123", pass1.as_str()));
        assert!(hasher.verify("SamePassword123", pass2.as_str()));
    }

    #[test]
    fn test_hash_embeds_work_factor() {
        let hasher = fast_hasher();
        let password = hasher.hash("pw123").unwrap();

        assert!(password.as_str().contains("m=64,t=1,p=1"));
    }

    #[test]
    fn test_verify_across_work_factors() {
        let old = fast_hasher().hash("pw123").unwrap();
        let current = PasswordHasher::new(HashWorkFactor {
            memory_kib: 128,
            iterations: 2,
            parallelism: 1,
        })
        .unwrap();

        assert!(current.verify("pw123", old.as_str()));
    }

    #[test]
    fn test_password_from_hash() {
        let hasher = fast_hasher();
        let hash = hasher.hash("TestPassword123").unwrap().into_string();

        let restored = Password::from_hash(hash);
        assert!(restored.verify("TestPassword123"));
    }

    #[test]
    fn test_malformed_hash_fails_verification() {
        let hasher = fast_hasher();

        assert!(!hasher.verify("pw123", "not-a-phc-string"));
        assert!(!hasher.verify("pw123", ""));
    }

    #[test]
    fn test_empty_password_rejected() {
        let result = fast_hasher().hash("");
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_oversized_password_rejected() {
        let long = "a".repeat(MAX_PASSWORD_BYTES + 1);
        let result = fast_hasher().hash(&long);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_invalid_work_factor_rejected() {
        let result = PasswordHasher::new(HashWorkFactor {
            memory_kib: 1,
            iterations: 1,
            parallelism: 1,
        });
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_debug_redacts_hash() {
        let password = fast_hasher().hash("pw123").unwrap();
        assert!(!format!("{:?}", password).contains("argon2"));
    }
}
