//! Password hashing with Argon2id.
//!
//! Parameters follow current OWASP guidance (64 MiB memory, 3 iterations,
//! 4 lanes). Hashes are stored in PHC string format, so parameters can be
//! tightened later without invalidating existing hashes.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, PasswordHasher as _, Version,
};

use crate::error::AppError;

pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    pub fn new() -> Result<Self, AppError> {
        let params = Params::new(65536, 3, 4, None).map_err(|err| {
            AppError::Internal(format!("Invalid Argon2 parameters: {}", err))
        })?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a password with a fresh random salt.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| {
                tracing::error!(error = %err, "Password hashing failed");
                AppError::Internal("Password hashing failed".to_string())
            })
    }

    /// Verify a password against a stored hash.
    ///
    /// A malformed stored hash is an internal error; a mismatch is
    /// `Unauthorized`.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<(), AppError> {
        let parsed = PasswordHash::new(hash).map_err(|err| {
            tracing::error!(error = %err, "Stored password hash is malformed");
            AppError::Internal("Password verification failed".to_string())
        })?;

        self.argon2
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| AppError::Unauthorized)
    }
}
