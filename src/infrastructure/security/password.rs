// src/infrastructure/security/password.rs
use crate::application::ports::backend::{BackendError, BackendResult};
use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

/// Argon2 hashing for accounts kept by the in-memory backend. Work runs on
/// the blocking pool.
#[derive(Default, Clone)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub async fn hash(&self, password: &str) -> BackendResult<String> {
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|err| BackendError::unavailable(err.to_string()))
        })
        .await
        .map_err(|err| BackendError::unavailable(err.to_string()))?
    }

    pub async fn verify(&self, password: &str, expected_hash: &str) -> BackendResult<()> {
        let password = password.to_owned();
        let expected_hash = expected_hash.to_owned();
        tokio::task::spawn_blocking(move || -> BackendResult<()> {
            let parsed = PasswordHash::new(&expected_hash)
                .map_err(|err| BackendError::invalid_response(err.to_string()))?;
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .map_err(|_| BackendError::unauthorized("invalid credentials"))
        })
        .await
        .map_err(|err| BackendError::unavailable(err.to_string()))??;
        Ok(())
    }
}
