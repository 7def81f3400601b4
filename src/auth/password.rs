use anyhow::Context;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use tracing::{error, warn};

lazy_static! {
    /// Stand-in hash verified for unknown emails so both login failures cost one argon2 run.
    static ref DUMMY_HASH: Option<String> = match hash_password("credential-service-dummy") {
        Ok(hash) => Some(hash),
        Err(e) => {
            warn!(error = %e, "could not prepare dummy hash");
            None
        }
    };
}

#[cfg(test)]
pub(crate) static VERIFIED: std::sync::Mutex<Vec<String>> = std::sync::Mutex::new(Vec::new());

fn argon2_error(what: &'static str) -> impl FnOnce(argon2::password_hash::Error) -> anyhow::Error {
    move |e| {
        error!(error = %e, what, "argon2 failure");
        anyhow::anyhow!("{what}: {e}")
    }
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|phc| phc.to_string())
        .map_err(argon2_error("hash password"))
}

/// Constant-time check of `plain` against a PHC string. A malformed hash is an error, a mismatch is `false`.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    #[cfg(test)]
    VERIFIED.lock().unwrap().push(plain.to_string());

    let parsed = PasswordHash::new(hash).map_err(argon2_error("parse stored hash"))?;
    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(argon2_error("verify password")(e)),
    }
}

/// Hashes on the blocking pool; argon2 is CPU bound.
pub async fn hash_password_blocking(plain: String) -> anyhow::Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&plain))
        .await
        .context("hash task panicked")?
}

pub async fn verify_password_blocking(plain: String, hash: String) -> anyhow::Result<bool> {
    tokio::task::spawn_blocking(move || verify_password(&plain, &hash))
        .await
        .context("verify task panicked")?
}

/// Burns one verification against the dummy hash; the outcome is discarded.
pub async fn verify_against_dummy(plain: String) {
    let outcome = tokio::task::spawn_blocking(move || {
        DUMMY_HASH
            .as_deref()
            .map(|hash| verify_password(&plain, hash))
    })
    .await;
    if let Ok(Some(Err(e))) = outcome {
        warn!(error = %e, "dummy verification failed");
    }
}
