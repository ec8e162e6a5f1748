use {
    argon2::{
        password_hash::{
            rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        },
        Argon2,
    },
    tokio::task,
    tracing::warn,
};

use crate::Error;

/// Hashes `plain` into a PHC string with a fresh random salt.
pub async fn hash_password(plain: &str) -> Result<String, Error> {
    let plain = plain.to_owned();
    task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(Error::from)
    })
    .await?
}

/// Checks `plain` against a stored PHC hash.
///
/// A stored value that is not a valid PHC string is reported as a mismatch.
pub async fn verify_password(plain: &str, stored_hash: &str) -> Result<bool, Error> {
    let plain = plain.to_owned();
    let stored_hash = stored_hash.to_owned();
    let verified = task::spawn_blocking(move || match PasswordHash::new(&stored_hash) {
        Ok(hash) => Argon2::default()
            .verify_password(plain.as_bytes(), &hash)
            .is_ok(),
        Err(e) => {
            warn!(err = %e, "Stored password hash is not a valid PHC string");
            false
        }
    })
    .await?;

    Ok(verified)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify() {
        let hash = hash_password("secret").await.unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("secret", &hash).await.unwrap());
        assert!(!verify_password("wrong", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn salts_differ_between_hashes() {
        let first = hash_password("secret").await.unwrap();
        let second = hash_password("secret").await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn malformed_hash_is_a_mismatch() {
        assert!(!verify_password("secret", "not-a-hash").await.unwrap());
        assert!(!verify_password("secret", "").await.unwrap());
    }
}
