// [library] Argon2 - memory-hard password hashing (Argon2id variant by default)
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

// [library] Structured error types with automatic Display and Error trait derivation
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Hash(argon2::password_hash::Error),

    #[error("Stored password is not a valid PHC string: {0}")]
    MalformedHash(argon2::password_hash::Error),
}

// [security] Hash a plaintext password into a PHC string (algorithm, parameters, salt, digest)
// This string is what the users.password column stores
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng); // [security] Fresh salt per password

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordError::Hash)
}

// [security] Check a login attempt against the stored PHC string
// Ok(false) means wrong password; Err means the stored value cannot be parsed
pub fn verify_password(password: &str, stored: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored).map_err(PasswordError::MalformedHash)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::Hash(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("password").expect("Failed to hash password");

        assert!(hash.starts_with("$argon2id$"), "Unexpected format: {}", hash);
        assert!(verify_password("password", &hash).unwrap());
        assert!(!verify_password("Password", &hash).unwrap());
        assert!(!verify_password("password ", &hash).unwrap());
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let first = hash_password("hunter2").unwrap();
        let second = hash_password("hunter2").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("hunter2", &first).unwrap());
        assert!(verify_password("hunter2", &second).unwrap());
    }

    #[test]
    fn test_unicode_and_empty_passwords() {
        for password in ["", "пароль🔒密码", "  spaced  "] {
            let hash = hash_password(password).unwrap();
            assert!(verify_password(password, &hash).unwrap(), "{:?}", password);
            assert!(!verify_password("other", &hash).unwrap());
        }
    }

    #[test]
    fn test_malformed_stored_hash_is_an_error() {
        // Seed data from older deployments used bcrypt, which Argon2 cannot verify
        for stored in ["", "plain_text_password", "$2a$10$FB/BOAVhpuLvpOREQVmvmezD4ED/.JBIDRh70tGevYzYzQgFId2u."] {
            assert!(
                verify_password("password", stored).is_err(),
                "Should reject stored value: {}",
                stored
            );
        }
    }
}
