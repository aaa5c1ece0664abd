// [rust] Security module organization
pub mod password; // [security] Argon2id password hashing and verification

// [rust] Re-export for a flat namespace: crate::security::hash_password
pub use password::*;
