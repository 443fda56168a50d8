//! Salted SHA-256 password hashes, stored as lowercase hex.
//!
//! An empty salt reproduces the legacy unsalted `sha256(password)` so rows
//! created before salting keep verifying.

use sha2::{Digest, Sha256};
use uuid::Uuid;

pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn new_salt() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Compare without short-circuiting on the first differing byte.
pub fn verify_password(password: &str, salt: &str, expected_hash: &str) -> bool {
    constant_time_eq(hash_password(password, salt).as_bytes(), expected_hash.as_bytes())
}

pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
