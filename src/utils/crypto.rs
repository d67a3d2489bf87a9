//! Cryptographic utilities

use rand::Rng;
use sha2::{Digest, Sha256};

/// Generate an access token from `bytes` random bytes, hex-encoded
pub fn generate_access_token(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    rand::rng().fill(buf.as_mut_slice());
    hex::encode(buf)
}

/// Hash a token for storage (hex SHA-256)
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
