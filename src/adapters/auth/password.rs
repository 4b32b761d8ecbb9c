//! Salted password digests shared by the auth adapters.
//!
//! SHA-256 over `salt || password`, hex-encoded. Verification compares
//! digests in constant time.

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use uuid::Uuid;

/// Generates a fresh random salt, hex-encoded.
pub fn generate_salt() -> String {
    hex_encode(Uuid::new_v4().as_bytes())
}

/// Computes the hex-encoded digest for a password under the given salt.
pub fn digest_password(salt: &str, password: &SecretString) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.expose_secret().as_bytes());
    hex_encode(&hasher.finalize())
}

/// Verifies a password against a stored digest in constant time.
pub fn verify_password(salt: &str, password: &SecretString, stored_digest: &str) -> bool {
    let computed = digest_password(salt, password);
    computed.as_bytes().ct_eq(stored_digest.as_bytes()).into()
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_verifies() {
        let salt = generate_salt();
        let password = SecretString::new("hunter2".to_string());
        let digest = digest_password(&salt, &password);
        assert!(verify_password(&salt, &password, &digest));
    }

    #[test]
    fn wrong_password_fails() {
        let salt = generate_salt();
        let digest = digest_password(&salt, &SecretString::new("hunter2".to_string()));
        assert!(!verify_password(
            &salt,
            &SecretString::new("hunter3".to_string()),
            &digest
        ));
    }

    #[test]
    fn same_password_different_salt_differs() {
        let password = SecretString::new("hunter2".to_string());
        let a = digest_password(&generate_salt(), &password);
        let b = digest_password(&generate_salt(), &password);
        assert_ne!(a, b);
    }

    #[test]
    fn salts_are_hex_and_unique() {
        let salt = generate_salt();
        assert_eq!(salt.len(), 32);
        assert!(salt.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(salt, generate_salt());
    }
}
