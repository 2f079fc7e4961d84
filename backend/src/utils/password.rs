//! Password hashing and strength rules.
//!
//! Hashes are bcrypt strings (`$2b$<cost>$...`) carrying their own salt, so a
//! stored hash is all that is needed to verify a password later.

use bcrypt::{non_truncating_hash, non_truncating_verify};
use std::borrow::Cow;
use thiserror::Error;
use validator::ValidationError;

/// Lowest work factor bcrypt accepts.
pub const MIN_BCRYPT_COST: u32 = 4;
/// Highest work factor bcrypt accepts.
pub const MAX_BCRYPT_COST: u32 = 31;

/// Minimum password length enforced on signup.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// bcrypt only reads the first 72 bytes of its input.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Symbols accepted in a password; at least one is required.
pub const PASSWORD_SYMBOLS: &str = "@$!%*?&";

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Invalid bcrypt cost: {0} (must be 4-31)")]
    InvalidCost(u32),
    #[error("Password hashing failed: {0}")]
    Hash(bcrypt::BcryptError),
    #[error("Password verification failed: {0}")]
    Verify(bcrypt::BcryptError),
}

/// Hashes a plain text password with a fresh salt.
///
/// Inputs longer than `MAX_PASSWORD_BYTES` are rejected instead of truncated.
///
/// # Arguments
/// * `password` - Plain text password to hash
/// * `cost` - bcrypt work factor
///
/// # Errors
/// Returns `PasswordError` if the cost is out of range or hashing fails
pub fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
        return Err(PasswordError::InvalidCost(cost));
    }

    non_truncating_hash(password, cost).map_err(PasswordError::Hash)
}

/// Verifies a plain text password against a stored hash.
///
/// # Returns
/// `true` if the password matches, `false` otherwise
///
/// # Errors
/// Returns `PasswordError` if the stored hash cannot be parsed or the
/// password exceeds `MAX_PASSWORD_BYTES`
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PasswordError> {
    non_truncating_verify(password, password_hash).map_err(PasswordError::Verify)
}

/// Validator hook for the signup password policy.
///
/// At least eight characters, one ASCII letter, one ASCII digit and one of
/// `@$!%*?&`. No other characters are allowed, matching the signup form.
/// At most `MAX_PASSWORD_BYTES` bytes.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::new("password_length").with_message(Cow::Borrowed(
            "Password must be at most 72 characters long",
        )));
    }

    let allowed = password
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(c));
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| PASSWORD_SYMBOLS.contains(c));

    if password.chars().count() >= MIN_PASSWORD_LENGTH
        && allowed
        && has_letter
        && has_digit
        && has_symbol
    {
        return Ok(());
    }

    Err(ValidationError::new("password_strength").with_message(Cow::Borrowed(
        "Password must be at least 8 characters long and contain a letter, a number and one of @$!%*?&",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_never_equals_plaintext() {
        let hashed = hash_password("Passw0rd!", MIN_BCRYPT_COST).unwrap();

        assert_ne!(hashed, "Passw0rd!");
        assert!(verify_password("Passw0rd!", &hashed).unwrap());
        assert!(!verify_password("wrong", &hashed).unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        let first = hash_password("Passw0rd!", MIN_BCRYPT_COST).unwrap();
        let second = hash_password("Passw0rd!", MIN_BCRYPT_COST).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_default_cost_is_encoded_in_hash() {
        let hashed = hash_password("Passw0rd!", crate::config::DEFAULT_BCRYPT_COST).unwrap();
        assert!(hashed.starts_with("$2b$10$"));
    }

    #[test]
    fn test_invalid_cost_rejected() {
        assert!(matches!(
            hash_password("Passw0rd!", 3),
            Err(PasswordError::InvalidCost(3))
        ));
        assert!(matches!(
            hash_password("Passw0rd!", 32),
            Err(PasswordError::InvalidCost(32))
        ));
    }

    #[test]
    fn test_verify_against_corrupt_hash_errors() {
        let err = verify_password("Passw0rd!", "not-a-valid-hash").unwrap_err();
        assert!(matches!(err, PasswordError::Verify(_)));
    }

    #[test]
    fn test_password_strength_accepts_policy_compliant() {
        assert!(validate_password_strength("Passw0rd!").is_ok());
        assert!(validate_password_strength("abc12345@").is_ok());
    }

    #[test]
    fn test_password_strength_rejects_weak() {
        // too short
        assert!(validate_password_strength("Pa0!").is_err());
        // no digit
        assert!(validate_password_strength("Password!").is_err());
        // no letter
        assert!(validate_password_strength("12345678!").is_err());
        // no symbol
        assert!(validate_password_strength("Passw0rd1").is_err());
        // disallowed character
        assert!(validate_password_strength("Passw0rd! ").is_err());
        assert!(validate_password_strength("Passw0rd#").is_err());
    }

    #[test]
    fn test_password_strength_length_bound() {
        let at_limit = format!("Passw0rd!{}", "a".repeat(MAX_PASSWORD_BYTES - 9));
        let over_limit = format!("{}a", at_limit);

        assert_eq!(at_limit.len(), MAX_PASSWORD_BYTES);
        assert!(validate_password_strength(&at_limit).is_ok());

        let err = validate_password_strength(&over_limit).unwrap_err();
        assert_eq!(err.code, "password_length");
    }

    #[test]
    fn test_long_passwords_are_not_truncated() {
        let prefix = format!("Passw0rd!{}", "a".repeat(MAX_PASSWORD_BYTES - 9));

        assert!(hash_password(&format!("{}XYZ", prefix), MIN_BCRYPT_COST).is_err());

        // a stored 72-byte password must not match a longer input sharing its bytes
        let hashed = hash_password(&prefix, MIN_BCRYPT_COST).unwrap();
        assert!(verify_password(&prefix, &hashed).unwrap());
        assert!(verify_password(&format!("{}different", prefix), &hashed).is_err());
    }
}
