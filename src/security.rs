use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use thiserror::Error;

use crate::constants::{MIN_PASSWORD_LENGTH, SPECIAL_CHARACTERS};

// =============================================================================
// Password Strength Policy
// =============================================================================

/// The first password-policy clause a candidate password failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("password must be at least 8 characters long")]
    TooShort,
    #[error("password must contain at least one uppercase letter")]
    MissingUppercase,
    #[error("password must contain at least one lowercase letter")]
    MissingLowercase,
    #[error("password must contain at least one digit")]
    MissingDigit,
    #[error("password must contain at least one special character")]
    MissingSpecial,
}

/// Validate password strength
///
/// A password must be at least [`MIN_PASSWORD_LENGTH`] characters and contain
/// an uppercase letter, a lowercase letter, a digit and one character from
/// [`SPECIAL_CHARACTERS`]. Clauses are checked in that order and the first
/// failure is returned.
///
/// Letter classes use the Unicode `Uppercase`/`Lowercase` properties and any
/// Unicode numeric character counts as a digit, so non-ASCII scripts qualify.
pub fn validate_password_strength(password: &str) -> Result<(), PasswordError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort);
    }

    let has_upper = password.chars().any(char::is_uppercase);
    let has_lower = password.chars().any(char::is_lowercase);
    let has_digit = password.chars().any(char::is_numeric);
    let has_special = password.chars().any(|c| SPECIAL_CHARACTERS.contains(c));

    if !has_upper {
        return Err(PasswordError::MissingUppercase);
    }
    if !has_lower {
        return Err(PasswordError::MissingLowercase);
    }
    if !has_digit {
        return Err(PasswordError::MissingDigit);
    }
    if !has_special {
        return Err(PasswordError::MissingSpecial);
    }

    Ok(())
}

// =============================================================================
// Password Hashing
// =============================================================================

/// Argon2id hasher with a configurable time cost
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Build a hasher whose time cost (iteration count) is `cost`
    pub fn new(cost: u32) -> Result<Self, argon2::Error> {
        let params = Params::new(
            Params::DEFAULT_M_COST,
            cost,
            Params::DEFAULT_P_COST,
            None,
        )?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a password with a fresh random salt, returning a PHC string
    pub fn hash(&self, password: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self.argon2().hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    /// Verify a password against a stored PHC string
    ///
    /// Parameters are read from the stored hash, so hashes produced under an
    /// older cost setting still verify. A malformed hash never verifies.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(h) => h,
            Err(_) => {
                tracing::warn!("Stored password hash could not be parsed");
                return false;
            }
        };
        self.argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}
