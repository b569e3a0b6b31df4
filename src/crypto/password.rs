//! Password hashes in PHC string format

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use crate::error::{BillbankError, BillbankResult};

use super::KdfParams;

/// Hash `password` into a `$argon2id$...` string
pub fn hash_password(password: &str, params: &KdfParams) -> BillbankResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = params
        .argon2()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| BillbankError::Encryption(format!("Password hashing failed: {}", e)))?;
    Ok(hash.to_string())
}

/// Check `password` against a stored PHC string
///
/// The cost parameters come from the hash itself.
pub fn verify_password(password: &str, phc: &str) -> BillbankResult<bool> {
    let parsed = PasswordHash::new(phc)
        .map_err(|e| BillbankError::Encryption(format!("Invalid password hash: {}", e)))?;
    Ok(argon2::Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
