//! Individually encrypted record fields
//!
//! Account numbers, card numbers and notes are sealed one by one so the rest
//! of a record stays readable JSON.

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::{BillbankError, BillbankResult};

use super::encryption::{decrypt, encrypt, EncryptedData};
use super::key_derivation::{derive_key, KdfParams, SALT_LEN};

/// A string encrypted under a password-derived key with its own salt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedField {
    /// base64 salt for this field's key
    pub salt: String,
    pub kdf: KdfParams,
    #[serde(flatten)]
    pub data: EncryptedData,
}

impl ProtectedField {
    pub fn seal(plaintext: &str, password: &str, params: &KdfParams) -> BillbankResult<Self> {
        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);

        let key = derive_key(password, &salt, params)?;
        let data = encrypt(plaintext.as_bytes(), &key)?;

        Ok(Self {
            salt: STANDARD.encode(salt),
            kdf: *params,
            data,
        })
    }

    /// Decrypt; a wrong password is an `Encryption` error
    pub fn open(&self, password: &str) -> BillbankResult<Zeroizing<String>> {
        let salt = STANDARD
            .decode(&self.salt)
            .map_err(|e| BillbankError::Encryption(format!("Invalid salt encoding: {}", e)))?;
        let key = derive_key(password, &salt, &self.kdf)?;
        let bytes = Zeroizing::new(decrypt(&self.data, &key)?);

        let text = std::str::from_utf8(&bytes)
            .map_err(|e| BillbankError::Encryption(format!("Invalid UTF-8 in field: {}", e)))?;
        Ok(Zeroizing::new(text.to_string()))
    }
}
