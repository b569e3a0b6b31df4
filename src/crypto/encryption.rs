//! AES-256-GCM authenticated encryption
//!
//! A fresh random nonce is generated for every call to [`encrypt`].

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::error::{BillbankError, BillbankResult};

use super::DerivedKey;

const NONCE_SIZE: usize = 12;

/// Nonce and ciphertext (with tag), both base64
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedData {
    pub nonce: String,
    pub ciphertext: String,
}

impl EncryptedData {
    fn decode(field: &str, what: &str) -> BillbankResult<Vec<u8>> {
        STANDARD
            .decode(field)
            .map_err(|e| BillbankError::Encryption(format!("Invalid {} encoding: {}", what, e)))
    }
}

fn cipher(key: &DerivedKey) -> BillbankResult<Aes256Gcm> {
    Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| BillbankError::Encryption(format!("Failed to create cipher: {}", e)))
}

pub fn encrypt(plaintext: &[u8], key: &DerivedKey) -> BillbankResult<EncryptedData> {
    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);

    let ciphertext = cipher(key)?
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
        .map_err(|e| BillbankError::Encryption(format!("Encryption failed: {}", e)))?;

    Ok(EncryptedData {
        nonce: STANDARD.encode(nonce_bytes),
        ciphertext: STANDARD.encode(ciphertext),
    })
}

/// Fails when the key is wrong or the data was tampered with
pub fn decrypt(encrypted: &EncryptedData, key: &DerivedKey) -> BillbankResult<Vec<u8>> {
    let nonce_bytes = EncryptedData::decode(&encrypted.nonce, "nonce")?;
    if nonce_bytes.len() != NONCE_SIZE {
        return Err(BillbankError::Encryption(format!(
            "Invalid nonce size: expected {}, got {}",
            NONCE_SIZE,
            nonce_bytes.len()
        )));
    }
    let ciphertext = EncryptedData::decode(&encrypted.ciphertext, "ciphertext")?;

    cipher(key)?
        .decrypt(Nonce::from_slice(&nonce_bytes), ciphertext.as_ref())
        .map_err(|_| {
            BillbankError::Encryption("Decryption failed: wrong password or corrupted data".into())
        })
}
