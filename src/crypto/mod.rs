//! Cryptography for protected record fields
//!
//! AES-256-GCM with Argon2id key derivation, plus Argon2 password hashes for
//! checking the password before anything is sealed.

pub mod encryption;
pub mod field;
pub mod key_derivation;
pub mod password;

pub use encryption::{decrypt, encrypt, EncryptedData};
pub use field::ProtectedField;
pub use key_derivation::{derive_key, DerivedKey, KdfParams};
pub use password::{hash_password, verify_password};

/// A password held in memory that is wiped on drop
pub type Secret = zeroize::Zeroizing<String>;
