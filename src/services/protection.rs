//! Unlocking and using the password for protected fields
//!
//! The first unlock stores an Argon2 hash of the password in the settings;
//! later unlocks must match it before anything is sealed or opened.

use crate::config::{BillbankPaths, Settings};
use crate::crypto::{hash_password, verify_password, KdfParams, ProtectedField, Secret};
use crate::error::{BillbankError, BillbankResult};

/// A verified password, wiped from memory on drop
pub struct Protector {
    password: Secret,
    kdf: KdfParams,
}

impl Protector {
    /// Check `password` against the stored hash, or store one on first use
    pub fn unlock(
        paths: &BillbankPaths,
        settings: &mut Settings,
        password: &str,
    ) -> BillbankResult<Self> {
        if password.is_empty() {
            return Err(BillbankError::Encryption("Password cannot be empty".into()));
        }

        let kdf = settings.protection.kdf;
        match &settings.protection.password_hash {
            Some(phc) => {
                if !verify_password(password, phc)? {
                    return Err(BillbankError::Encryption("Incorrect password".into()));
                }
            }
            None => {
                settings.protection.password_hash = Some(hash_password(password, &kdf)?);
                settings.save(paths)?;
                log::info!("password set for protected fields");
            }
        }

        Ok(Self {
            password: Secret::new(password.to_string()),
            kdf,
        })
    }

    pub fn seal(&self, plaintext: &str) -> BillbankResult<ProtectedField> {
        ProtectedField::seal(plaintext, &self.password, &self.kdf)
    }

    pub fn open(&self, field: &ProtectedField) -> BillbankResult<Secret> {
        field.open(&self.password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (BillbankPaths, Settings, TempDir) {
        let dir = TempDir::new().unwrap();
        let paths = BillbankPaths::with_base_dir(dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        let mut settings = Settings::default();
        settings.protection.kdf = KdfParams::cheap();
        (paths, settings, dir)
    }

    #[test]
    fn test_first_unlock_stores_hash() {
        let (paths, mut settings, _dir) = setup();
        Protector::unlock(&paths, &mut settings, "hunter2").unwrap();

        let saved = Settings::load_or_create(&paths).unwrap();
        assert!(saved.protection.password_hash.is_some());
    }

    #[test]
    fn test_wrong_password_rejected() {
        let (paths, mut settings, _dir) = setup();
        Protector::unlock(&paths, &mut settings, "hunter2").unwrap();

        let err = Protector::unlock(&paths, &mut settings, "hunter3").err().unwrap();
        assert!(matches!(err, BillbankError::Encryption(_)));
        assert!(Protector::unlock(&paths, &mut settings, "").is_err());
    }

    #[test]
    fn test_seal_and_open() {
        let (paths, mut settings, _dir) = setup();
        let protector = Protector::unlock(&paths, &mut settings, "hunter2").unwrap();

        let field = protector.seal("0123456789").unwrap();
        assert_eq!(protector.open(&field).unwrap().as_str(), "0123456789");
    }
}
