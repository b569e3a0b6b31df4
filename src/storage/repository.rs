//! Generic JSON-backed repository
//!
//! Each record type lives in its own file, kept in memory behind a lock and
//! written back in full on save.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::audit::EntityType;
use crate::error::{BillbankError, BillbankResult};
use crate::models::{
    BankAccount, BankAccountId, Bill, BillId, CreditCard, CreditCardId, Income, IncomeId,
    RecordValidationError, Transfer, TransferId,
};

use super::file_io::{read_json, write_json_atomic};

/// A record type that can be stored in a [`Repository`]
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Id: Copy + Eq + Hash + fmt::Display + FromStr;

    /// Type tag for errors and audit entries
    const ENTITY: EntityType;

    /// Whether names must be unique (case-insensitively) within the type
    const UNIQUE_NAMES: bool = true;

    fn id(&self) -> Self::Id;
    fn name(&self) -> &str;
    fn set_name(&mut self, name: String);
    fn validate(&self) -> Result<(), RecordValidationError>;

    /// Listing order
    fn order(&self, other: &Self) -> Ordering {
        self.name()
            .to_lowercase()
            .cmp(&other.name().to_lowercase())
    }
}

macro_rules! named_record {
    ($ty:ty, $id:ty, $entity:expr) => {
        impl Record for $ty {
            type Id = $id;
            const ENTITY: EntityType = $entity;

            fn id(&self) -> Self::Id {
                self.id
            }

            fn name(&self) -> &str {
                &self.name
            }

            fn set_name(&mut self, name: String) {
                self.name = name;
                self.updated_at = chrono::Utc::now();
            }

            fn validate(&self) -> Result<(), RecordValidationError> {
                <$ty>::validate(self)
            }
        }
    };
}

named_record!(Bill, BillId, EntityType::Bill);
named_record!(Income, IncomeId, EntityType::Income);
named_record!(BankAccount, BankAccountId, EntityType::Account);
named_record!(CreditCard, CreditCardId, EntityType::Card);

impl Record for Transfer {
    type Id = TransferId;
    const ENTITY: EntityType = EntityType::Transfer;
    const UNIQUE_NAMES: bool = false;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn validate(&self) -> Result<(), RecordValidationError> {
        Transfer::validate(self)
    }

    fn order(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then(self.created_at.cmp(&other.created_at))
    }
}

#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
struct RecordFile<T: Record> {
    #[serde(default)]
    records: Vec<T>,
}

impl<T: Record> Default for RecordFile<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

pub struct Repository<T: Record> {
    path: PathBuf,
    data: RwLock<HashMap<T::Id, T>>,
}

impl<T: Record> Repository<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> BillbankResult<RwLockReadGuard<'_, HashMap<T::Id, T>>> {
        self.data
            .read()
            .map_err(|e| BillbankError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> BillbankResult<RwLockWriteGuard<'_, HashMap<T::Id, T>>> {
        self.data
            .write()
            .map_err(|e| BillbankError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Replace the in-memory records with the file's contents
    pub fn load(&self) -> BillbankResult<()> {
        let file: RecordFile<T> = read_json(&self.path).inspect_err(|e| {
            log::warn!("could not load {}: {}", self.path.display(), e);
        })?;
        let mut data = self.write()?;
        data.clear();
        for record in file.records {
            data.insert(record.id(), record);
        }
        log::debug!("loaded {} {} record(s)", data.len(), T::ENTITY);
        Ok(())
    }

    pub fn save(&self) -> BillbankResult<()> {
        let file = RecordFile {
            records: self.get_all()?,
        };
        write_json_atomic(&self.path, &file)
    }

    pub fn get(&self, id: T::Id) -> BillbankResult<Option<T>> {
        Ok(self.read()?.get(&id).cloned())
    }

    /// All records in listing order
    pub fn get_all(&self) -> BillbankResult<Vec<T>> {
        let mut records: Vec<T> = self.read()?.values().cloned().collect();
        records.sort_by(|a, b| a.order(b));
        Ok(records)
    }

    /// Records matching `predicate`, in listing order
    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> BillbankResult<Vec<T>> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|record| predicate(record))
            .collect())
    }

    /// Case-insensitive lookup by name
    pub fn get_by_name(&self, name: &str) -> BillbankResult<Option<T>> {
        let wanted = name.to_lowercase();
        Ok(self
            .read()?
            .values()
            .find(|record| record.name().to_lowercase() == wanted)
            .cloned())
    }

    pub fn name_exists(&self, name: &str, exclude: Option<T::Id>) -> BillbankResult<bool> {
        let wanted = name.to_lowercase();
        Ok(self.read()?.values().any(|record| {
            record.name().to_lowercase() == wanted && Some(record.id()) != exclude
        }))
    }

    pub fn upsert(&self, record: T) -> BillbankResult<()> {
        self.write()?.insert(record.id(), record);
        Ok(())
    }

    /// Remove a record, returning it if it existed
    pub fn delete(&self, id: T::Id) -> BillbankResult<Option<T>> {
        Ok(self.write()?.remove(&id))
    }

    /// Remove every record matching `predicate`, returning how many went
    pub fn delete_where(&self, predicate: impl Fn(&T) -> bool) -> BillbankResult<usize> {
        let mut data = self.write()?;
        let before = data.len();
        data.retain(|_, record| !predicate(record));
        Ok(before - data.len())
    }

    pub fn count(&self) -> BillbankResult<usize> {
        Ok(self.read()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransferKind};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn bills(dir: &TempDir) -> Repository<Bill> {
        Repository::new(dir.path().join("bills.json"))
    }

    #[test]
    fn test_upsert_and_lookup() {
        let dir = TempDir::new().unwrap();
        let repo = bills(&dir);

        let bill = Bill::new("Rent");
        repo.upsert(bill.clone()).unwrap();

        assert_eq!(repo.count().unwrap(), 1);
        assert_eq!(repo.get(bill.id).unwrap().unwrap().name, "Rent");
        assert!(repo.get_by_name("RENT").unwrap().is_some());
        assert!(repo.get_by_name("rents").unwrap().is_none());
    }

    #[test]
    fn test_name_exists_excludes_self() {
        let dir = TempDir::new().unwrap();
        let repo = bills(&dir);
        let bill = Bill::new("Rent");
        repo.upsert(bill.clone()).unwrap();

        assert!(repo.name_exists("rent", None).unwrap());
        assert!(!repo.name_exists("rent", Some(bill.id)).unwrap());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let repo = bills(&dir);
        repo.upsert(Bill::new("water")).unwrap();
        repo.upsert(Bill::new("Power")).unwrap();
        repo.save().unwrap();

        let reloaded = bills(&dir);
        reloaded.load().unwrap();
        let names: Vec<_> = reloaded
            .get_all()
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, ["Power", "water"]);
    }

    #[test]
    fn test_delete() {
        let dir = TempDir::new().unwrap();
        let repo = bills(&dir);
        let bill = Bill::new("Rent");
        repo.upsert(bill.clone()).unwrap();

        assert!(repo.delete(bill.id).unwrap().is_some());
        assert!(repo.delete(bill.id).unwrap().is_none());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_transfers_ordered_by_date() {
        let dir = TempDir::new().unwrap();
        let repo: Repository<Transfer> = Repository::new(dir.path().join("transfers.json"));
        let account = BankAccountId::new();
        let day = |d| NaiveDate::from_ymd_opt(2025, 1, d).unwrap();

        repo.upsert(Transfer::new(account, TransferKind::Deposit, Money::from_cents(2), day(9)))
            .unwrap();
        repo.upsert(Transfer::new(account, TransferKind::Deposit, Money::from_cents(1), day(3)))
            .unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all[0].amount.cents(), 1);

        let removed = repo.delete_where(|t| t.account_id == account).unwrap();
        assert_eq!(removed, 2);
    }
}
