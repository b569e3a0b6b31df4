//! Create, look up, update and delete any stored record
//!
//! Every mutation validates the record, enforces unique names, saves the
//! record's file and appends an audit entry.

use crate::error::{BillbankError, BillbankResult};
use crate::models::{BankAccount, Bill, CreditCard, Income, Transfer};
use crate::storage::{Record, Repository, Storage};

pub struct RecordService<'a, T: Record> {
    storage: &'a Storage,
    repo: &'a Repository<T>,
}

impl<'a> RecordService<'a, Bill> {
    pub fn bills(storage: &'a Storage) -> Self {
        Self::new(storage, &storage.bills)
    }
}

impl<'a> RecordService<'a, Income> {
    pub fn income(storage: &'a Storage) -> Self {
        Self::new(storage, &storage.income)
    }
}

impl<'a> RecordService<'a, BankAccount> {
    pub fn accounts(storage: &'a Storage) -> Self {
        Self::new(storage, &storage.accounts)
    }
}

impl<'a> RecordService<'a, CreditCard> {
    pub fn cards(storage: &'a Storage) -> Self {
        Self::new(storage, &storage.cards)
    }
}

impl<'a> RecordService<'a, Transfer> {
    pub fn transfers(storage: &'a Storage) -> Self {
        Self::new(storage, &storage.transfers)
    }
}

impl<'a, T: Record> RecordService<'a, T> {
    pub fn new(storage: &'a Storage, repo: &'a Repository<T>) -> Self {
        Self { storage, repo }
    }

    fn not_found(identifier: impl Into<String>) -> BillbankError {
        BillbankError::NotFound {
            entity_type: T::ENTITY.name(),
            identifier: identifier.into(),
        }
    }

    fn check_name(&self, record: &T) -> BillbankResult<()> {
        record.validate()?;
        if T::UNIQUE_NAMES && self.repo.name_exists(record.name(), Some(record.id()))? {
            return Err(BillbankError::Duplicate {
                entity_type: T::ENTITY.name(),
                identifier: record.name().to_string(),
            });
        }
        Ok(())
    }

    /// Store a new record
    pub fn create(&self, mut record: T) -> BillbankResult<T> {
        let trimmed = record.name().trim().to_string();
        if trimmed != record.name() {
            record.set_name(trimmed);
        }
        self.check_name(&record)?;

        self.repo.upsert(record.clone())?;
        self.repo.save()?;
        self.storage.log_create(&record, "created")?;

        log::debug!("created {} '{}'", T::ENTITY, record.name());
        Ok(record)
    }

    pub fn get(&self, id: T::Id) -> BillbankResult<Option<T>> {
        self.repo.get(id)
    }

    /// Look up by name (case-insensitive), then by id
    pub fn find(&self, identifier: &str) -> BillbankResult<Option<T>> {
        if let Some(record) = self.repo.get_by_name(identifier)? {
            return Ok(Some(record));
        }
        match identifier.parse::<T::Id>() {
            Ok(id) => self.repo.get(id),
            Err(_) => Ok(None),
        }
    }

    /// Like [`RecordService::find`], but a missing record is an error
    pub fn require(&self, identifier: &str) -> BillbankResult<T> {
        self.find(identifier)?
            .ok_or_else(|| Self::not_found(identifier))
    }

    pub fn require_id(&self, id: T::Id) -> BillbankResult<T> {
        self.repo
            .get(id)?
            .ok_or_else(|| Self::not_found(id.to_string()))
    }

    pub fn list(&self) -> BillbankResult<Vec<T>> {
        self.repo.get_all()
    }

    /// Apply `change` to a stored record and persist it
    ///
    /// Nothing is written when `change` or validation fails.
    pub fn update<F>(&self, id: T::Id, summary: &str, change: F) -> BillbankResult<T>
    where
        F: FnOnce(&mut T) -> BillbankResult<()>,
    {
        let before = self.require_id(id)?;
        let mut after = before.clone();
        change(&mut after)?;
        self.check_name(&after)?;

        self.repo.upsert(after.clone())?;
        self.repo.save()?;
        self.storage.log_update(&before, &after, summary)?;

        log::debug!("updated {} '{}': {}", T::ENTITY, after.name(), summary);
        Ok(after)
    }

    pub fn rename(&self, id: T::Id, name: &str) -> BillbankResult<T> {
        let name = name.trim().to_string();
        let summary = format!("renamed to {}", name);
        self.update(id, &summary, |record| {
            record.set_name(name);
            Ok(())
        })
    }

    pub fn delete(&self, id: T::Id) -> BillbankResult<T> {
        let record = self
            .repo
            .delete(id)?
            .ok_or_else(|| Self::not_found(id.to_string()))?;
        self.repo.save()?;
        self.storage.log_delete(&record, "deleted")?;

        log::debug!("deleted {} '{}'", T::ENTITY, record.name());
        Ok(record)
    }
}
