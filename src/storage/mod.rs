//! Storage layer for billbank
//!
//! JSON files under `data/`, one per record type, plus the audit log.

pub mod file_io;
pub mod repository;

pub use file_io::{read_json, write_json_atomic};
pub use repository::{Record, Repository};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::BillbankPaths;
use crate::error::BillbankResult;
use crate::models::{BankAccount, Bill, CreditCard, Income, Transfer};

/// Every repository plus the audit log
pub struct Storage {
    paths: BillbankPaths,
    pub bills: Repository<Bill>,
    pub income: Repository<Income>,
    pub accounts: Repository<BankAccount>,
    pub cards: Repository<CreditCard>,
    pub transfers: Repository<Transfer>,
    audit: AuditLogger,
}

impl Storage {
    /// Create the data directory if needed; nothing is loaded yet
    pub fn new(paths: BillbankPaths) -> BillbankResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            bills: Repository::new(paths.bills_file()),
            income: Repository::new(paths.income_file()),
            accounts: Repository::new(paths.accounts_file()),
            cards: Repository::new(paths.cards_file()),
            transfers: Repository::new(paths.transfers_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Open and load everything in one step
    pub fn open(paths: BillbankPaths) -> BillbankResult<Self> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &BillbankPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn load_all(&self) -> BillbankResult<()> {
        self.bills.load()?;
        self.income.load()?;
        self.accounts.load()?;
        self.cards.load()?;
        self.transfers.load()?;
        Ok(())
    }

    pub fn save_all(&self) -> BillbankResult<()> {
        self.bills.save()?;
        self.income.save()?;
        self.accounts.save()?;
        self.cards.save()?;
        self.transfers.save()?;
        Ok(())
    }

    fn record_audit(&self, entry: AuditEntry) -> BillbankResult<()> {
        log::debug!("audit: {}", entry.format_human_readable());
        self.audit.log(&entry)
    }

    pub fn log_create<T: Record>(&self, record: &T, summary: &str) -> BillbankResult<()> {
        self.record_audit(
            AuditEntry::create(
                T::ENTITY,
                record.id().to_string(),
                Some(record.name().to_string()),
                record,
            )
            .with_summary(summary),
        )
    }

    pub fn log_update<T: Record>(&self, before: &T, after: &T, summary: &str) -> BillbankResult<()> {
        self.record_audit(
            AuditEntry::update(
                T::ENTITY,
                after.id().to_string(),
                Some(after.name().to_string()),
                before,
                after,
            )
            .with_summary(summary),
        )
    }

    pub fn log_delete<T: Record>(&self, record: &T, summary: &str) -> BillbankResult<()> {
        self.record_audit(
            AuditEntry::delete(
                T::ENTITY,
                record.id().to_string(),
                Some(record.name().to_string()),
                record,
            )
            .with_summary(summary),
        )
    }
}
