//! Bank account balances and transfers
//!
//! Generic create/rename/delete goes through [`RecordService`]; this service
//! covers what only accounts do: monthly balances, deposits and withdrawals,
//! and removing an account together with its transfers.

use chrono::NaiveDate;

use crate::error::{BillbankError, BillbankResult};
use crate::models::{month_balance, BankAccount, BankAccountId, Money, Month, Transfer, TransferKind};
use crate::storage::Storage;

use super::records::RecordService;

/// Service for account-specific operations
pub struct AccountService<'a> {
    storage: &'a Storage,
}

impl<'a> AccountService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn records(&self) -> RecordService<'a, BankAccount> {
        RecordService::accounts(self.storage)
    }

    /// Transfers booked against `account_id` in `month`, oldest first
    pub fn transfers_for(
        &self,
        account_id: BankAccountId,
        month: Month,
    ) -> BillbankResult<Vec<Transfer>> {
        self.storage
            .transfers
            .filter(|t| t.account_id == account_id && t.month == month)
    }

    /// Latest recorded balance plus the month's deposits minus withdrawals
    pub fn month_balance(&self, account: &BankAccount, month: Month) -> BillbankResult<Money> {
        let transfers = self.transfers_for(account.id, month)?;
        Ok(month_balance(
            account.latest_balance(month),
            account.id,
            month,
            &transfers,
        ))
    }

    pub fn record_balance(
        &self,
        account_id: BankAccountId,
        month: Month,
        balance: Money,
    ) -> BillbankResult<BankAccount> {
        let summary = format!("balance for {} set to {}", month, balance);
        self.records().update(account_id, &summary, |account| {
            account.record_balance(month, balance);
            Ok(())
        })
    }

    pub fn deposit(
        &self,
        account_id: BankAccountId,
        amount: Money,
        date: NaiveDate,
        month: Month,
    ) -> BillbankResult<Transfer> {
        self.transfer(account_id, TransferKind::Deposit, amount, date, month)
    }

    pub fn withdraw(
        &self,
        account_id: BankAccountId,
        amount: Money,
        date: NaiveDate,
        month: Month,
    ) -> BillbankResult<Transfer> {
        self.transfer(account_id, TransferKind::Withdrawal, amount, date, month)
    }

    fn transfer(
        &self,
        account_id: BankAccountId,
        kind: TransferKind,
        amount: Money,
        date: NaiveDate,
        month: Month,
    ) -> BillbankResult<Transfer> {
        if !amount.is_positive() {
            return Err(BillbankError::Validation(format!(
                "A {} must be a positive amount",
                kind
            )));
        }
        let account = self.records().require_id(account_id)?;

        let transfer = Transfer::new(account.id, kind, amount, date).in_month(month);
        let transfer = RecordService::transfers(self.storage).create(transfer)?;

        log::debug!("{} of {} on '{}' for {}", kind, amount, account.name, month);
        Ok(transfer)
    }

    /// Delete an account and every transfer that belongs to it
    pub fn delete(&self, account_id: BankAccountId) -> BillbankResult<(BankAccount, usize)> {
        let account = self.records().delete(account_id)?;

        let removed = self.storage.transfers.delete_where(|t| t.account_id == account_id)?;
        if removed > 0 {
            self.storage.transfers.save()?;
        }
        Ok((account, removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BillbankPaths;
    use tempfile::TempDir;

    fn setup() -> (Storage, BankAccount, TempDir) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(BillbankPaths::with_base_dir(dir.path().to_path_buf())).unwrap();
        let account = RecordService::accounts(&storage)
            .create(BankAccount::new("Checking"))
            .unwrap();
        (storage, account, dir)
    }

    fn jan() -> Month {
        Month::new(2025, 1).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[test]
    fn test_balance_with_transfers() {
        let (storage, account, _dir) = setup();
        let service = AccountService::new(&storage);

        let account = service
            .record_balance(account.id, jan(), Money::from_cents(100000))
            .unwrap();
        service
            .deposit(account.id, Money::from_cents(25000), day(3), jan())
            .unwrap();
        service
            .withdraw(account.id, Money::from_cents(5050), day(9), jan())
            .unwrap();

        assert_eq!(
            service.month_balance(&account, jan()).unwrap(),
            Money::from_cents(119950)
        );
        assert_eq!(service.transfers_for(account.id, jan()).unwrap().len(), 2);
        assert!(service.transfers_for(account.id, jan().next()).unwrap().is_empty());
    }

    #[test]
    fn test_transfer_amount_must_be_positive() {
        let (storage, account, _dir) = setup();
        let service = AccountService::new(&storage);

        assert!(service
            .deposit(account.id, Money::zero(), day(1), jan())
            .unwrap_err()
            .is_validation());
        assert!(service
            .withdraw(account.id, Money::from_cents(-5), day(1), jan())
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_transfer_to_missing_account() {
        let (storage, _account, _dir) = setup();
        let service = AccountService::new(&storage);
        let err = service
            .deposit(BankAccountId::new(), Money::from_cents(1), day(1), jan())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_cascades_to_transfers() {
        let (storage, account, _dir) = setup();
        let service = AccountService::new(&storage);
        service
            .deposit(account.id, Money::from_cents(100), day(2), jan())
            .unwrap();

        let (deleted, removed) = service.delete(account.id).unwrap();
        assert_eq!(deleted.name, "Checking");
        assert_eq!(removed, 1);
        assert_eq!(storage.transfers.count().unwrap(), 0);
    }
}
