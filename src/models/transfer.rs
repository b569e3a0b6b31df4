//! Money moved into or out of a bank account

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BankAccountId, TransferId};
use super::money::Money;
use super::period::Month;
use super::validation::RecordValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferKind {
    Withdrawal,
    Deposit,
    /// Between the user's own accounts; does not change the month's total
    Move,
}

impl fmt::Display for TransferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Withdrawal => write!(f, "withdrawal"),
            Self::Deposit => write!(f, "deposit"),
            Self::Move => write!(f, "move"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transfer {
    pub id: TransferId,
    pub account_id: BankAccountId,
    pub month: Month,
    pub name: String,
    /// Always positive; the kind gives the direction
    pub amount: Money,
    pub date: NaiveDate,
    pub kind: TransferKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_whom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_whom: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Transfer {
    pub fn new(
        account_id: BankAccountId,
        kind: TransferKind,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: TransferId::new(),
            account_id,
            month: Month::containing(date),
            name: kind.to_string(),
            amount,
            date,
            kind,
            to_whom: None,
            from_whom: None,
            created_at: Utc::now(),
        }
    }

    /// Book the transfer against `month` instead of the month of its date
    pub fn in_month(mut self, month: Month) -> Self {
        self.month = month;
        self
    }

    /// Effect on the account balance
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransferKind::Deposit => self.amount,
            TransferKind::Withdrawal => -self.amount,
            TransferKind::Move => Money::zero(),
        }
    }

    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.amount.is_negative() {
            return Err(RecordValidationError::NegativeAmount);
        }
        Ok(())
    }
}

/// Recorded balance plus deposits minus withdrawals for one account and month
pub fn month_balance<'a>(
    recorded: Money,
    account_id: BankAccountId,
    month: Month,
    transfers: impl IntoIterator<Item = &'a Transfer>,
) -> Money {
    recorded
        + transfers
            .into_iter()
            .filter(|t| t.account_id == account_id && t.month == month)
            .map(Transfer::signed_amount)
            .sum::<Money>()
}
