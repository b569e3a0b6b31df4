//! Bank account model
//!
//! The account number and notes are stored encrypted. Balances are recorded
//! once per month; transfers adjust them (see [`super::transfer`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::BankAccountId;
use super::money::Money;
use super::period::Month;
use super::validation::{validate_name, RecordValidationError};
use crate::crypto::ProtectedField;

/// Recorded balance for one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBalance {
    pub month: Month,
    pub balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankAccount {
    pub id: BankAccountId,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<ProtectedField>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<ProtectedField>,

    #[serde(default)]
    pub balances: Vec<MonthlyBalance>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BankAccount {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: BankAccountId::new(),
            name: name.into(),
            account_number: None,
            notes: None,
            balances: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Balance recorded for exactly `month`
    pub fn recorded_balance(&self, month: Month) -> Option<Money> {
        self.balances
            .iter()
            .find(|b| b.month == month)
            .map(|b| b.balance)
    }

    /// Most recent balance recorded at or before `month`
    pub fn latest_balance(&self, month: Month) -> Money {
        self.balances
            .iter()
            .filter(|b| b.month <= month)
            .max_by_key(|b| b.month)
            .map(|b| b.balance)
            .unwrap_or_default()
    }

    /// Set the balance for `month`, replacing any earlier record
    pub fn record_balance(&mut self, month: Month, balance: Money) {
        match self.balances.iter_mut().find(|b| b.month == month) {
            Some(entry) => entry.balance = balance,
            None => {
                self.balances.push(MonthlyBalance { month, balance });
                self.balances.sort_by_key(|b| b.month);
            }
        }
        self.updated_at = Utc::now();
    }

    pub fn set_account_number(&mut self, sealed: ProtectedField) {
        self.account_number = Some(sealed);
        self.updated_at = Utc::now();
    }

    pub fn set_notes(&mut self, sealed: ProtectedField) {
        self.notes = Some(sealed);
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), RecordValidationError> {
        validate_name(&self.name)
    }
}
