//! Income model
//!
//! An income source with a base amount. Each month it is tracked gets a
//! history entry seeded from the base amount, and extra money such as a bonus
//! or overtime is affixed to that month.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::IncomeId;
use super::money::Money;
use super::period::{Month, Period};
use super::validation::{validate_name, RecordValidationError};

/// An amount added on top of a month's income
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeAffix {
    pub name: String,
    pub amount: Money,
}

/// Income received in one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeMonth {
    pub month: Month,
    /// Base amount at the time the month was opened
    pub amount: Money,
    #[serde(default)]
    pub affixes: Vec<IncomeAffix>,
}

impl IncomeMonth {
    pub fn total(&self) -> Money {
        self.amount + self.affixes.iter().map(|a| a.amount).sum::<Money>()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Income {
    pub id: IncomeId,
    pub name: String,
    pub amount: Money,
    #[serde(default)]
    pub period: Period,
    #[serde(default)]
    pub history: Vec<IncomeMonth>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Income {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: IncomeId::new(),
            name: name.into(),
            amount: Money::zero(),
            period: Period::Monthly,
            history: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Change the base amount; months already opened keep their amount
    pub fn set_amount(&mut self, amount: Money) {
        self.amount = amount;
        self.updated_at = Utc::now();
    }

    pub fn month(&self, month: Month) -> Option<&IncomeMonth> {
        self.history.iter().find(|h| h.month == month)
    }

    /// The history entry for `month`, opened from the base amount if missing
    pub fn open_month(&mut self, month: Month) -> &mut IncomeMonth {
        let index = match self.history.iter().position(|h| h.month == month) {
            Some(index) => index,
            None => {
                self.history.push(IncomeMonth {
                    month,
                    amount: self.amount,
                    affixes: Vec::new(),
                });
                self.history.sort_by_key(|h| h.month);
                self.history
                    .iter()
                    .position(|h| h.month == month)
                    .unwrap_or(self.history.len() - 1)
            }
        };
        &mut self.history[index]
    }

    /// Add an extra amount to `month`
    pub fn affix(&mut self, month: Month, name: impl Into<String>, amount: Money) {
        self.open_month(month).affixes.push(IncomeAffix {
            name: name.into(),
            amount,
        });
        self.updated_at = Utc::now();
    }

    /// Everything received in `month`; the base amount when not yet opened
    pub fn total_for(&self, month: Month) -> Money {
        self.month(month)
            .map(IncomeMonth::total)
            .unwrap_or(self.amount)
    }

    pub fn validate(&self) -> Result<(), RecordValidationError> {
        validate_name(&self.name)?;
        if self.amount.is_negative() {
            return Err(RecordValidationError::NegativeAmount);
        }
        Ok(())
    }
}
