//! Bill model
//!
//! A recurring bill with a base amount, a due day and a per-month payment
//! history.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BillId;
use super::money::Money;
use super::period::{Month, Period};
use super::validation::{validate_due_day, validate_name, RecordValidationError};

/// What was paid toward a bill in one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillPayment {
    pub month: Month,
    pub amount: Money,
    pub paid_on: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    pub id: BillId,
    pub name: String,

    /// Expected amount each period
    pub amount: Money,

    /// Day of the month the bill is due (1-31)
    pub due_day: u32,

    #[serde(default)]
    pub period: Period,

    /// At most one entry per month, oldest first
    #[serde(default)]
    pub payments: Vec<BillPayment>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bill {
    /// A monthly bill due on the first, with no amount yet
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: BillId::new(),
            name: name.into(),
            amount: Money::zero(),
            due_day: 1,
            period: Period::Monthly,
            payments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_amount(&mut self, amount: Money) {
        self.amount = amount;
        self.updated_at = Utc::now();
    }

    pub fn set_due_day(&mut self, day: u32) -> Result<(), RecordValidationError> {
        validate_due_day(day)?;
        self.due_day = day;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// The due date within `month`, clamped for short months
    pub fn due_date(&self, month: Month) -> Option<NaiveDate> {
        month.day(self.due_day)
    }

    pub fn payment_for(&self, month: Month) -> Option<&BillPayment> {
        self.payments.iter().find(|p| p.month == month)
    }

    pub fn paid_in(&self, month: Month) -> Money {
        self.payment_for(month).map(|p| p.amount).unwrap_or_default()
    }

    /// Paid at least the bill's amount for `month`
    pub fn is_paid(&self, month: Month) -> bool {
        self.payment_for(month)
            .map(|p| p.amount >= self.amount)
            .unwrap_or(false)
    }

    /// What is still owed for `month`, never below zero
    pub fn remaining(&self, month: Month) -> Money {
        let left = self.amount - self.paid_in(month);
        if left.is_negative() {
            Money::zero()
        } else {
            left
        }
    }

    /// Add a payment for `month`; repeated payments accumulate
    pub fn record_payment(&mut self, month: Month, amount: Money, paid_on: NaiveDate) {
        match self.payments.iter_mut().find(|p| p.month == month) {
            Some(payment) => {
                payment.amount += amount;
                payment.paid_on = paid_on;
            }
            None => {
                self.payments.push(BillPayment {
                    month,
                    amount,
                    paid_on,
                    notes: None,
                });
                self.payments.sort_by_key(|p| p.month);
            }
        }
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), RecordValidationError> {
        validate_name(&self.name)?;
        validate_due_day(self.due_day)?;
        if self.amount.is_negative() {
            return Err(RecordValidationError::NegativeAmount);
        }
        Ok(())
    }
}

impl fmt::Display for Bill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, due day {})", self.name, self.amount, self.due_day)
    }
}
