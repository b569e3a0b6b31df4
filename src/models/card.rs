//! Credit card model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CreditCardId;
use super::money::Money;
use super::period::Month;
use super::validation::{validate_due_day, validate_name, RecordValidationError};
use crate::crypto::ProtectedField;

/// A card's state for one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardStatement {
    pub month: Month,
    pub balance: Money,
    #[serde(default)]
    pub credit_limit: Money,
    #[serde(default)]
    pub paid_amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<NaiveDate>,
}

impl CardStatement {
    fn empty(month: Month, credit_limit: Money) -> Self {
        Self {
            month,
            balance: Money::zero(),
            credit_limit,
            paid_amount: Money::zero(),
            paid_date: None,
        }
    }

    /// Balance left after this month's payments
    pub fn outstanding(&self) -> Money {
        self.balance - self.paid_amount
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditCard {
    pub id: CreditCardId,
    pub name: String,

    /// Shown in listings; the full number is only kept sealed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_four: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_number: Option<ProtectedField>,

    pub due_day: u32,

    #[serde(default)]
    pub statements: Vec<CardStatement>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CreditCard {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CreditCardId::new(),
            name: name.into(),
            last_four: None,
            card_number: None,
            due_day: 1,
            statements: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn statement(&self, month: Month) -> Option<&CardStatement> {
        self.statements.iter().find(|s| s.month == month)
    }

    /// The statement for `month`, opened with the previous limit if missing
    fn open_statement(&mut self, month: Month) -> &mut CardStatement {
        let limit = self
            .statements
            .iter()
            .filter(|s| s.month < month)
            .max_by_key(|s| s.month)
            .map(|s| s.credit_limit)
            .unwrap_or_default();

        let index = match self.statements.iter().position(|s| s.month == month) {
            Some(index) => index,
            None => {
                self.statements.push(CardStatement::empty(month, limit));
                self.statements.sort_by_key(|s| s.month);
                self.statements
                    .iter()
                    .position(|s| s.month == month)
                    .unwrap_or(self.statements.len() - 1)
            }
        };
        &mut self.statements[index]
    }

    pub fn record_balance(&mut self, month: Month, balance: Money) {
        self.open_statement(month).balance = balance;
        self.updated_at = Utc::now();
    }

    pub fn set_credit_limit(&mut self, month: Month, limit: Money) {
        self.open_statement(month).credit_limit = limit;
        self.updated_at = Utc::now();
    }

    /// Add a payment toward `month`'s statement
    pub fn record_payment(&mut self, month: Month, amount: Money, paid_on: NaiveDate) {
        let statement = self.open_statement(month);
        statement.paid_amount += amount;
        statement.paid_date = Some(paid_on);
        self.updated_at = Utc::now();
    }

    pub fn set_due_day(&mut self, day: u32) -> Result<(), RecordValidationError> {
        validate_due_day(day)?;
        self.due_day = day;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Seal the full number and keep its last four digits in the clear
    pub fn set_card_number(
        &mut self,
        number: &str,
        sealed: ProtectedField,
    ) -> Result<(), RecordValidationError> {
        let digits: String = number.chars().filter(char::is_ascii_digit).collect();
        if digits.len() < 4 {
            return Err(RecordValidationError::InvalidLastFour);
        }
        self.last_four = Some(digits[digits.len() - 4..].to_string());
        self.card_number = Some(sealed);
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn validate(&self) -> Result<(), RecordValidationError> {
        validate_name(&self.name)?;
        validate_due_day(self.due_day)?;
        if let Some(last_four) = &self.last_four {
            if last_four.len() != 4 || !last_four.chars().all(|c| c.is_ascii_digit()) {
                return Err(RecordValidationError::InvalidLastFour);
            }
        }
        Ok(())
    }
}

impl fmt::Display for CreditCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.last_four {
            Some(last_four) => write!(f, "{} (*{})", self.name, last_four),
            None => write!(f, "{}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KdfParams;

    fn month(m: u32) -> Month {
        Month::new(2025, m).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[test]
    fn test_payment_opens_statement() {
        let mut card = CreditCard::new("Visa");
        card.record_payment(month(1), Money::from_cents(2500), day(4));
        card.record_payment(month(1), Money::from_cents(500), day(9));

        let statement = card.statement(month(1)).unwrap();
        assert_eq!(statement.paid_amount.cents(), 3000);
        assert_eq!(statement.paid_date, Some(day(9)));
        assert_eq!(card.statements.len(), 1);
    }

    #[test]
    fn test_outstanding() {
        let mut card = CreditCard::new("Visa");
        card.record_balance(month(1), Money::from_cents(10000));
        card.record_payment(month(1), Money::from_cents(4000), day(2));
        assert_eq!(card.statement(month(1)).unwrap().outstanding().cents(), 6000);
    }

    #[test]
    fn test_limit_carries_into_new_month() {
        let mut card = CreditCard::new("Amex");
        card.set_credit_limit(month(1), Money::from_cents(500000));
        card.record_balance(month(3), Money::from_cents(100));
        assert_eq!(
            card.statement(month(3)).unwrap().credit_limit.cents(),
            500000
        );
        assert_eq!(card.statements[0].month, month(1));
    }

    #[test]
    fn test_card_number() {
        let mut card = CreditCard::new("Visa");
        let sealed = ProtectedField::seal("4111-1111-1111-1234", "pw", &KdfParams::cheap()).unwrap();
        card.set_card_number("4111-1111-1111-1234", sealed).unwrap();
        assert_eq!(card.last_four.as_deref(), Some("1234"));
        assert_eq!(card.to_string(), "Visa (*1234)");
        assert!(card.validate().is_ok());

        let sealed = ProtectedField::seal("12", "pw", &KdfParams::cheap()).unwrap();
        assert_eq!(
            card.set_card_number("12", sealed),
            Err(RecordValidationError::InvalidLastFour)
        );
    }

    #[test]
    fn test_due_day() {
        let mut card = CreditCard::new("Visa");
        assert!(card.set_due_day(15).is_ok());
        assert!(card.set_due_day(0).is_err());
        assert_eq!(card.due_day, 15);
    }
}
