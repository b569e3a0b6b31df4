//! Core data models for billbank
//!
//! Bills, income, bank accounts, credit cards and transfers, plus the money
//! and month types their histories are built on.

pub mod account;
pub mod bill;
pub mod card;
pub mod ids;
pub mod income;
pub mod money;
pub mod period;
pub mod transfer;
pub mod validation;

pub use account::{BankAccount, MonthlyBalance};
pub use bill::{Bill, BillPayment};
pub use card::{CardStatement, CreditCard};
pub use ids::{BankAccountId, BillId, CreditCardId, IncomeId, TransferId};
pub use income::{Income, IncomeAffix, IncomeMonth};
pub use money::{Money, MoneyParseError};
pub use period::{Month, Period, PeriodParseError};
pub use transfer::{month_balance, Transfer, TransferKind};
pub use validation::RecordValidationError;
