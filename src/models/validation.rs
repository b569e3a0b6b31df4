//! Validation shared by every record type

use thiserror::Error;

/// Longest record name accepted
pub const MAX_NAME_LEN: usize = 100;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Name too long ({0} chars, max 100)")]
    NameTooLong(usize),

    #[error("Due day must be between 1 and 31, got {0}")]
    InvalidDueDay(u32),

    #[error("Amount cannot be negative")]
    NegativeAmount,

    #[error("Last four digits must be exactly 4 digits")]
    InvalidLastFour,
}

pub fn validate_name(name: &str) -> Result<(), RecordValidationError> {
    if name.trim().is_empty() {
        return Err(RecordValidationError::EmptyName);
    }
    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(RecordValidationError::NameTooLong(len));
    }
    Ok(())
}

pub fn validate_due_day(day: u32) -> Result<(), RecordValidationError> {
    if (1..=31).contains(&day) {
        Ok(())
    } else {
        Err(RecordValidationError::InvalidDueDay(day))
    }
}
