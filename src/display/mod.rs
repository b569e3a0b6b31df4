//! Display formatting for terminal output
//!
//! Builds the tables printed by the CLI and drawn by the TUI.

pub mod records;
pub mod table;

pub use records::{
    account_table, bill_table, card_table, format_audit_entries, help_table, income_table,
    transfer_table, view_table,
};
pub use table::{Align, Column, Table};
