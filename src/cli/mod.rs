//! CLI command handlers
//!
//! Bridges the clap argument parsing in `main` with the command engine and
//! the service layer.

pub mod line;
pub mod records;

pub use line::{describe_line, handle_complete, handle_run};
pub use records::{
    handle_account_command, handle_card_command, handle_list_command, AccountCommands,
    CardCommands, ListCommands, PASSWORD_ENV,
};
