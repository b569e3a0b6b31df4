//! billbank - Terminal record keeper for bills, income, accounts and cards
//!
//! Everything is driven from a single command line. As the user types, the
//! command engine re-matches the whole line against a set of command trees
//! and reports whether it is a command, whether it is complete, which full
//! lines it could be completed to, and which action it would run.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `commands`: Command trees, the line matcher, completions and the finance
//!   command catalog
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Bills, income, accounts, cards, transfers, money and months
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `crypto`: Encrypted record fields
//! - `display`: Tables for terminal output
//! - `cli`: Non-interactive command handlers
//! - `tui`: The interactive terminal interface
//!
//! # Example
//!
//! ```rust
//! use billbank::commands::{CommandTree, CommandError};
//!
//! fn digits(arg: &str) -> Result<(), String> {
//!     arg.parse::<u32>().map(|_| ()).map_err(|e| e.to_string())
//! }
//!
//! let tree = CommandTree::builder("due")
//!     .stage(["due"])
//!     .stage(["day"])
//!     .with_argument("<day>")
//!     .validator(digits)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(tree.parse("due").suggestions, ["due day"]);
//! assert!(tree.parse("due day 5").is_ready());
//! assert_eq!(tree.parse("pay").error, Some(CommandError::NotCommand));
//! ```

pub mod audit;
pub mod cli;
pub mod commands;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::{BillbankError, BillbankResult};
