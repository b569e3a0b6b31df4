//! Record CLI commands
//!
//! Listing for every record type, plus the protected account and card
//! numbers, which need the password.

use clap::Subcommand;

use crate::commands::{Session, View};
use crate::config::{BillbankPaths, Settings};
use crate::display::view_table;
use crate::error::{BillbankError, BillbankResult};
use crate::models::Month;
use crate::services::{Protector, RecordService};
use crate::storage::Storage;

/// Environment variable read for the protected-field password
pub const PASSWORD_ENV: &str = "BILLBANK_PASSWORD";

/// Subcommands shared by bills, income and transfers
#[derive(Subcommand)]
pub enum ListCommands {
    /// List records for a month
    List {
        /// Month as YYYY-MM (default: current month)
        #[arg(short, long)]
        month: Option<Month>,
    },
}

#[derive(Subcommand)]
pub enum AccountCommands {
    /// List accounts with their balance for a month
    List {
        /// Month as YYYY-MM (default: current month)
        #[arg(short, long)]
        month: Option<Month>,
    },
    /// Store an account number encrypted
    SetNumber {
        /// Account name or ID
        account: String,
        number: String,
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: Option<String>,
    },
    /// Store notes encrypted
    SetNotes {
        /// Account name or ID
        account: String,
        notes: String,
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: Option<String>,
    },
    /// Print the decrypted account number and notes
    Reveal {
        /// Account name or ID
        account: String,
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum CardCommands {
    /// List cards with their statement for a month
    List {
        /// Month as YYYY-MM (default: current month)
        #[arg(short, long)]
        month: Option<Month>,
    },
    /// Store a card number encrypted, keeping its last four digits visible
    SetNumber {
        /// Card name or ID
        card: String,
        number: String,
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: Option<String>,
    },
    /// Print the decrypted card number
    Reveal {
        /// Card name or ID
        card: String,
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: Option<String>,
    },
}

fn print_view(storage: &Storage, view: View, month: Option<Month>) -> BillbankResult<()> {
    let mut session = Session::default();
    session.view = view;
    if let Some(month) = month {
        session.month = month;
    }

    println!("{} for {}", view.title(), session.month);
    println!();
    let rendered = view_table(storage, &session)?.render();
    println!("{}", rendered.trim_end());
    Ok(())
}

/// Handle `bill|income|transfer list`
pub fn handle_list_command(storage: &Storage, view: View, cmd: ListCommands) -> BillbankResult<()> {
    match cmd {
        ListCommands::List { month } => print_view(storage, view, month),
    }
}

/// Prompt for a password (hidden input)
fn prompt_password() -> BillbankResult<String> {
    rpassword::prompt_password("Password: ")
        .map_err(|e| BillbankError::Encryption(format!("Failed to read password: {}", e)))
}

fn unlock(
    paths: &BillbankPaths,
    settings: &mut Settings,
    password: Option<String>,
) -> BillbankResult<Protector> {
    let password = match password {
        Some(password) => password,
        None => prompt_password()?,
    };
    Protector::unlock(paths, settings, &password)
}

pub fn handle_account_command(
    storage: &Storage,
    settings: &mut Settings,
    cmd: AccountCommands,
) -> BillbankResult<()> {
    let service = RecordService::accounts(storage);

    match cmd {
        AccountCommands::List { month } => print_view(storage, View::Accounts, month)?,

        AccountCommands::SetNumber {
            account,
            number,
            password,
        } => {
            let found = service.require(&account)?;
            let protector = unlock(storage.paths(), settings, password)?;
            let sealed = protector.seal(number.trim())?;
            service.update(found.id, "account number set", |account| {
                account.set_account_number(sealed);
                Ok(())
            })?;
            println!("Account number saved for {}", found.name);
        }

        AccountCommands::SetNotes {
            account,
            notes,
            password,
        } => {
            let found = service.require(&account)?;
            let protector = unlock(storage.paths(), settings, password)?;
            let sealed = protector.seal(&notes)?;
            service.update(found.id, "notes set", |account| {
                account.set_notes(sealed);
                Ok(())
            })?;
            println!("Notes saved for {}", found.name);
        }

        AccountCommands::Reveal { account, password } => {
            let found = service.require(&account)?;
            let protector = unlock(storage.paths(), settings, password)?;

            println!("{}", found.name);
            match &found.account_number {
                Some(field) => println!("  Number: {}", protector.open(field)?.as_str()),
                None => println!("  Number: (not set)"),
            }
            match &found.notes {
                Some(field) => println!("  Notes:  {}", protector.open(field)?.as_str()),
                None => println!("  Notes:  (not set)"),
            }
        }
    }
    Ok(())
}

pub fn handle_card_command(
    storage: &Storage,
    settings: &mut Settings,
    cmd: CardCommands,
) -> BillbankResult<()> {
    let service = RecordService::cards(storage);

    match cmd {
        CardCommands::List { month } => print_view(storage, View::Cards, month)?,

        CardCommands::SetNumber {
            card,
            number,
            password,
        } => {
            let found = service.require(&card)?;
            let protector = unlock(storage.paths(), settings, password)?;
            let sealed = protector.seal(number.trim())?;
            let updated = service.update(found.id, "card number set", |card| {
                Ok(card.set_card_number(&number, sealed)?)
            })?;
            println!("Card number saved for {}", updated);
        }

        CardCommands::Reveal { card, password } => {
            let found = service.require(&card)?;
            let field = found
                .card_number
                .as_ref()
                .ok_or_else(|| BillbankError::Validation(format!("{} has no card number", found.name)))?;
            let protector = unlock(storage.paths(), settings, password)?;
            println!("{}: {}", found, protector.open(field)?.as_str());
        }
    }
    Ok(())
}
