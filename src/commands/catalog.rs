//! The finance command table
//!
//! Every command the command line understands, with the validators and key
//! filters of their arguments.

use std::fmt;

use crate::models::validation::{validate_due_day, validate_name};
use crate::models::Money;

use super::registry::CommandRegistry;
use super::tree::{CommandTree, CommandTreeBuilder, CommandTreeError};

/// What a fully matched finance command does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandAction {
    Create,
    Select,
    SetAmount,
    SetDueDay,
    Pay,
    Affix,
    Deposit,
    Withdraw,
    RecordBalance,
    Rename,
    Delete,
    Show,
    Month,
    Help,
    Quit,
}

/// The record types a command can address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Bill,
    Income,
    Account,
    Card,
}

impl RecordKind {
    pub const ALIASES: [&'static str; 4] = ["bill", "income", "account", "card"];

    pub fn from_alias(alias: &str) -> Option<Self> {
        match alias {
            "bill" => Some(Self::Bill),
            "income" => Some(Self::Income),
            "account" => Some(Self::Account),
            "card" => Some(Self::Card),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Bill => "bill",
            Self::Income => "income",
            Self::Account => "account",
            Self::Card => "card",
        }
    }

    /// The view listing records of this kind
    pub const fn view(self) -> View {
        match self {
            Self::Bill => View::Bills,
            Self::Income => View::Income,
            Self::Account => View::Accounts,
            Self::Card => View::Cards,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the records panel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Bills,
    Income,
    Accounts,
    Cards,
    Transfers,
    Help,
}

impl View {
    pub const ALIASES: [&'static str; 5] = ["bills", "income", "accounts", "cards", "transfers"];

    pub fn from_alias(alias: &str) -> Option<Self> {
        match alias {
            "bills" => Some(Self::Bills),
            "income" => Some(Self::Income),
            "accounts" => Some(Self::Accounts),
            "cards" => Some(Self::Cards),
            "transfers" => Some(Self::Transfers),
            _ => None,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Bills => "Bills",
            Self::Income => "Income",
            Self::Accounts => "Accounts",
            Self::Cards => "Credit Cards",
            Self::Transfers => "Transfers",
            Self::Help => "Commands",
        }
    }
}

fn amount(arg: &str) -> Result<Money, String> {
    Money::parse(arg).map_err(|e| format!("'{}': {}", arg, e))
}

/// Any well-formed amount
pub fn validate_amount(arg: &str) -> Result<(), String> {
    amount(arg).map(|_| ())
}

/// A well-formed amount that is zero or more
pub fn validate_non_negative_amount(arg: &str) -> Result<(), String> {
    if amount(arg)?.is_negative() {
        return Err("amount cannot be negative".to_string());
    }
    Ok(())
}

/// A well-formed amount greater than zero
pub fn validate_positive_amount(arg: &str) -> Result<(), String> {
    if !amount(arg)?.is_positive() {
        return Err("amount must be greater than zero".to_string());
    }
    Ok(())
}

pub fn validate_record_name(arg: &str) -> Result<(), String> {
    validate_name(arg).map_err(|e| e.to_string())
}

pub fn validate_day(arg: &str) -> Result<(), String> {
    let day: u32 = arg
        .parse()
        .map_err(|_| format!("'{}' is not a day of the month", arg))?;
    validate_due_day(day).map_err(|e| e.to_string())
}

fn is_digit(key: char) -> bool {
    key.is_ascii_digit()
}

fn money_tree(action: CommandAction, description: &str) -> CommandTreeBuilder<CommandAction> {
    CommandTree::builder(action)
        .with_argument("<amount>")
        .key_filter(Money::is_amount_char)
        .description(description)
}

/// Build the registry of every finance command
pub fn finance_commands() -> Result<CommandRegistry<CommandAction>, CommandTreeError> {
    use CommandAction::*;

    CommandRegistry::new()
        .with(
            CommandTree::builder(Create)
                .stage(["new", "add"])
                .stage(RecordKind::ALIASES)
                .with_argument("<name>")
                .validator(validate_record_name)
                .description("Create a record and select it")
                .build()?,
        )?
        .with(
            CommandTree::builder(Select)
                .stage(["use", "select"])
                .stage(RecordKind::ALIASES)
                .with_argument("<name>")
                .validator(validate_record_name)
                .description("Select a record by name")
                .build()?,
        )?
        .with(
            money_tree(SetAmount, "Set the amount of the selected bill or income")
                .stage(["set"])
                .stage(["bill", "income"])
                .stage(["amount", "amt"])
                .validator(validate_non_negative_amount)
                .build()?,
        )?
        .with(
            CommandTree::builder(SetDueDay)
                .stage(["due"])
                .stage(["day"])
                .with_argument("<1-31>")
                .validator(validate_day)
                .key_filter(is_digit)
                .description("Set the due day of the selected bill")
                .build()?,
        )?
        .with(
            money_tree(Pay, "Record a payment on the selected bill or card this month")
                .stage(["pay", "paid"])
                .stage(["bill", "card"])
                .validator(validate_positive_amount)
                .build()?,
        )?
        .with(
            money_tree(Affix, "Add an extra amount to the selected income this month")
                .stage(["affix", "bonus"])
                .validator(validate_amount)
                .build()?,
        )?
        .with(
            money_tree(Deposit, "Deposit into the selected account")
                .stage(["deposit"])
                .validator(validate_positive_amount)
                .build()?,
        )?
        .with(
            money_tree(Withdraw, "Withdraw from the selected account")
                .stage(["withdraw"])
                .validator(validate_positive_amount)
                .build()?,
        )?
        .with(
            money_tree(RecordBalance, "Record the selected account's balance this month")
                .stage(["balance"])
                .validator(validate_amount)
                .build()?,
        )?
        .with(
            CommandTree::builder(Rename)
                .stage(["rename"])
                .stage(RecordKind::ALIASES)
                .with_argument("<name>")
                .validator(validate_record_name)
                .description("Rename the selected record")
                .build()?,
        )?
        .with(
            CommandTree::builder(Delete)
                .stage(["delete", "rm"])
                .stage(RecordKind::ALIASES)
                .description("Delete the selected record")
                .build()?,
        )?
        .with(
            CommandTree::builder(Show)
                .stage(["show", "view"])
                .stage(View::ALIASES)
                .description("Switch the records view")
                .build()?,
        )?
        .with(
            CommandTree::builder(Month)
                .stage(["month"])
                .stage(["next", "prev"])
                .description("Move to the next or previous month")
                .build()?,
        )?
        .with(
            CommandTree::builder(Help)
                .stage(["help"])
                .description("List every command")
                .build()?,
        )?
        .with(
            CommandTree::builder(Quit)
                .stage(["quit", "exit"])
                .description("Leave billbank")
                .build()?,
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandError;

    fn registry() -> CommandRegistry<CommandAction> {
        finance_commands().unwrap()
    }

    #[test]
    fn test_catalog_builds() {
        let registry = registry();
        assert_eq!(registry.trees().len(), 15);
        assert_eq!(registry.aliases()[0], "new");
        assert!(registry.find("rm").is_some());
    }

    #[test]
    fn test_set_amount_walkthrough() {
        let registry = registry();

        let status = registry.resolve("set").status;
        assert_eq!(status.suggestions, ["set bill", "set income"]);
        assert_eq!(status.error, Some(CommandError::InvalidCommand));

        let status = registry.resolve("set bill").status;
        assert_eq!(status.suggestions, ["set bill amount", "set bill amt"]);

        let status = registry.resolve("set bill amount").status;
        assert!(!status.is_complete);
        assert_eq!(status.matched_depth, 3);

        let resolution = registry.resolve("set bill amount 1200.50");
        assert!(resolution.status.is_ready());
        let bound = resolution.status.action.unwrap();
        assert_eq!(bound.action, CommandAction::SetAmount);
        assert_eq!(bound.field(1), Some("bill"));
        assert_eq!(bound.argument.as_deref(), Some("1200.50"));
    }

    #[test]
    fn test_money_validation_errors() {
        let registry = registry();

        let status = registry.resolve("bonus 12.5").status;
        assert!(status.is_ready());

        let status = registry.resolve("bonus abc").status;
        assert!(status.is_complete);
        assert!(matches!(status.error, Some(CommandError::Validation(_))));
        assert!(status.action.is_none());

        let status = registry.resolve("deposit 0").status;
        assert!(matches!(status.error, Some(CommandError::Validation(_))));

        let status = registry.resolve("set income amt -5").status;
        assert!(matches!(status.error, Some(CommandError::Validation(_))));
        assert!(registry.resolve("balance -5").status.is_ready());
    }

    #[test]
    fn test_due_day() {
        let registry = registry();
        assert!(registry.resolve("due day 15").status.is_ready());
        assert!(registry.resolve("due day 32").status.error.is_some());
        assert!(registry.accepts_key("due day ", '3'));
        assert!(!registry.accepts_key("due day ", 'x'));
    }

    #[test]
    fn test_key_filter_only_in_argument_slot() {
        let registry = registry();
        assert!(registry.accepts_key("depo", 's'));
        assert!(registry.accepts_key("deposit ", '$'));
        assert!(!registry.accepts_key("deposit ", 'k'));
        assert!(registry.accepts_key("new bill ", 'k'));
    }

    #[test]
    fn test_names_are_single_words() {
        let registry = registry();
        assert!(registry.resolve("new bill Rent").status.is_ready());
        let status = registry.resolve("new bill Car Loan").status;
        assert_eq!(status.error, Some(CommandError::InvalidCommand));
    }

    #[test]
    fn test_unknown_word() {
        let status = registry().resolve("frobnicate").status;
        assert!(!status.is_command);
        assert_eq!(status.error, Some(CommandError::NotCommand));
        assert!(status.suggestions.contains(&"quit".to_string()));
    }

    #[test]
    fn test_kind_and_view_aliases() {
        for alias in RecordKind::ALIASES {
            assert_eq!(RecordKind::from_alias(alias).unwrap().label(), alias);
        }
        for alias in View::ALIASES {
            assert!(View::from_alias(alias).is_some());
        }
        assert_eq!(RecordKind::Card.view(), View::Cards);
        assert_eq!(View::from_alias("help"), None);
    }
}
