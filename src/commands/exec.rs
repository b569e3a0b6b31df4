//! Running finance commands
//!
//! A [`Session`] holds what the command line operates on between commands:
//! the current month, the visible view and one selected record per kind.

use chrono::{Local, NaiveDate};

use crate::display::help_table;
use crate::error::{BillbankError, BillbankResult};
use crate::models::{
    BankAccount, BankAccountId, Bill, BillId, CreditCard, CreditCardId, Income, IncomeId, Money,
    Month,
};
use crate::services::{AccountService, RecordService};
use crate::storage::{Record, Storage};

use super::catalog::{CommandAction, RecordKind, View};
use super::matcher::{BoundAction, CommandError};
use super::registry::CommandRegistry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub month: Month,
    pub view: View,
    pub bill: Option<BillId>,
    pub income: Option<IncomeId>,
    pub account: Option<BankAccountId>,
    pub card: Option<CreditCardId>,
    /// Date stamped on payments and transfers
    pub today: NaiveDate,
    pub should_quit: bool,
}

impl Session {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            month: Month::containing(today),
            view: View::default(),
            bill: None,
            income: None,
            account: None,
            card: None,
            today,
            should_quit: false,
        }
    }

    fn clear(&mut self, kind: RecordKind) {
        match kind {
            RecordKind::Bill => self.bill = None,
            RecordKind::Income => self.income = None,
            RecordKind::Account => self.account = None,
            RecordKind::Card => self.card = None,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

fn selected<I>(id: Option<I>, kind: RecordKind) -> BillbankResult<I> {
    id.ok_or(BillbankError::NothingSelected(kind.label()))
}

fn kind_field(bound: &BoundAction<CommandAction>) -> BillbankResult<RecordKind> {
    bound
        .field(1)
        .and_then(RecordKind::from_alias)
        .ok_or(BillbankError::Command(CommandError::InvalidCommand))
}

fn argument(bound: &BoundAction<CommandAction>) -> BillbankResult<&str> {
    bound
        .argument
        .as_deref()
        .ok_or(BillbankError::Command(CommandError::InvalidCommand))
}

fn amount_argument(bound: &BoundAction<CommandAction>) -> BillbankResult<Money> {
    Ok(Money::parse(argument(bound)?)?)
}

/// Runs command lines against storage
pub struct Executor<'a> {
    storage: &'a Storage,
    registry: &'a CommandRegistry<CommandAction>,
}

impl<'a> Executor<'a> {
    pub fn new(storage: &'a Storage, registry: &'a CommandRegistry<CommandAction>) -> Self {
        Self { storage, registry }
    }

    /// Resolve and run one line; lines that are not ready report their error
    pub fn run_line(&self, session: &mut Session, line: &str) -> BillbankResult<String> {
        let status = self.registry.resolve(line).status;
        match status.action {
            Some(bound) => self.execute(session, &bound),
            None => Err(status.error.unwrap_or(CommandError::InvalidCommand).into()),
        }
    }

    /// Perform a bound action and describe what happened
    pub fn execute(
        &self,
        session: &mut Session,
        bound: &BoundAction<CommandAction>,
    ) -> BillbankResult<String> {
        log::debug!("executing {:?}: {}", bound.action, bound.fields.join(" "));

        match bound.action {
            CommandAction::Create => self.create(session, kind_field(bound)?, argument(bound)?),
            CommandAction::Select => self.select(session, kind_field(bound)?, argument(bound)?),
            CommandAction::SetAmount => {
                self.set_amount(session, kind_field(bound)?, amount_argument(bound)?)
            }
            CommandAction::SetDueDay => {
                let day: u32 = argument(bound)?
                    .parse()
                    .map_err(|_| BillbankError::Validation("Due day must be a number".into()))?;
                let bill = RecordService::bills(self.storage).update(
                    selected(session.bill, RecordKind::Bill)?,
                    &format!("due day set to {}", day),
                    |bill| Ok(bill.set_due_day(day)?),
                )?;
                Ok(format!("{} is due on day {}", bill.name, bill.due_day))
            }
            CommandAction::Pay => self.pay(session, kind_field(bound)?, amount_argument(bound)?),
            CommandAction::Affix => {
                let amount = amount_argument(bound)?;
                let label = bound.field(0).unwrap_or("affix").to_string();
                let month = session.month;
                let income = RecordService::income(self.storage).update(
                    selected(session.income, RecordKind::Income)?,
                    &format!("{} of {} for {}", label, amount, month),
                    |income| {
                        income.affix(month, label, amount);
                        Ok(())
                    },
                )?;
                Ok(format!(
                    "{} total for {} is {}",
                    income.name,
                    month,
                    income.total_for(month)
                ))
            }
            CommandAction::Deposit | CommandAction::Withdraw => {
                let amount = amount_argument(bound)?;
                let account_id = selected(session.account, RecordKind::Account)?;
                let service = AccountService::new(self.storage);
                let transfer = if bound.action == CommandAction::Deposit {
                    service.deposit(account_id, amount, session.today, session.month)?
                } else {
                    service.withdraw(account_id, amount, session.today, session.month)?
                };
                let account = RecordService::accounts(self.storage).require_id(account_id)?;
                Ok(format!(
                    "{} of {} recorded; {} balance is {}",
                    transfer.kind,
                    transfer.amount,
                    account.name,
                    service.month_balance(&account, session.month)?
                ))
            }
            CommandAction::RecordBalance => {
                let amount = amount_argument(bound)?;
                let account = AccountService::new(self.storage).record_balance(
                    selected(session.account, RecordKind::Account)?,
                    session.month,
                    amount,
                )?;
                Ok(format!("{} balance for {} is {}", account.name, session.month, amount))
            }
            CommandAction::Rename => self.rename(session, kind_field(bound)?, argument(bound)?),
            CommandAction::Delete => self.delete(session, kind_field(bound)?),
            CommandAction::Show => {
                session.view = bound
                    .field(1)
                    .and_then(View::from_alias)
                    .ok_or(BillbankError::Command(CommandError::InvalidCommand))?;
                Ok(format!("Showing {}", session.view.title().to_lowercase()))
            }
            CommandAction::Month => {
                session.month = match bound.field(1) {
                    Some("prev") => session.month.prev(),
                    _ => session.month.next(),
                };
                Ok(format!("Month is now {}", session.month))
            }
            CommandAction::Help => {
                session.view = View::Help;
                Ok(self.help())
            }
            CommandAction::Quit => {
                session.should_quit = true;
                Ok("Goodbye".to_string())
            }
        }
    }

    /// Usage and description of every command
    pub fn help(&self) -> String {
        help_table(self.registry).render()
    }

    fn create(&self, session: &mut Session, kind: RecordKind, name: &str) -> BillbankResult<String> {
        match kind {
            RecordKind::Bill => {
                session.bill = Some(RecordService::bills(self.storage).create(Bill::new(name))?.id)
            }
            RecordKind::Income => {
                session.income =
                    Some(RecordService::income(self.storage).create(Income::new(name))?.id)
            }
            RecordKind::Account => {
                session.account =
                    Some(RecordService::accounts(self.storage).create(BankAccount::new(name))?.id)
            }
            RecordKind::Card => {
                session.card =
                    Some(RecordService::cards(self.storage).create(CreditCard::new(name))?.id)
            }
        }
        session.view = kind.view();
        Ok(format!("Created {} '{}'", kind, name.trim()))
    }

    fn select(&self, session: &mut Session, kind: RecordKind, name: &str) -> BillbankResult<String> {
        let found = match kind {
            RecordKind::Bill => {
                let bill = RecordService::bills(self.storage).require(name)?;
                session.bill = Some(bill.id);
                bill.name
            }
            RecordKind::Income => {
                let income = RecordService::income(self.storage).require(name)?;
                session.income = Some(income.id);
                income.name
            }
            RecordKind::Account => {
                let account = RecordService::accounts(self.storage).require(name)?;
                session.account = Some(account.id);
                account.name
            }
            RecordKind::Card => {
                let card = RecordService::cards(self.storage).require(name)?;
                session.card = Some(card.id);
                card.name
            }
        };
        session.view = kind.view();
        Ok(format!("Selected {} '{}'", kind, found))
    }

    fn set_amount(&self, session: &Session, kind: RecordKind, amount: Money) -> BillbankResult<String> {
        let summary = format!("amount set to {}", amount);
        let name = match kind {
            RecordKind::Bill => {
                RecordService::bills(self.storage)
                    .update(selected(session.bill, kind)?, &summary, |bill| {
                        bill.set_amount(amount);
                        Ok(())
                    })?
                    .name
            }
            RecordKind::Income => {
                RecordService::income(self.storage)
                    .update(selected(session.income, kind)?, &summary, |income| {
                        income.set_amount(amount);
                        Ok(())
                    })?
                    .name
            }
            RecordKind::Account | RecordKind::Card => {
                return Err(CommandError::InvalidCommand.into());
            }
        };
        Ok(format!("{} amount set to {}", name, amount))
    }

    fn pay(&self, session: &Session, kind: RecordKind, amount: Money) -> BillbankResult<String> {
        let month = session.month;
        let today = session.today;
        let summary = format!("paid {} for {}", amount, month);
        match kind {
            RecordKind::Bill => {
                let bill = RecordService::bills(self.storage).update(
                    selected(session.bill, kind)?,
                    &summary,
                    |bill| {
                        bill.record_payment(month, amount, today);
                        Ok(())
                    },
                )?;
                Ok(format!(
                    "Paid {} on {}; {} left for {}",
                    amount,
                    bill.name,
                    bill.remaining(month),
                    month
                ))
            }
            RecordKind::Card => {
                let card = RecordService::cards(self.storage).update(
                    selected(session.card, kind)?,
                    &summary,
                    |card| {
                        card.record_payment(month, amount, today);
                        Ok(())
                    },
                )?;
                Ok(format!("Paid {} on {}", amount, card))
            }
            RecordKind::Income | RecordKind::Account => Err(CommandError::InvalidCommand.into()),
        }
    }

    fn rename(&self, session: &Session, kind: RecordKind, name: &str) -> BillbankResult<String> {
        let old = match kind {
            RecordKind::Bill => self.rename_in(RecordService::bills(self.storage), session.bill, kind, name)?,
            RecordKind::Income => {
                self.rename_in(RecordService::income(self.storage), session.income, kind, name)?
            }
            RecordKind::Account => {
                self.rename_in(RecordService::accounts(self.storage), session.account, kind, name)?
            }
            RecordKind::Card => self.rename_in(RecordService::cards(self.storage), session.card, kind, name)?,
        };
        Ok(format!("Renamed {} '{}' to '{}'", kind, old, name.trim()))
    }

    fn rename_in<T: Record>(
        &self,
        service: RecordService<'_, T>,
        id: Option<T::Id>,
        kind: RecordKind,
        name: &str,
    ) -> BillbankResult<String> {
        let id = selected(id, kind)?;
        let old = service.require_id(id)?.name().to_string();
        service.rename(id, name)?;
        Ok(old)
    }

    fn delete(&self, session: &mut Session, kind: RecordKind) -> BillbankResult<String> {
        let message = match kind {
            RecordKind::Bill => {
                let bill = RecordService::bills(self.storage).delete(selected(session.bill, kind)?)?;
                format!("Deleted bill '{}'", bill.name)
            }
            RecordKind::Income => {
                let income =
                    RecordService::income(self.storage).delete(selected(session.income, kind)?)?;
                format!("Deleted income '{}'", income.name)
            }
            RecordKind::Account => {
                let (account, transfers) =
                    AccountService::new(self.storage).delete(selected(session.account, kind)?)?;
                format!(
                    "Deleted account '{}' and {} transfer(s)",
                    account.name, transfers
                )
            }
            RecordKind::Card => {
                let card = RecordService::cards(self.storage).delete(selected(session.card, kind)?)?;
                format!("Deleted card '{}'", card.name)
            }
        };
        session.clear(kind);
        Ok(message)
    }
}
