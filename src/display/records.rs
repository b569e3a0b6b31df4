//! Record tables for terminal output
//!
//! The same tables back the CLI `list` commands and the TUI records panel.

use crate::audit::AuditEntry;
use crate::commands::{CommandAction, CommandRegistry, Session, View};
use crate::error::BillbankResult;
use crate::models::{
    BankAccount, BankAccountId, Bill, BillId, CreditCard, CreditCardId, Income, IncomeId, Money,
    Month, Transfer, TransferKind,
};

use crate::services::AccountService;
use crate::storage::Storage;

use super::table::{Column, Table};

const SELECTED: &str = ">";

fn marker<I: PartialEq>(id: I, selected: Option<I>) -> String {
    if selected == Some(id) {
        SELECTED.to_string()
    } else {
        String::new()
    }
}

pub fn bill_table(bills: &[Bill], month: Month, selected: Option<BillId>) -> Table {
    let mut table = Table::new(
        vec![
            Column::left(""),
            Column::left("Name"),
            Column::right("Amount"),
            Column::left("Due"),
            Column::right("Paid"),
            Column::right("Left"),
            Column::left("Status"),
        ],
        "No bills yet. Try: new bill <name>",
    );

    for bill in bills {
        let due = bill
            .due_date(month)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| format!("day {}", bill.due_day));
        let status = if bill.is_paid(month) {
            "paid"
        } else if bill.paid_in(month).is_positive() {
            "partial"
        } else {
            "unpaid"
        };

        table.push(vec![
            marker(bill.id, selected),
            bill.name.clone(),
            bill.amount.to_string(),
            due,
            bill.paid_in(month).to_string(),
            bill.remaining(month).to_string(),
            status.to_string(),
        ]);
    }
    table
}

pub fn income_table(incomes: &[Income], month: Month, selected: Option<IncomeId>) -> Table {
    let mut table = Table::new(
        vec![
            Column::left(""),
            Column::left("Name"),
            Column::left("Period"),
            Column::right("Base"),
            Column::right("Extras"),
            Column::right("Total"),
        ],
        "No income yet. Try: new income <name>",
    );

    for income in incomes {
        let total = income.total_for(month);
        let base = income.month(month).map(|m| m.amount).unwrap_or(income.amount);
        table.push(vec![
            marker(income.id, selected),
            income.name.clone(),
            income.period.to_string(),
            base.to_string(),
            (total - base).to_string(),
            total.to_string(),
        ]);
    }
    table
}

/// Accounts with their balance for the month already worked out
pub fn account_table(
    accounts: &[(BankAccount, Money)],
    month: Month,
    selected: Option<BankAccountId>,
) -> Table {
    let mut table = Table::new(
        vec![
            Column::left(""),
            Column::left("Name"),
            Column::right("Recorded"),
            Column::right("Balance"),
            Column::left("Number"),
        ],
        "No accounts yet. Try: new account <name>",
    );

    for (account, balance) in accounts {
        let recorded = account
            .recorded_balance(month)
            .map(|m| m.to_string())
            .unwrap_or_else(|| "-".to_string());
        let number = if account.account_number.is_some() {
            "protected"
        } else {
            ""
        };
        table.push(vec![
            marker(account.id, selected),
            account.name.clone(),
            recorded,
            balance.to_string(),
            number.to_string(),
        ]);
    }

    if !accounts.is_empty() {
        let total: Money = accounts.iter().map(|(_, balance)| *balance).sum();
        table.push(vec![
            String::new(),
            "Total".to_string(),
            String::new(),
            total.to_string(),
            String::new(),
        ]);
    }
    table
}

pub fn card_table(cards: &[CreditCard], month: Month, selected: Option<CreditCardId>) -> Table {
    let mut table = Table::new(
        vec![
            Column::left(""),
            Column::left("Name"),
            Column::left("Card"),
            Column::right("Due"),
            Column::right("Balance"),
            Column::right("Limit"),
            Column::right("Paid"),
            Column::right("Outstanding"),
        ],
        "No cards yet. Try: new card <name>",
    );

    for card in cards {
        let statement = card.statement(month);
        let cell = |value: Option<Money>| value.unwrap_or_default().to_string();
        table.push(vec![
            marker(card.id, selected),
            card.name.clone(),
            card.last_four
                .as_ref()
                .map(|l| format!("*{}", l))
                .unwrap_or_default(),
            card.due_day.to_string(),
            cell(statement.map(|s| s.balance)),
            cell(statement.map(|s| s.credit_limit)),
            cell(statement.map(|s| s.paid_amount)),
            cell(statement.map(|s| s.outstanding())),
        ]);
    }
    table
}

/// Withdrawals negative; moves keep their amount although they do not count
fn shown_amount(transfer: &Transfer) -> Money {
    match transfer.kind {
        TransferKind::Withdrawal => -transfer.amount,
        TransferKind::Deposit | TransferKind::Move => transfer.amount,
    }
}

pub fn transfer_table(transfers: &[Transfer], accounts: &[BankAccount]) -> Table {
    let mut table = Table::new(
        vec![
            Column::left("Date"),
            Column::left("Account"),
            Column::left("Kind"),
            Column::right("Amount"),
            Column::left("Name"),
        ],
        "No transfers this month.",
    );

    for transfer in transfers {
        let account = accounts
            .iter()
            .find(|a| a.id == transfer.account_id)
            .map(|a| a.name.clone())
            .unwrap_or_else(|| transfer.account_id.short());
        table.push(vec![
            transfer.date.format("%Y-%m-%d").to_string(),
            account,
            transfer.kind.to_string(),
            shown_amount(transfer).to_string(),
            transfer.name.clone(),
        ]);
    }
    table
}

/// One row per command: its usage and what it does
pub fn help_table(registry: &CommandRegistry<CommandAction>) -> Table {
    let mut table = Table::new(
        vec![Column::left("Command"), Column::left("Description")],
        "No commands registered.",
    );
    for tree in registry.trees() {
        table.push(vec![tree.usage(), tree.description().to_string()]);
    }
    table
}

/// The table for the session's view and month, with its selection marked
///
/// The help view has no records; it renders as an empty table.
pub fn view_table(storage: &Storage, session: &Session) -> BillbankResult<Table> {
    let month = session.month;
    let table = match session.view {
        View::Bills => bill_table(&storage.bills.get_all()?, month, session.bill),
        View::Income => income_table(&storage.income.get_all()?, month, session.income),
        View::Accounts => {
            let service = AccountService::new(storage);
            let accounts = storage
                .accounts
                .get_all()?
                .into_iter()
                .map(|account| {
                    let balance = service.month_balance(&account, month)?;
                    Ok((account, balance))
                })
                .collect::<BillbankResult<Vec<_>>>()?;
            account_table(&accounts, month, session.account)
        }
        View::Cards => card_table(&storage.cards.get_all()?, month, session.card),
        View::Transfers => transfer_table(
            &storage.transfers.filter(|t| t.month == month)?,
            &storage.accounts.get_all()?,
        ),
        View::Help => Table::new(Vec::new(), ""),
    };
    Ok(table)
}

pub fn format_audit_entries(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "No audit entries.".to_string();
    }
    entries
        .iter()
        .map(AuditEntry::format_human_readable)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn march() -> Month {
        Month::new(2025, 3).unwrap()
    }

    #[test]
    fn test_bill_status() {
        let mut rent = Bill::new("Rent");
        rent.set_amount(Money::from_cents(100000));
        let mut water = Bill::new("Water");
        water.set_amount(Money::from_cents(4000));
        let paid_on = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        water.record_payment(march(), Money::from_cents(1000), paid_on);

        let table = bill_table(&[rent.clone(), water], march(), Some(rent.id));
        assert_eq!(table.rows[0][0], ">");
        assert_eq!(table.rows[0][6], "unpaid");
        assert_eq!(table.rows[1][6], "partial");
        assert_eq!(table.rows[1][5], "$30.00");
        assert_eq!(table.rows[0][3], "2025-03-01");
    }

    #[test]
    fn test_account_total_row() {
        let a = BankAccount::new("Checking");
        let b = BankAccount::new("Savings");
        let table = account_table(
            &[(a, Money::from_cents(1000)), (b, Money::from_cents(-250))],
            march(),
            None,
        );
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[2][3], "$7.50");
        assert!(table.render().contains("Total"));
    }

    #[test]
    fn test_empty_tables() {
        assert!(card_table(&[], march(), None).render().starts_with("No cards"));
        assert_eq!(transfer_table(&[], &[]).render(), "No transfers this month.");
        assert_eq!(format_audit_entries(&[]), "No audit entries.");
    }

    #[test]
    fn test_help_table_lists_every_command() {
        let registry = crate::commands::finance_commands().unwrap();
        let table = help_table(&registry);
        assert_eq!(table.rows.len(), registry.trees().len());
        assert_eq!(table.rows[2][0], "set bill|income amount|amt <amount>");
    }

    #[test]
    fn test_view_table_follows_session() {
        let dir = tempfile::TempDir::new().unwrap();
        let storage = Storage::open(crate::config::BillbankPaths::with_base_dir(
            dir.path().to_path_buf(),
        ))
        .unwrap();
        let account = BankAccount::new("Checking");
        storage.accounts.upsert(account.clone()).unwrap();

        let mut session = Session::new(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        session.view = View::Accounts;
        session.account = Some(account.id);

        let table = view_table(&storage, &session).unwrap();
        assert_eq!(table.rows[0][0], ">");
        assert_eq!(table.rows[0][1], "Checking");

        session.view = View::Help;
        assert!(view_table(&storage, &session).unwrap().is_empty());
    }

    #[test]
    fn test_transfer_names_account() {
        let account = BankAccount::new("Checking");
        let transfer = Transfer::new(
            account.id,
            TransferKind::Withdrawal,
            Money::from_cents(500),
            NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
        );
        let table = transfer_table(&[transfer], &[account]);
        assert_eq!(table.rows[0][1], "Checking");
        assert_eq!(table.rows[0][3], "-$5.00");
    }
}
