//! Command lines outside the TUI
//!
//! `run` executes lines through the same engine the TUI uses; `complete`
//! prints what the TUI would offer for a partially typed line.

use crate::commands::{finance_commands, line_state, visible_suggestions, Executor, LineState, Session};
use crate::error::BillbankResult;
use crate::models::Month;
use crate::storage::Storage;

/// Execute each line in order, sharing one session
///
/// Stops at the first line that fails or quits.
pub fn handle_run(storage: &Storage, lines: &[String], month: Option<Month>) -> BillbankResult<()> {
    let registry = finance_commands()?;
    let executor = Executor::new(storage, &registry);

    let mut session = Session::default();
    if let Some(month) = month {
        session.month = month;
    }

    for line in lines {
        let message = executor.run_line(&mut session, line)?;
        println!("{}", message);
        if session.should_quit {
            break;
        }
    }
    Ok(())
}

/// Describe a line: one suggestion per line, then its state in brackets
pub fn describe_line(line: &str) -> BillbankResult<String> {
    let registry = finance_commands()?;
    let status = registry.resolve(line).status;

    let mut output: Vec<String> = visible_suggestions(&status, line)
        .into_iter()
        .map(str::to_string)
        .collect();
    output.push(match line_state(&status, line) {
        LineState::Empty => "[empty]".to_string(),
        LineState::Ready => "[ready]".to_string(),
        LineState::InProgress => "[in progress]".to_string(),
        LineState::Invalid(error) => format!("[error] {}", error),
    });
    Ok(output.join("\n"))
}

pub fn handle_complete(line: &str) -> BillbankResult<()> {
    println!("{}", describe_line(line)?);
    Ok(())
}
