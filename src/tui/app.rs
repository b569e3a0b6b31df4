//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.

use crate::commands::{
    finance_commands, line_state, CommandAction, CommandRegistry, Executor, LineState, Session,
};
use crate::error::BillbankResult;
use crate::storage::Storage;

use super::commander::CommandLine;

/// Ticks an informational message stays on screen
const STATUS_TICKS: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    /// The line is unfinished; not an error
    Hint,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

/// Main application state
pub struct App<'a> {
    /// The storage layer
    pub storage: &'a Storage,

    /// Every command the line understands
    pub registry: CommandRegistry<CommandAction>,

    /// Month, view and selections the commands act on
    pub session: Session,

    pub command_line: CommandLine,

    pub status: Option<StatusMessage>,
    status_age: u32,

    /// Whether the app should quit
    pub should_quit: bool,
}

impl<'a> App<'a> {
    pub fn new(storage: &'a Storage) -> BillbankResult<Self> {
        Ok(Self {
            storage,
            registry: finance_commands()?,
            session: Session::default(),
            command_line: CommandLine::new(),
            status: None,
            status_age: 0,
            should_quit: false,
        })
    }

    fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
        self.status_age = 0;
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Age the status message; informational ones fade
    pub fn tick(&mut self) {
        self.status_age = self.status_age.saturating_add(1);
        if self.status_age > STATUS_TICKS
            && matches!(self.status.as_ref().map(|s| s.kind), Some(StatusKind::Info))
        {
            self.status = None;
        }
    }

    pub fn type_key(&mut self, key: char) {
        if self.command_line.insert(&self.registry, key) {
            self.clear_status();
        }
    }

    pub fn backspace(&mut self) {
        if self.command_line.backspace() {
            self.clear_status();
        }
    }

    pub fn complete(&mut self) {
        if self.command_line.accept(&self.registry) {
            self.clear_status();
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        self.command_line.suggestions(&self.registry)
    }

    pub fn next_suggestion(&mut self) {
        let count = self.suggestions().len();
        self.command_line.select_next(count);
    }

    pub fn prev_suggestion(&mut self) {
        let count = self.suggestions().len();
        self.command_line.select_prev(count);
    }

    /// What pressing Enter would do right now
    pub fn line_state(&self) -> LineState {
        let status = self.command_line.status(&self.registry);
        line_state(&status, self.command_line.text())
    }

    fn in_progress_hint(&self) -> String {
        let resolution = self.registry.resolve(self.command_line.text());
        match resolution.tree {
            Some(tree)
                if tree.has_argument() && resolution.status.matched_depth == tree.depth() =>
            {
                format!("{} expects {}", tree.name(), tree.argument_hint().unwrap_or("an argument"))
            }
            _ => "Incomplete command (Tab completes)".to_string(),
        }
    }

    /// Run the line when it is ready, otherwise explain why not
    pub fn submit(&mut self) {
        let line = self.command_line.text().to_string();
        let status = self.registry.resolve(&line).status;

        match line_state(&status, &line) {
            LineState::Empty => {}
            LineState::InProgress => {
                let hint = self.in_progress_hint();
                self.set_status(StatusKind::Hint, hint);
            }
            LineState::Invalid(error) => self.set_status(StatusKind::Error, error.to_string()),
            LineState::Ready => {
                let Some(bound) = status.action else {
                    return;
                };
                let result =
                    Executor::new(self.storage, &self.registry).execute(&mut self.session, &bound);
                match result {
                    Ok(message) => {
                        let first = message.lines().next().unwrap_or_default().to_string();
                        self.command_line.clear();
                        self.set_status(StatusKind::Info, first);
                    }
                    Err(e) => {
                        log::warn!("'{}' failed: {}", line, e);
                        self.set_status(StatusKind::Error, e.to_string());
                    }
                }
            }
        }

        if self.session.should_quit {
            self.should_quit = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::View;
    use crate::config::BillbankPaths;
    use tempfile::TempDir;

    fn storage() -> (Storage, TempDir) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(BillbankPaths::with_base_dir(dir.path().to_path_buf())).unwrap();
        (storage, dir)
    }

    fn type_line(app: &mut App, text: &str) {
        for key in text.chars() {
            app.type_key(key);
        }
    }

    #[test]
    fn test_submit_runs_ready_line() {
        let (storage, _dir) = storage();
        let mut app = App::new(&storage).unwrap();

        type_line(&mut app, "new account Checking");
        app.submit();

        assert!(app.command_line.is_empty());
        assert_eq!(app.status.as_ref().unwrap().kind, StatusKind::Info);
        assert_eq!(app.session.view, View::Accounts);
        assert_eq!(storage.accounts.count().unwrap(), 1);
    }

    #[test]
    fn test_unfinished_line_is_a_hint() {
        let (storage, _dir) = storage();
        let mut app = App::new(&storage).unwrap();

        type_line(&mut app, "deposit ");
        app.submit();
        let status = app.status.clone().unwrap();
        assert_eq!(status.kind, StatusKind::Hint);
        assert_eq!(status.text, "deposit expects <amount>");
        assert_eq!(app.command_line.text(), "deposit ");
    }

    #[test]
    fn test_errors_keep_the_line() {
        let (storage, _dir) = storage();
        let mut app = App::new(&storage).unwrap();

        type_line(&mut app, "deposit 5");
        app.submit();
        let status = app.status.clone().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.text, "No account selected");
        assert_eq!(app.command_line.text(), "deposit 5");

        app.command_line.clear();
        type_line(&mut app, "bogus");
        app.submit();
        assert_eq!(app.status.unwrap().text, "not a command");
    }

    #[test]
    fn test_quit_and_status_fading() {
        let (storage, _dir) = storage();
        let mut app = App::new(&storage).unwrap();

        type_line(&mut app, "show cards");
        app.submit();
        for _ in 0..=STATUS_TICKS {
            app.tick();
        }
        assert!(app.status.is_none());

        type_line(&mut app, "quit");
        app.submit();
        assert!(app.should_quit);
    }

    #[test]
    fn test_tab_completion() {
        let (storage, _dir) = storage();
        let mut app = App::new(&storage).unwrap();

        type_line(&mut app, "mo");
        app.complete();
        assert_eq!(app.command_line.text(), "month ");
        app.next_suggestion();
        app.complete();
        assert_eq!(app.command_line.text(), "month prev");
    }
}
