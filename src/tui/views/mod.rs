//! TUI Views module
//!
//! The records panel, the completion list with the command prompt, and the
//! status bar.

pub mod command_line;
pub mod records;
pub mod status_bar;

use ratatui::Frame;

use super::app::App;
use super::layout::AppLayout;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    records::render(frame, app, layout.records);
    command_line::render_suggestions(frame, app, layout.suggestions);
    command_line::render_prompt(frame, app, layout.command_line);
    status_bar::render(frame, app, layout.status_bar);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BillbankPaths;
    use crate::storage::Storage;
    use ratatui::{backend::TestBackend, Terminal};
    use tempfile::TempDir;

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_records_and_completions() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(BillbankPaths::with_base_dir(dir.path().to_path_buf())).unwrap();
        let mut app = App::new(&storage).unwrap();

        for c in "new bill Rent".chars() {
            app.type_key(c);
        }
        app.submit();
        for c in "pay".chars() {
            app.type_key(c);
        }

        let screen = screen(&app);
        assert!(screen.contains("Bills"));
        assert!(screen.contains("Rent"));
        assert!(screen.contains("pay bill"));
        assert!(screen.contains("pay card"));
        assert!(screen.contains("bill:Rent"));
    }

    #[test]
    fn test_renders_help() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(BillbankPaths::with_base_dir(dir.path().to_path_buf())).unwrap();
        let mut app = App::new(&storage).unwrap();

        for c in "help".chars() {
            app.type_key(c);
        }
        app.submit();
        assert!(screen(&app).contains("quit|exit"));
    }
}
