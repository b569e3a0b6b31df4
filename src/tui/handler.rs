//! Key handling
//!
//! Every key goes to the command line; there are no other modes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::App;
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick => app.tick(),
        Event::Resize(_, _) => {}
    }
    Ok(())
}

pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') => app.should_quit = true,
            KeyCode::Char('u') => app.command_line.clear(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Enter => app.submit(),
        KeyCode::Tab => app.complete(),
        KeyCode::Down => app.next_suggestion(),
        KeyCode::Up | KeyCode::BackTab => app.prev_suggestion(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(c) => app.type_key(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BillbankPaths;
    use crate::storage::Storage;
    use tempfile::TempDir;

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_typing_and_submitting() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(BillbankPaths::with_base_dir(dir.path().to_path_buf())).unwrap();
        let mut app = App::new(&storage).unwrap();

        for c in "new bill Rent".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(storage.bills.count().unwrap(), 1);

        press(&mut app, KeyCode::Char('h'));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.command_line.text(), "help");

        handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert!(app.command_line.is_empty());

        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(BillbankPaths::with_base_dir(dir.path().to_path_buf())).unwrap();
        let mut app = App::new(&storage).unwrap();

        handle_event(&mut app, Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)))
            .unwrap();
        assert!(app.should_quit);
    }
}
