//! Layout definitions for the TUI
//!
//! Records on top, then the completion list, the command line and the
//! status bar.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Completions shown at once
pub const SUGGESTION_ROWS: u16 = 5;

/// Layout regions for the TUI
pub struct AppLayout {
    pub records: Rect,
    pub suggestions: Rect,
    pub command_line: Rect,
    /// Status bar at the bottom
    pub status_bar: Rect,
}

impl AppLayout {
    /// Calculate layout from available area
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),
                Constraint::Length(SUGGESTION_ROWS + 2),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            records: chunks[0],
            suggestions: chunks[1],
            command_line: chunks[2],
            status_bar: chunks[3],
        }
    }
}
