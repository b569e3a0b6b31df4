//! Status bar view
//!
//! Shows the month, the selected records and the latest message

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{App, StatusKind};

fn selected_names(app: &App) -> Vec<String> {
    let session = &app.session;
    let storage = app.storage;
    let mut names = Vec::new();

    if let Some(bill) = session.bill.and_then(|id| storage.bills.get(id).ok().flatten()) {
        names.push(format!("bill:{}", bill.name));
    }
    if let Some(income) = session.income.and_then(|id| storage.income.get(id).ok().flatten()) {
        names.push(format!("income:{}", income.name));
    }
    if let Some(account) = session.account.and_then(|id| storage.accounts.get(id).ok().flatten()) {
        names.push(format!("account:{}", account.name));
    }
    if let Some(card) = session.card.and_then(|id| storage.cards.get(id).ok().flatten()) {
        names.push(format!("card:{}", card.name));
    }
    names
}

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        format!(" {} ", app.session.month),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];

    let selected = selected_names(app);
    if !selected.is_empty() {
        spans.push(Span::raw("│ "));
        spans.push(Span::styled(
            selected.join("  "),
            Style::default().fg(Color::White),
        ));
        spans.push(Span::raw(" "));
    }

    if let Some(status) = &app.status {
        let color = match status.kind {
            StatusKind::Info => Color::Green,
            StatusKind::Hint => Color::Yellow,
            StatusKind::Error => Color::Red,
        };
        spans.push(Span::raw("│ "));
        spans.push(Span::styled(status.text.as_str(), Style::default().fg(color)));
    }

    let hints = " Tab complete  ↑↓ choose  Enter run  Esc quit ";
    let used: usize = spans.iter().map(|s| s.width()).sum();
    let pad = (area.width as usize).saturating_sub(used + hints.chars().count());
    if pad > 0 {
        spans.push(Span::raw(" ".repeat(pad)));
        spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
