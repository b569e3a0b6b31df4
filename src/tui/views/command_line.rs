//! Completion list and command prompt

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::commands::LineState;
use crate::tui::app::App;
use crate::tui::widgets::PromptInput;

pub fn render_suggestions(frame: &mut Frame, app: &App, area: Rect) {
    let suggestions = app.suggestions();
    let items: Vec<ListItem> = suggestions
        .iter()
        .map(|s| ListItem::new(s.clone()))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Completions (Tab) ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !suggestions.is_empty() {
        state.select(Some(app.command_line.highlighted().min(suggestions.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

pub fn render_prompt(frame: &mut Frame, app: &App, area: Rect) {
    let (border, text) = match app.line_state() {
        LineState::Ready => (Color::Green, Style::default().fg(Color::Green)),
        LineState::Invalid(_) => (Color::Red, Style::default().fg(Color::Red)),
        LineState::Empty | LineState::InProgress => (Color::White, Style::default().fg(Color::White)),
    };

    let block = Block::default()
        .title(" Command ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let input = PromptInput::new(app.command_line.text())
        .ghost(app.command_line.ghost(&app.registry))
        .text_style(text)
        .placeholder("type a command, or help");
    frame.render_widget(input, inner);
}
