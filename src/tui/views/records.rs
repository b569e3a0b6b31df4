//! Records panel
//!
//! Draws the table for the active view and month, or the command list when
//! the help view is active.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table as TableWidget},
    Frame,
};

use crate::commands::View;
use crate::display::{help_table, view_table, Align, Table};
use crate::tui::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title = match app.session.view {
        View::Help => format!(" {} ", View::Help.title()),
        view => format!(" {} ({}) ", view.title(), app.session.month),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let table = match app.session.view {
        View::Help => Ok(help_table(&app.registry)),
        _ => view_table(app.storage, &app.session),
    };

    match table {
        Ok(table) if table.is_empty() => {
            let text = Paragraph::new(table.empty_message.clone())
                .block(block)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(text, area);
        }
        Ok(table) => frame.render_widget(to_widget(&table).block(block), area),
        Err(e) => {
            let text = Paragraph::new(format!("Failed to load records: {}", e))
                .block(block)
                .style(Style::default().fg(Color::Red));
            frame.render_widget(text, area);
        }
    }
}

fn to_widget(table: &Table) -> TableWidget<'static> {
    let widths: Vec<Constraint> = table
        .widths()
        .into_iter()
        .map(|w| Constraint::Length(w as u16))
        .collect();

    let header = Row::new(
        table
            .columns
            .iter()
            .map(|column| Cell::from(column.title))
            .collect::<Vec<_>>(),
    )
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    let rows = table.rows.iter().map(|row| {
        let selected = row.first().is_some_and(|marker| marker == ">");
        let cells = row
            .iter()
            .zip(&table.columns)
            .zip(table.widths())
            .map(|((cell, column), width)| match column.align {
                Align::Left => Cell::from(cell.clone()),
                Align::Right => Cell::from(format!("{:>width$}", cell, width = width)),
            })
            .collect::<Vec<_>>();
        let style = if selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Row::new(cells).style(style)
    });

    TableWidget::new(rows.collect::<Vec<_>>(), widths)
        .header(header)
        .column_spacing(2)
}
