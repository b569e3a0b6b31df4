//! Command prompt widget
//!
//! Draws `> ` followed by the typed text, the dimmed remainder of the
//! highlighted completion and a block cursor.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

pub const PROMPT: &str = "> ";

#[derive(Debug, Clone, Default)]
pub struct PromptInput {
    pub text: String,
    /// Completion remainder shown after the text
    pub ghost: Option<String>,
    pub text_style: Style,
    pub placeholder: String,
}

impl PromptInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            text_style: Style::default().fg(Color::White),
            ..Self::default()
        }
    }

    pub fn ghost(mut self, ghost: Option<String>) -> Self {
        self.ghost = ghost;
        self
    }

    pub fn text_style(mut self, style: Style) -> Self {
        self.text_style = style;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Column of the cursor relative to the widget's left edge
    pub fn cursor_offset(&self) -> u16 {
        (PROMPT.len() + self.text.chars().count()) as u16
    }
}

impl Widget for PromptInput {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let mut spans = vec![Span::styled(PROMPT, Style::default().fg(Color::Cyan))];
        if self.text.is_empty() && self.ghost.is_none() {
            spans.push(Span::styled(
                self.placeholder.clone(),
                Style::default().fg(Color::DarkGray),
            ));
        } else {
            spans.push(Span::styled(self.text.clone(), self.text_style));
            if let Some(ghost) = &self.ghost {
                spans.push(Span::styled(
                    ghost.clone(),
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
                ));
            }
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);

        let cursor_x = area.x + self.cursor_offset();
        if cursor_x < area.x + area.width {
            let under = match &self.ghost {
                Some(ghost) => ghost.chars().next(),
                None if self.text.is_empty() => self.placeholder.chars().next(),
                None => None,
            }
            .unwrap_or(' ');
            buf.set_string(
                cursor_x,
                area.y,
                under.to_string(),
                Style::default().fg(Color::Black).bg(Color::Cyan),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(input: PromptInput) -> String {
        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);
        input.render(area, &mut buf);
        (0..30)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn test_text_and_ghost() {
        let input = PromptInput::new("set bi").ghost(Some("ll".into()));
        assert_eq!(rendered(input), "> set bill");
    }

    #[test]
    fn test_placeholder_when_empty() {
        let input = PromptInput::new("").placeholder("type help");
        assert_eq!(rendered(input), "> type help");
    }

    #[test]
    fn test_cursor_offset() {
        assert_eq!(PromptInput::new("pay").cursor_offset(), 5);
    }
}
