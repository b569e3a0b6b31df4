//! Command line editing state
//!
//! Holds the text being typed and which completion is highlighted. Every
//! question about the line is answered by re-resolving the whole text
//! against the registry.

use crate::commands::{visible_suggestions, CommandRegistry, MatchStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    text: String,
    highlighted: usize,
}

impl CommandLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.highlighted = 0;
    }

    /// Insert a typed key, returning whether it was accepted
    ///
    /// A space is refused at the start of the line and after another space.
    /// Other keys go through the command's key filter while the caret is in
    /// its argument slot.
    pub fn insert<A: Clone>(&mut self, registry: &CommandRegistry<A>, key: char) -> bool {
        if key.is_whitespace() {
            if self.text.is_empty() || self.text.ends_with(' ') {
                return false;
            }
            self.push(' ');
            return true;
        }
        if key.is_control() || !registry.accepts_key(&self.text, key) {
            return false;
        }
        self.push(key);
        true
    }

    fn push(&mut self, key: char) {
        self.text.push(key);
        self.highlighted = 0;
    }

    pub fn backspace(&mut self) -> bool {
        self.highlighted = 0;
        self.text.pop().is_some()
    }

    pub fn status<A: Clone>(&self, registry: &CommandRegistry<A>) -> MatchStatus<A> {
        registry.resolve(&self.text).status
    }

    /// Completions for the word being typed
    pub fn suggestions<A: Clone>(&self, registry: &CommandRegistry<A>) -> Vec<String> {
        let status = self.status(registry);
        visible_suggestions(&status, &self.text)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn select_next(&mut self, count: usize) {
        if count > 0 {
            self.highlighted = (self.highlighted + 1) % count;
        }
    }

    pub fn select_prev(&mut self, count: usize) {
        if count > 0 {
            self.highlighted = (self.highlighted + count - 1) % count;
        }
    }

    /// Replace the line with the highlighted completion
    ///
    /// A space is appended when the accepted line still expects more words,
    /// so the next stage's completions show straight away.
    pub fn accept<A: Clone>(&mut self, registry: &CommandRegistry<A>) -> bool {
        let suggestions = self.suggestions(registry);
        let Some(chosen) = suggestions
            .get(self.highlighted)
            .or_else(|| suggestions.first())
        else {
            return false;
        };
        if chosen.as_str() == self.text.trim_end() {
            // Only the argument is left: open its slot
            if self.text.ends_with(' ') || registry.resolve(&self.text).status.is_ready() {
                return false;
            }
            self.text.push(' ');
            return true;
        }

        self.text = chosen.clone();
        if !registry.resolve(&self.text).status.is_ready() {
            self.text.push(' ');
        }
        self.highlighted = 0;
        true
    }

    /// The rest of the highlighted completion, shown dimmed after the text
    pub fn ghost<A: Clone>(&self, registry: &CommandRegistry<A>) -> Option<String> {
        let suggestions = self.suggestions(registry);
        let chosen = suggestions
            .get(self.highlighted)
            .or_else(|| suggestions.first())?;
        chosen
            .strip_prefix(self.text.as_str())
            .filter(|rest| !rest.is_empty())
            .map(str::to_string)
    }
}
