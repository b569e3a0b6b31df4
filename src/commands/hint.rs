//! How a line editor should present a match status
//!
//! A line that is merely unfinished is not an error while the user is still
//! typing; these helpers tell the two apart and narrow the completions to
//! the word under the caret.

use super::matcher::{CommandError, MatchStatus};

/// What the line editor should show for the current line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineState {
    Empty,
    /// Confirming the line runs its command
    Ready,
    /// Every word so far matches; more is expected
    InProgress,
    Invalid(CommandError),
}

fn partial_word(line: &str, matched_depth: usize) -> Option<&str> {
    if line.ends_with(char::is_whitespace) {
        return None;
    }
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() == matched_depth + 1 {
        fields.last().copied()
    } else {
        None
    }
}

/// Suggestions that fit the word being typed, in their original order
pub fn visible_suggestions<'s, A>(status: &'s MatchStatus<A>, line: &str) -> Vec<&'s str> {
    let fields = line.split_whitespace().count();
    let partial = partial_word(line, status.matched_depth);

    if partial.is_none() && fields > status.matched_depth {
        return Vec::new();
    }

    status
        .suggestions
        .iter()
        .map(String::as_str)
        .filter(|suggestion| match partial {
            Some(word) => suggestion
                .rsplit(' ')
                .next()
                .is_some_and(|last| last.starts_with(word)),
            None => true,
        })
        .collect()
}

pub fn line_state<A>(status: &MatchStatus<A>, line: &str) -> LineState {
    if line.trim().is_empty() {
        return LineState::Empty;
    }
    if status.is_ready() {
        return LineState::Ready;
    }

    if let Some(error @ CommandError::Validation(_)) = &status.error {
        return LineState::Invalid(error.clone());
    }

    let fields = line.split_whitespace().count();
    if fields == status.matched_depth || !visible_suggestions(status, line).is_empty() {
        return LineState::InProgress;
    }

    LineState::Invalid(status.error.clone().unwrap_or(CommandError::InvalidCommand))
}
