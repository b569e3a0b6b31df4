//! Line matching
//!
//! Turns the whole input line into a [`MatchStatus`]. Nothing is carried
//! between calls; every keystroke re-derives the status from scratch.

use thiserror::Error;

use super::suggest::normalize;
use super::tree::CommandTree;

/// Why a line cannot be executed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The first word is not a stage-0 alias
    #[error("not a command")]
    NotCommand,

    /// Recognized, but incomplete or carrying extra words
    #[error("invalid command")]
    InvalidCommand,

    /// The argument was rejected by the command's validator
    #[error("{0}")]
    Validation(String),
}

/// The action of a fully matched line, with everything the user typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundAction<A> {
    pub action: A,
    /// Every whitespace-separated field of the line, argument included
    pub fields: Vec<String>,
    /// The argument field, when the tree takes one
    pub argument: Option<String>,
}

impl<A> BoundAction<A> {
    /// The field at a fixed stage
    pub fn field(&self, stage: usize) -> Option<&str> {
        self.fields.get(stage).map(String::as_str)
    }
}

/// Result of matching one line against one tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchStatus<A> {
    pub is_command: bool,
    pub is_complete: bool,
    /// Full-line completions, in stage alias order
    pub suggestions: Vec<String>,
    /// Number of leading stages matched
    pub matched_depth: usize,
    pub error: Option<CommandError>,
    /// Present only when complete and error-free
    pub action: Option<BoundAction<A>>,
}

impl<A> MatchStatus<A> {
    /// Complete and valid: confirming the line runs its action
    pub fn is_ready(&self) -> bool {
        self.is_complete && self.error.is_none()
    }
}

/// Match `line` against `tree`
pub fn parse<A: Clone>(tree: &CommandTree<A>, line: &str) -> MatchStatus<A> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let depth = tree.depth();

    let matched_depth = tree
        .stages()
        .iter()
        .zip(&fields)
        .take_while(|(stage, field)| stage.contains(field))
        .count();
    let is_command = matched_depth > 0;

    if let Some(argument) = tree.argument() {
        if is_command && matched_depth == depth && fields.len() == depth + 1 {
            let typed = fields[depth];
            let error = argument.validate(typed).err().map(CommandError::Validation);
            let action = error.is_none().then(|| BoundAction {
                action: tree.action().clone(),
                fields: owned(&fields),
                argument: Some(typed.to_string()),
            });

            return MatchStatus {
                is_command,
                is_complete: true,
                suggestions: Vec::new(),
                matched_depth,
                error,
                action,
            };
        }
    }

    let is_complete = is_command
        && matched_depth == depth
        && fields.len() == depth
        && !tree.has_argument();

    let candidates: &[String] = tree
        .stages()
        .get(matched_depth)
        .map(|stage| stage.aliases())
        .unwrap_or(&[]);
    let suggestions = normalize(line, matched_depth, candidates);

    let error = if !is_command {
        Some(CommandError::NotCommand)
    } else if !is_complete {
        Some(CommandError::InvalidCommand)
    } else {
        None
    };

    let action = is_complete.then(|| BoundAction {
        action: tree.action().clone(),
        fields: owned(&fields),
        argument: None,
    });

    MatchStatus {
        is_command,
        is_complete,
        suggestions,
        matched_depth,
        error,
        action,
    }
}

fn owned(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|field| field.to_string()).collect()
}
