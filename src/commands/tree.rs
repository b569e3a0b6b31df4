//! Command trees
//!
//! A command tree is an ordered list of stages, one per word position, plus an
//! optional trailing argument. Trees are built once at startup and never
//! change afterwards.

use thiserror::Error;

use super::keys;
use super::matcher::{self, MatchStatus};

/// Validates the free-form argument typed after the fixed stages
pub type Validator = fn(&str) -> Result<(), String>;

/// Decides whether a keystroke may be inserted into the argument
pub type KeyFilter = fn(char) -> bool;

/// Errors raised while building command trees or registering them
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandTreeError {
    #[error("command has no stages")]
    NoStages,

    #[error("stage {stage} of '{command}' has no aliases")]
    EmptyStage { command: String, stage: usize },

    #[error("alias '{alias}' is repeated in stage {stage} of '{command}'")]
    RepeatedAlias {
        command: String,
        stage: usize,
        alias: String,
    },

    #[error("alias '{0}' must be a single non-empty word")]
    InvalidAlias(String),

    #[error("'{0}' expects an argument but has no validator")]
    MissingValidator(String),

    #[error("command alias already registered: {0}")]
    DuplicateAlias(String),
}

/// The aliases accepted at one word position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    aliases: Vec<String>,
}

impl Stage {
    /// Aliases in declaration order
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Whether `token` is one of this stage's aliases
    pub fn contains(&self, token: &str) -> bool {
        self.aliases.iter().any(|alias| alias == token)
    }
}

/// Validation and key filtering for the trailing argument
#[derive(Debug, Clone, Copy)]
pub struct ArgumentSpec {
    validate: Validator,
    key_filter: Option<KeyFilter>,
}

impl ArgumentSpec {
    /// Run the validator against a typed argument
    pub fn validate(&self, argument: &str) -> Result<(), String> {
        (self.validate)(argument)
    }

    /// The configured key filter, if any
    pub fn key_filter(&self) -> Option<KeyFilter> {
        self.key_filter
    }
}

/// One top-level command family
#[derive(Debug, Clone)]
pub struct CommandTree<A> {
    stages: Vec<Stage>,
    argument: Option<ArgumentSpec>,
    argument_hint: Option<String>,
    description: String,
    action: A,
}

impl<A> CommandTree<A> {
    /// Start building a tree bound to `action`
    pub fn builder(action: A) -> CommandTreeBuilder<A> {
        CommandTreeBuilder::new(action)
    }

    /// The canonical name: the first alias of the first stage
    pub fn name(&self) -> &str {
        &self.stages[0].aliases[0]
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Number of fixed stages (the argument is not counted)
    pub fn depth(&self) -> usize {
        self.stages.len()
    }

    pub fn has_argument(&self) -> bool {
        self.argument.is_some()
    }

    pub fn argument(&self) -> Option<&ArgumentSpec> {
        self.argument.as_ref()
    }

    pub fn argument_hint(&self) -> Option<&str> {
        self.argument_hint.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn action(&self) -> &A {
        &self.action
    }

    /// Usage line such as `set bill|income amount|amt <amount>`
    pub fn usage(&self) -> String {
        let mut parts: Vec<String> = self
            .stages
            .iter()
            .map(|stage| stage.aliases.join("|"))
            .collect();
        if let Some(hint) = &self.argument_hint {
            parts.push(hint.clone());
        } else if self.argument.is_some() {
            parts.push("<arg>".to_string());
        }
        parts.join(" ")
    }

    /// Whether a keystroke may be inserted at the given matched depth
    pub fn accepts_key(&self, matched_depth: usize, key: char) -> bool {
        keys::accepts_key(self, matched_depth, key)
    }
}

impl<A: Clone> CommandTree<A> {
    /// Match a full input line against this tree
    pub fn parse(&self, line: &str) -> MatchStatus<A> {
        matcher::parse(self, line)
    }
}

/// Builder for [`CommandTree`]
///
/// Problems are collected and reported by [`CommandTreeBuilder::build`], so
/// the chain itself never fails.
#[derive(Debug, Clone)]
pub struct CommandTreeBuilder<A> {
    stages: Vec<Vec<String>>,
    has_argument: bool,
    validate: Option<Validator>,
    key_filter: Option<KeyFilter>,
    argument_hint: Option<String>,
    description: String,
    action: A,
}

impl<A> CommandTreeBuilder<A> {
    fn new(action: A) -> Self {
        Self {
            stages: Vec::new(),
            has_argument: false,
            validate: None,
            key_filter: None,
            argument_hint: None,
            description: String::new(),
            action,
        }
    }

    /// Append a stage accepting any of `aliases`
    pub fn stage<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stages
            .push(aliases.into_iter().map(Into::into).collect());
        self
    }

    /// Expect a trailing argument; a validator must also be supplied
    pub fn with_argument(mut self, hint: impl Into<String>) -> Self {
        self.has_argument = true;
        self.argument_hint = Some(hint.into());
        self
    }

    /// Validator for the trailing argument
    pub fn validator(mut self, validate: Validator) -> Self {
        self.validate = Some(validate);
        self
    }

    /// Per-keystroke filter for the trailing argument
    pub fn key_filter(mut self, filter: KeyFilter) -> Self {
        self.key_filter = Some(filter);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Validate and produce the tree
    pub fn build(self) -> Result<CommandTree<A>, CommandTreeError> {
        if self.stages.is_empty() {
            return Err(CommandTreeError::NoStages);
        }

        let command = self.stages[0]
            .first()
            .cloned()
            .unwrap_or_default();

        let mut stages = Vec::with_capacity(self.stages.len());
        for (index, aliases) in self.stages.into_iter().enumerate() {
            if aliases.is_empty() {
                return Err(CommandTreeError::EmptyStage {
                    command,
                    stage: index,
                });
            }
            for (i, alias) in aliases.iter().enumerate() {
                if alias.is_empty() || alias.chars().any(char::is_whitespace) {
                    return Err(CommandTreeError::InvalidAlias(alias.clone()));
                }
                if aliases[..i].contains(alias) {
                    return Err(CommandTreeError::RepeatedAlias {
                        command,
                        stage: index,
                        alias: alias.clone(),
                    });
                }
            }
            stages.push(Stage { aliases });
        }

        let argument = match (self.has_argument, self.validate) {
            (true, Some(validate)) => Some(ArgumentSpec {
                validate,
                key_filter: self.key_filter,
            }),
            (true, None) => return Err(CommandTreeError::MissingValidator(command)),
            (false, _) => None,
        };

        Ok(CommandTree {
            stages,
            argument,
            argument_hint: if self.has_argument {
                self.argument_hint
            } else {
                None
            },
            description: self.description,
            action: self.action,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric(arg: &str) -> Result<(), String> {
        arg.parse::<f64>()
            .map(|_| ())
            .map_err(|_| format!("'{}' is not a number", arg))
    }

    #[test]
    fn test_build_simple_tree() {
        let tree = CommandTree::builder(())
            .stage(["set"])
            .stage(["bill", "stat"])
            .build()
            .unwrap();

        assert_eq!(tree.name(), "set");
        assert_eq!(tree.depth(), 2);
        assert!(!tree.has_argument());
        assert_eq!(tree.stages()[1].aliases(), ["bill", "stat"]);
        assert!(tree.stages()[1].contains("stat"));
        assert!(!tree.stages()[1].contains("sta"));
    }

    #[test]
    fn test_no_stages_rejected() {
        let result = CommandTree::builder(()).build();
        assert_eq!(result.unwrap_err(), CommandTreeError::NoStages);
    }

    #[test]
    fn test_empty_stage_rejected() {
        let result = CommandTree::builder(())
            .stage(["set"])
            .stage(Vec::<String>::new())
            .build();
        assert!(matches!(
            result,
            Err(CommandTreeError::EmptyStage { stage: 1, .. })
        ));
    }

    #[test]
    fn test_repeated_alias_rejected() {
        let result = CommandTree::builder(())
            .stage(["set"])
            .stage(["bill", "bill"])
            .build();
        assert!(matches!(
            result,
            Err(CommandTreeError::RepeatedAlias { stage: 1, .. })
        ));
    }

    #[test]
    fn test_same_alias_in_different_stages_allowed() {
        let tree = CommandTree::builder(())
            .stage(["bill"])
            .stage(["bill"])
            .build();
        assert!(tree.is_ok());
    }

    #[test]
    fn test_multi_word_alias_rejected() {
        let result = CommandTree::builder(()).stage(["set bill"]).build();
        assert_eq!(
            result.unwrap_err(),
            CommandTreeError::InvalidAlias("set bill".into())
        );
    }

    #[test]
    fn test_argument_without_validator_rejected() {
        let result = CommandTree::builder(())
            .stage(["affix"])
            .with_argument("<amount>")
            .build();
        assert_eq!(
            result.unwrap_err(),
            CommandTreeError::MissingValidator("affix".into())
        );
    }

    #[test]
    fn test_validator_without_argument_is_ignored() {
        let tree = CommandTree::builder(())
            .stage(["quit"])
            .validator(numeric)
            .build()
            .unwrap();
        assert!(!tree.has_argument());
    }

    #[test]
    fn test_argument_spec() {
        let tree = CommandTree::builder(())
            .stage(["affix"])
            .with_argument("<amount>")
            .validator(numeric)
            .key_filter(|c| c.is_ascii_digit() || c == '.')
            .build()
            .unwrap();

        let spec = tree.argument().unwrap();
        assert!(spec.validate("12.5").is_ok());
        assert_eq!(spec.validate("abc").unwrap_err(), "'abc' is not a number");
        assert!(spec.key_filter().is_some());
    }

    #[test]
    fn test_usage() {
        let tree = CommandTree::builder(())
            .stage(["set"])
            .stage(["bill", "income"])
            .with_argument("<amount>")
            .validator(numeric)
            .build()
            .unwrap();
        assert_eq!(tree.usage(), "set bill|income <amount>");
    }
}
