//! Command registry
//!
//! Holds every top-level command family and resolves an input line to the
//! first family that recognizes it.

use super::matcher::{CommandError, MatchStatus};
use super::suggest::normalize;
use super::tree::{CommandTree, CommandTreeError};

/// The tree a line resolved to, with its match status
#[derive(Debug, Clone)]
pub struct Resolution<'r, A> {
    /// `None` when no registered command recognizes the line
    pub tree: Option<&'r CommandTree<A>>,
    pub status: MatchStatus<A>,
}

/// Ordered collection of command trees with globally unique first words
#[derive(Debug, Clone)]
pub struct CommandRegistry<A> {
    trees: Vec<CommandTree<A>>,
    aliases: Vec<String>,
}

impl<A> Default for CommandRegistry<A> {
    fn default() -> Self {
        Self {
            trees: Vec::new(),
            aliases: Vec::new(),
        }
    }
}

impl<A: Clone> CommandRegistry<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tree, refusing stage-0 aliases that are already claimed
    pub fn register(&mut self, tree: CommandTree<A>) -> Result<(), CommandTreeError> {
        let first = tree.stages()[0].aliases();
        if let Some(taken) = first.iter().find(|alias| self.aliases.contains(alias)) {
            return Err(CommandTreeError::DuplicateAlias(taken.clone()));
        }

        log::debug!("registered command '{}'", tree.usage());
        self.aliases.extend(first.iter().cloned());
        self.trees.push(tree);
        Ok(())
    }

    /// Chaining form of [`CommandRegistry::register`]
    pub fn with(mut self, tree: CommandTree<A>) -> Result<Self, CommandTreeError> {
        self.register(tree)?;
        Ok(self)
    }

    pub fn trees(&self) -> &[CommandTree<A>] {
        &self.trees
    }

    /// Every stage-0 alias, in registration order
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Find the tree owning a first word
    pub fn find(&self, alias: &str) -> Option<&CommandTree<A>> {
        self.trees
            .iter()
            .find(|tree| tree.stages()[0].contains(alias))
    }

    /// Resolve a line to the first tree that recognizes it
    pub fn resolve(&self, line: &str) -> Resolution<'_, A> {
        for tree in &self.trees {
            let status = tree.parse(line);
            if status.is_command {
                return Resolution {
                    tree: Some(tree),
                    status,
                };
            }
        }

        Resolution {
            tree: None,
            status: MatchStatus {
                is_command: false,
                is_complete: false,
                suggestions: normalize(line, 0, &self.aliases),
                matched_depth: 0,
                error: Some(CommandError::NotCommand),
                action: None,
            },
        }
    }

    /// Whether `key` may be appended to `line`
    ///
    /// The owning tree's key filter is consulted only when the caret sits in
    /// its argument slot: every fixed stage is matched and the line has moved
    /// past the last of them.
    pub fn accepts_key(&self, line: &str, key: char) -> bool {
        let Resolution { tree, status } = self.resolve(line);
        let Some(tree) = tree else {
            return true;
        };

        let fields = line.split_whitespace().count();
        let past_stages = fields > tree.depth() || line.ends_with(char::is_whitespace);
        if !tree.has_argument() || status.matched_depth < tree.depth() || !past_stages {
            return true;
        }

        tree.accepts_key(status.matched_depth, key)
    }
}
