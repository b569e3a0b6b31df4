//! Command line engine
//!
//! Command trees describe what can be typed; the matcher turns a whole input
//! line into a [`MatchStatus`] with completions, an error or a ready action.
//! The finance catalog and executor sit on top of that engine.

pub mod catalog;
pub mod exec;
pub mod hint;
pub mod keys;
pub mod matcher;
pub mod registry;
pub mod suggest;
pub mod tree;

pub use catalog::{finance_commands, CommandAction, RecordKind, View};
pub use exec::{Executor, Session};
pub use hint::{line_state, visible_suggestions, LineState};
pub use keys::accepts_key;
pub use matcher::{parse, BoundAction, CommandError, MatchStatus};
pub use registry::{CommandRegistry, Resolution};
pub use suggest::normalize;
pub use tree::{ArgumentSpec, CommandTree, CommandTreeBuilder, CommandTreeError, KeyFilter, Stage, Validator};
