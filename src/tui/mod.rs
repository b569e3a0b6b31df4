//! Terminal User Interface module
//!
//! A single command line drives everything: the records panel shows the
//! active view, completions update on every keystroke and Enter runs the
//! line once it is complete.

pub mod app;
pub mod commander;
pub mod event;
pub mod handler;
pub mod layout;
pub mod terminal;
pub mod views;
pub mod widgets;

pub use app::App;
pub use terminal::run_tui;
