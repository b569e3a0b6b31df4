//! Configuration: file locations and user settings

pub mod paths;
pub mod settings;

pub use paths::BillbankPaths;
pub use settings::{ProtectionSettings, Settings};
