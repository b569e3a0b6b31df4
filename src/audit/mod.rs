//! Audit trail
//!
//! Every create, update and delete made through a command is appended to
//! `audit.log` as one JSON object per line, with the record's state before
//! and after the change.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
