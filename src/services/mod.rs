//! Service layer for billbank
//!
//! Business rules on top of the storage layer: validation, unique names,
//! cross-record effects and audit logging.

pub mod account;
pub mod protection;
pub mod records;

pub use account::AccountService;
pub use protection::Protector;
pub use records::RecordService;
