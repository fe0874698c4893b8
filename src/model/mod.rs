//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod identifiers;
pub mod key_action;
pub mod record;
pub mod store;

// Re-export for convenience
pub use error::AppError;
pub use identifiers::{InvalidRecordId, RecordId};
pub use key_action::KeyAction;
pub use record::{parse_record_date, Record};
pub use store::{RecordStore, StoreError};
