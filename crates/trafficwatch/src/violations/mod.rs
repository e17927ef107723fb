//! Violation records and gallery filtering.

pub mod filter;
pub mod record;

pub use filter::{filter_by_type, find, ViolationFilter};
pub use record::{NotificationStatus, ViolationRecord, ViolationType};
