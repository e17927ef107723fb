//! Broadcasting modules for real-time event streaming.

pub mod upload_progress;

pub use upload_progress::{UploadEventKind, UploadProgressBroadcaster, UploadProgressEvent};
