//! Mock upload and processing pipeline.

pub mod accept;
pub mod clock;
pub mod driver;
pub mod item;
pub mod simulator;
pub mod timers;

pub use accept::AcceptPolicy;
pub use clock::{Clock, TokioClock, VirtualClock};
pub use driver::{DriverHandle, SimulatorHost};
pub use item::{CandidateFile, UploadItem, UploadStatus};
pub use simulator::{UploadSimulator, UploadSummary};
