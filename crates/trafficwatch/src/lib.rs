pub mod broadcast;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod notify;
pub mod stats;
pub mod upload;
pub mod violations;

pub use broadcast::{UploadEventKind, UploadProgressBroadcaster, UploadProgressEvent};
pub use config::{load_config, load_config_or_default, Config, SimulatorConfig};
pub use dashboard::{DashboardSnapshot, DashboardState, Tab};
pub use data::{DataProvider, Fixture, FixtureProvider};
pub use error::{ConfigError, DataError, FilterError, Result, TrafficWatchError};
pub use upload::{CandidateFile, UploadItem, UploadSimulator, UploadStatus};
pub use violations::{filter_by_type, ViolationFilter, ViolationRecord, ViolationType};
