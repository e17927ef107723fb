pub mod activity;
pub mod state;

pub use activity::{ActivityEntry, ActivityFeed, ActivityKind};
pub use state::{DashboardSnapshot, DashboardState, Tab};
