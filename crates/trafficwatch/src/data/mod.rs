pub mod fixture;
pub mod provider;

pub use fixture::{DashboardStats, DistributionSlice, Fixture, TrendPoint};
pub use provider::{DataProvider, FixtureProvider};
