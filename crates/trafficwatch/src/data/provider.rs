//! Read-only data provider seam.
//!
//! The dashboard only ever reads violation data through [`DataProvider`], so
//! a live feed can replace [`FixtureProvider`] without touching the views.

use std::path::Path;

use super::fixture::{DashboardStats, DistributionSlice, Fixture, TrendPoint};
use crate::error::DataError;
use crate::violations::{self, ViolationRecord};

pub trait DataProvider: Send + Sync {
    fn list_violations(&self) -> &[ViolationRecord];

    fn get_trends(&self) -> &[TrendPoint];

    fn get_distribution(&self) -> &[DistributionSlice];

    fn get_stats(&self) -> DashboardStats;

    fn get_violation(&self, id: u32) -> Result<&ViolationRecord, DataError> {
        violations::find(self.list_violations(), id).ok_or(DataError::ViolationNotFound(id))
    }
}

/// Serves a fixture injected at construction.
#[derive(Debug, Clone)]
pub struct FixtureProvider {
    fixture: Fixture,
}

impl FixtureProvider {
    pub fn new(fixture: Fixture) -> Self {
        Self { fixture }
    }

    /// Provider over the embedded demo dataset.
    pub fn demo() -> Result<Self, DataError> {
        Fixture::demo().map(Self::new)
    }

    /// Provider over `path` when given, otherwise the demo dataset.
    pub fn from_optional_path(path: Option<&Path>) -> Result<Self, DataError> {
        match path {
            Some(path) => {
                log::info!("Loading fixture from {}", path.display());
                Fixture::from_file(path).map(Self::new)
            }
            None => Self::demo(),
        }
    }
}

impl DataProvider for FixtureProvider {
    fn list_violations(&self) -> &[ViolationRecord] {
        &self.fixture.violations
    }

    fn get_trends(&self) -> &[TrendPoint] {
        &self.fixture.trends
    }

    fn get_distribution(&self) -> &[DistributionSlice] {
        &self.fixture.distribution
    }

    fn get_stats(&self) -> DashboardStats {
        self.fixture.stats
    }
}
