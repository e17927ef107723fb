//! Explicitly owned dashboard state.
//!
//! Everything a view needs (current tab, gallery filter, detail selection,
//! uploads, activity) lives here and is mutated only through these methods.
//! Views read [`DashboardSnapshot`]s.

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::activity::{ActivityEntry, ActivityFeed, ActivityKind};
use crate::broadcast::UploadProgressBroadcaster;
use crate::config::{validate_config, Config};
use crate::data::{DashboardStats, DataProvider, FixtureProvider};
use crate::error::{DataError, FilterError};
use crate::notify::{self, Acknowledgement};
use crate::upload::{
    CandidateFile, Clock, SimulatorHost, UploadItem, UploadSimulator, UploadSummary,
};
use crate::violations::{filter_by_type, ViolationFilter, ViolationRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Dashboard,
    Upload,
    Violations,
    Analytics,
}

impl FromStr for Tab {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dashboard" => Ok(Tab::Dashboard),
            "upload" => Ok(Tab::Upload),
            "violations" => Ok(Tab::Violations),
            "analytics" => Ok(Tab::Analytics),
            other => Err(FilterError::UnknownTab(other.to_string())),
        }
    }
}

/// Read-only view of the dashboard for rendering.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub tab: Tab,
    pub filter: ViolationFilter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<ViolationRecord>,
    pub stats: DashboardStats,
    pub uploads: UploadSummary,
    pub activity: Vec<ActivityEntry>,
}

pub struct DashboardState {
    provider: Arc<dyn DataProvider>,
    simulator: UploadSimulator,
    tab: Tab,
    filter: ViolationFilter,
    selected: Option<u32>,
    activity: ActivityFeed,
}

impl DashboardState {
    pub fn new(
        provider: Arc<dyn DataProvider>,
        simulator: UploadSimulator,
        activity_capacity: usize,
    ) -> Self {
        Self {
            provider,
            simulator,
            tab: Tab::default(),
            filter: ViolationFilter::default(),
            selected: None,
            activity: ActivityFeed::new(activity_capacity),
        }
    }

    /// Builds the dashboard `config` describes: the fixture at
    /// `dashboard.fixturePath` (demo data when unset) and a simulator with
    /// the configured timings.
    pub fn from_config(
        config: &Config,
        clock: Arc<dyn Clock>,
        broadcaster: UploadProgressBroadcaster,
    ) -> crate::Result<Self> {
        validate_config(config)?;
        let provider =
            FixtureProvider::from_optional_path(config.dashboard.fixture_path.as_deref())?;
        let simulator = UploadSimulator::new(config.simulator.clone(), clock, broadcaster);

        Ok(Self::new(
            Arc::new(provider),
            simulator,
            config.dashboard.activity_capacity,
        ))
    }

    pub fn provider(&self) -> &dyn DataProvider {
        self.provider.as_ref()
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn filter(&self) -> ViolationFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: ViolationFilter) {
        self.filter = filter;
    }

    /// Records matching the active filter, in fixture order.
    pub fn visible_violations(&self) -> Vec<&ViolationRecord> {
        filter_by_type(self.provider.list_violations(), self.filter)
    }

    /// Opens the detail overlay for `record`, or closes it with `None`.
    pub fn select_for_detail(&mut self, record: Option<&ViolationRecord>) {
        self.selected = record.map(|r| r.id);
    }

    /// Opens the detail overlay for the record with `id`.
    pub fn select_by_id(&mut self, id: u32) -> Result<&ViolationRecord, DataError> {
        let record = self.provider.get_violation(id)?;
        self.selected = Some(record.id);
        Ok(record)
    }

    pub fn selected(&self) -> Option<&ViolationRecord> {
        self.selected
            .and_then(|id| self.provider.get_violation(id).ok())
    }

    pub fn accept_uploads(&mut self, files: &[CandidateFile]) -> Vec<UploadItem> {
        self.simulator.accept(files)
    }

    pub fn uploads(&self) -> &[UploadItem] {
        self.simulator.items()
    }

    pub fn send_sms(&mut self, id: u32) -> Result<Acknowledgement, DataError> {
        let ack = notify::send_sms(self.provider.get_violation(id)?);
        self.activity
            .push(ActivityKind::Notification, ack.message.clone());
        Ok(ack)
    }

    pub fn download_evidence(&mut self, id: u32) -> Result<Acknowledgement, DataError> {
        let ack = notify::download_evidence(self.provider.get_violation(id)?);
        self.activity
            .push(ActivityKind::Notification, ack.message.clone());
        Ok(ack)
    }

    pub fn record_activity(&mut self, kind: ActivityKind, message: impl Into<String>) {
        self.activity.push(kind, message);
    }

    pub fn activity(&self) -> &ActivityFeed {
        &self.activity
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            tab: self.tab,
            filter: self.filter,
            selected: self.selected().cloned(),
            stats: self.provider.get_stats(),
            uploads: self.simulator.summary(),
            activity: self.activity.entries().cloned().collect(),
        }
    }

    /// Tears down the upload pipeline; no timer fires afterwards.
    pub fn teardown(&mut self) {
        self.simulator.shutdown();
    }
}

impl SimulatorHost for DashboardState {
    fn simulator(&self) -> &UploadSimulator {
        &self.simulator
    }

    fn simulator_mut(&mut self) -> &mut UploadSimulator {
        &mut self.simulator
    }
}
