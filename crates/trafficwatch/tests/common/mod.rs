//! Shared test utilities for trafficwatch integration tests.
//!
//! `TestHarness` wires a dashboard over the demo fixture to a virtual clock
//! so the upload pipeline can be stepped deterministically.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;

use trafficwatch::config::SimulatorConfig;
use trafficwatch::upload::{SimulatorHost, VirtualClock};
use trafficwatch::{
    CandidateFile, DashboardState, FixtureProvider, UploadItem, UploadProgressBroadcaster,
    UploadProgressEvent, UploadSimulator,
};

pub struct TestHarness {
    pub clock: Arc<VirtualClock>,
    pub state: DashboardState,
    pub events: broadcast::Receiver<UploadProgressEvent>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_config(SimulatorConfig::default(), 7)
    }

    pub fn with_config(config: SimulatorConfig, seed: u64) -> Self {
        let clock = Arc::new(VirtualClock::new());
        let broadcaster = UploadProgressBroadcaster::new(4096);
        let events = broadcaster.subscribe();
        let simulator = UploadSimulator::with_seed(config, clock.clone(), broadcaster, seed);
        let provider = FixtureProvider::demo().expect("demo fixture loads");

        Self {
            clock,
            state: DashboardState::new(Arc::new(provider), simulator, 20),
            events,
        }
    }

    pub fn accept(&mut self, files: &[CandidateFile]) -> Vec<UploadItem> {
        self.state.accept_uploads(files)
    }

    /// Advances virtual time by `by` and fires whatever is due.
    pub fn advance(&mut self, by: Duration) -> usize {
        self.clock.advance(by);
        self.state.simulator_mut().tick()
    }

    pub fn item(&self, id: uuid::Uuid) -> UploadItem {
        self.state
            .simulator()
            .get(id)
            .cloned()
            .expect("item exists")
    }

    pub fn drain_events(&mut self) -> Vec<UploadProgressEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }
}

pub fn clip() -> CandidateFile {
    CandidateFile::new("clip.mp4", "video/mp4", 2_000_000)
}

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}
