//! Mock upload/processing pipeline.
//!
//! Each accepted file walks a fixed state machine:
//!
//! ```text
//! uploading --(progress reaches 100)--> processing --(last step + 1 tick)--> completed
//! ```
//!
//! No work is performed. Upload ticks add a random increment to the
//! progress counter; after a handoff delay the processing phase writes each
//! step label in order, one per processing tick. All timers live in one
//! [`TimerQueue`] driven by [`UploadSimulator::tick`], so a test can replay
//! the whole pipeline on a [`VirtualClock`](super::clock::VirtualClock).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, info_span};
use uuid::Uuid;

use super::accept::AcceptPolicy;
use super::clock::Clock;
use super::item::{CandidateFile, UploadItem, UploadStatus};
use super::timers::{Timer, TimerKind, TimerQueue};
use crate::broadcast::{UploadEventKind, UploadProgressBroadcaster, UploadProgressEvent};
use crate::config::SimulatorConfig;

/// Counts of upload items per status.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadSummary {
    pub total: usize,
    pub uploading: usize,
    pub processing: usize,
    pub completed: usize,
    pub error: usize,
}

pub struct UploadSimulator {
    config: SimulatorConfig,
    policy: AcceptPolicy,
    clock: Arc<dyn Clock>,
    rng: StdRng,
    broadcaster: UploadProgressBroadcaster,
    /// Items in arrival order.
    items: Vec<UploadItem>,
    /// Index into `config.steps` of the label each processing item shows.
    step_index: HashMap<Uuid, usize>,
    timers: TimerQueue,
    shut_down: bool,
}

impl UploadSimulator {
    pub fn new(
        config: SimulatorConfig,
        clock: Arc<dyn Clock>,
        broadcaster: UploadProgressBroadcaster,
    ) -> Self {
        Self::with_rng(config, clock, broadcaster, StdRng::from_entropy())
    }

    /// Creates a simulator with a fixed random seed.
    pub fn with_seed(
        config: SimulatorConfig,
        clock: Arc<dyn Clock>,
        broadcaster: UploadProgressBroadcaster,
        seed: u64,
    ) -> Self {
        Self::with_rng(config, clock, broadcaster, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        config: SimulatorConfig,
        clock: Arc<dyn Clock>,
        broadcaster: UploadProgressBroadcaster,
        rng: StdRng,
    ) -> Self {
        let policy = AcceptPolicy::from_config(&config);
        Self {
            config,
            policy,
            clock,
            rng,
            broadcaster,
            items: Vec::new(),
            step_index: HashMap::new(),
            timers: TimerQueue::new(),
            shut_down: false,
        }
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn broadcaster(&self) -> &UploadProgressBroadcaster {
        &self.broadcaster
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Admits the allowed files, appends them as new uploading items and
    /// starts their upload timers. Returns the accepted items.
    ///
    /// Rejected files are dropped silently. After [`shutdown`](Self::shutdown)
    /// nothing is accepted.
    pub fn accept(&mut self, files: &[CandidateFile]) -> Vec<UploadItem> {
        let _span = info_span!("upload.accept", candidates = files.len()).entered();

        if self.shut_down {
            debug!("Simulator is shut down, ignoring {} candidates", files.len());
            return Vec::new();
        }

        let now = self.clock.now();
        let upload_tick = self.config.upload_tick();
        let mut accepted = Vec::new();

        for file in self.policy.filter(files) {
            let item = UploadItem::from_candidate(file);
            self.timers
                .schedule(item.id, TimerKind::Upload, now + upload_tick);
            self.broadcaster
                .send(UploadProgressEvent::from_item(&item, UploadEventKind::Accepted));
            info!(item_id = %item.id, file = %item.name, "Upload accepted");

            accepted.push(item.clone());
            self.items.push(item);
        }

        accepted
    }

    /// Applies every timer due at the clock's current time.
    pub fn tick(&mut self) -> usize {
        let now = self.clock.now();
        self.advance_to(now)
    }

    /// Applies every timer due at or before `now`, earliest first. Returns
    /// the number of timers fired.
    pub fn advance_to(&mut self, now: Duration) -> usize {
        let mut fired = 0;

        while let Some(timer) = self.timers.pop_due(now) {
            fired += 1;
            match timer.kind {
                TimerKind::Upload => self.advance_upload(timer),
                TimerKind::Handoff => self.begin_processing(timer),
                TimerKind::Processing => self.advance_processing(timer),
            }
        }

        fired
    }

    /// Earliest pending deadline, if any timer is outstanding.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// True when no timer is outstanding.
    pub fn is_idle(&self) -> bool {
        self.timers.is_empty()
    }

    /// Clears every outstanding timer. Items keep their current state and
    /// no further tick fires.
    pub fn shutdown(&mut self) {
        if !self.timers.is_empty() {
            info!("Clearing {} pending upload timers", self.timers.len());
        }
        self.timers.clear();
        self.shut_down = true;
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    pub fn items(&self) -> &[UploadItem] {
        &self.items
    }

    pub fn get(&self, id: Uuid) -> Option<&UploadItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn summary(&self) -> UploadSummary {
        let mut summary = UploadSummary {
            total: self.items.len(),
            ..Default::default()
        };
        for item in &self.items {
            match item.status {
                UploadStatus::Uploading => summary.uploading += 1,
                UploadStatus::Processing => summary.processing += 1,
                UploadStatus::Completed => summary.completed += 1,
                UploadStatus::Error => summary.error += 1,
            }
        }
        summary
    }

    fn item_mut(&mut self, id: Uuid) -> Option<&mut UploadItem> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    fn emit(&self, id: Uuid, kind: UploadEventKind) {
        if let Some(item) = self.get(id) {
            self.broadcaster.send(UploadProgressEvent::from_item(item, kind));
        }
    }

    fn advance_upload(&mut self, timer: Timer) {
        let (low, high) = (self.config.min_increment, self.config.max_increment);
        let increment = if low < high {
            self.rng.gen_range(low..high)
        } else {
            low.max(1)
        };
        let upload_tick = self.config.upload_tick();
        let handoff_delay = self.config.handoff_delay();

        let Some(item) = self.item_mut(timer.item_id) else {
            return;
        };
        if item.status != UploadStatus::Uploading {
            return;
        }

        let next = item.progress.saturating_add(increment);
        if next >= 100 {
            item.progress = 100;
            item.status = UploadStatus::Processing;
            debug!(item_id = %item.id, "Upload finished, handing off to processing");
            self.timers
                .schedule(timer.item_id, TimerKind::Handoff, timer.due + handoff_delay);
            self.emit(timer.item_id, UploadEventKind::UploadFinished);
        } else {
            item.progress = next;
            self.timers
                .schedule(timer.item_id, TimerKind::Upload, timer.due + upload_tick);
            self.emit(timer.item_id, UploadEventKind::Progress);
        }
    }

    fn begin_processing(&mut self, timer: Timer) {
        let processing_tick = self.config.processing_tick();
        let first = self.config.steps.first().cloned();

        let Some(item) = self.item_mut(timer.item_id) else {
            return;
        };
        if item.status != UploadStatus::Processing {
            return;
        }

        item.current_step = first;
        self.step_index.insert(timer.item_id, 0);
        self.timers
            .schedule(timer.item_id, TimerKind::Processing, timer.due + processing_tick);
        self.emit(timer.item_id, UploadEventKind::Step);
    }

    fn advance_processing(&mut self, timer: Timer) {
        let processing_tick = self.config.processing_tick();
        let next_index = self.step_index.get(&timer.item_id).map_or(0, |i| i + 1);
        let next_label = self.config.steps.get(next_index).cloned();

        let Some(item) = self.item_mut(timer.item_id) else {
            return;
        };
        if item.status != UploadStatus::Processing {
            return;
        }

        match next_label {
            Some(label) => {
                item.current_step = Some(label);
                self.step_index.insert(timer.item_id, next_index);
                self.timers
                    .schedule(timer.item_id, TimerKind::Processing, timer.due + processing_tick);
                self.emit(timer.item_id, UploadEventKind::Step);
            }
            None => {
                item.status = UploadStatus::Completed;
                item.current_step = None;
                info!(item_id = %item.id, file = %item.name, "Processing completed");
                self.step_index.remove(&timer.item_id);
                self.emit(timer.item_id, UploadEventKind::Completed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::clock::VirtualClock;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn simulator(seed: u64) -> (UploadSimulator, Arc<VirtualClock>) {
        let clock = Arc::new(VirtualClock::new());
        let sim = UploadSimulator::with_seed(
            SimulatorConfig::default(),
            clock.clone(),
            UploadProgressBroadcaster::new(1024),
            seed,
        );
        (sim, clock)
    }

    fn clip() -> CandidateFile {
        CandidateFile::new("clip.mp4", "video/mp4", 2_000_000)
    }

    /// Steps the clock in upload-tick increments until the item leaves the
    /// uploading state.
    fn run_upload_phase(sim: &mut UploadSimulator, clock: &VirtualClock, id: Uuid) -> Vec<u8> {
        let mut seen = Vec::new();
        for _ in 0..100 {
            clock.advance(ms(200));
            sim.tick();
            let item = sim.get(id).unwrap();
            seen.push(item.progress);
            if item.status != UploadStatus::Uploading {
                break;
            }
        }
        seen
    }

    #[test]
    fn test_accept_creates_uploading_items() {
        let (mut sim, _clock) = simulator(1);
        let accepted = sim.accept(&[clip()]);

        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].status, UploadStatus::Uploading);
        assert_eq!(accepted[0].progress, 0);
        assert_eq!(sim.items().len(), 1);
        assert_eq!(sim.next_deadline(), Some(ms(200)));
    }

    #[test]
    fn test_accept_drops_rejected_files_silently() {
        let (mut sim, _clock) = simulator(1);
        let accepted = sim.accept(&[
            CandidateFile::new("doc.pdf", "application/pdf", 10),
            CandidateFile::new("photo.png", "image/png", 10),
        ]);

        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].name, "photo.png");
        assert_eq!(sim.items().len(), 1);
    }

    #[test]
    fn test_nothing_fires_before_first_tick() {
        let (mut sim, clock) = simulator(1);
        let id = sim.accept(&[clip()])[0].id;

        clock.advance(ms(199));
        assert_eq!(sim.tick(), 0);
        assert_eq!(sim.get(id).unwrap().progress, 0);
    }

    #[test]
    fn test_progress_increments_within_range() {
        let (mut sim, clock) = simulator(7);
        let id = sim.accept(&[clip()])[0].id;

        clock.advance(ms(200));
        sim.tick();
        let progress = sim.get(id).unwrap().progress;
        assert!((5..20).contains(&progress), "progress {progress}");
    }

    #[test]
    fn test_progress_is_monotonic_and_pinned_at_handoff() {
        for seed in 0..20 {
            let (mut sim, clock) = simulator(seed);
            let id = sim.accept(&[clip()])[0].id;

            let seen = run_upload_phase(&mut sim, &clock, id);
            assert!(seen.windows(2).all(|w| w[0] <= w[1]), "seed {seed}: {seen:?}");

            let item = sim.get(id).unwrap();
            assert_eq!(item.status, UploadStatus::Processing);
            assert_eq!(item.progress, 100);
            assert!(item.current_step.is_none());
        }
    }

    #[test]
    fn test_steps_in_order_then_completed() {
        let (mut sim, clock) = simulator(3);
        let mut rx = sim.broadcaster().subscribe();
        let id = sim.accept(&[clip()])[0].id;

        run_upload_phase(&mut sim, &clock, id);

        let mut labels = Vec::new();
        clock.advance(ms(1000));
        sim.tick();
        labels.push(sim.get(id).unwrap().current_step.clone().unwrap());

        for _ in 0..3 {
            clock.advance(ms(2000));
            sim.tick();
            assert_eq!(sim.get(id).unwrap().status, UploadStatus::Processing);
            assert_eq!(sim.get(id).unwrap().progress, 100);
            labels.push(sim.get(id).unwrap().current_step.clone().unwrap());
        }
        assert_eq!(
            labels,
            vec![
                "Extracting frames",
                "Running AI detection",
                "Analyzing violations",
                "Generating evidence"
            ]
        );

        clock.advance(ms(2000));
        sim.tick();
        let item = sim.get(id).unwrap();
        assert_eq!(item.status, UploadStatus::Completed);
        assert_eq!(item.progress, 100);
        assert!(item.current_step.is_none());
        assert!(sim.is_idle());

        // Nothing changes afterwards.
        clock.advance(ms(60_000));
        assert_eq!(sim.tick(), 0);

        let mut step_events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if event.kind == UploadEventKind::Step {
                step_events.push(event.step.unwrap());
            }
        }
        assert_eq!(step_events, labels);
    }

    #[test]
    fn test_handoff_waits_for_delay() {
        let (mut sim, clock) = simulator(5);
        let id = sim.accept(&[clip()])[0].id;
        run_upload_phase(&mut sim, &clock, id);

        clock.advance(ms(999));
        sim.tick();
        assert!(sim.get(id).unwrap().current_step.is_none());

        clock.advance(ms(1));
        sim.tick();
        assert_eq!(
            sim.get(id).unwrap().current_step.as_deref(),
            Some("Extracting frames")
        );
    }

    #[test]
    fn test_large_jump_catches_up_in_one_call() {
        let (mut sim, clock) = simulator(11);
        let id = sim.accept(&[clip()])[0].id;

        // 20 ticks of at least 5 is enough upload; 1s handoff; 4 processing ticks.
        clock.advance(ms(200 * 20 + 1000 + 4 * 2000));
        sim.tick();
        assert_eq!(sim.get(id).unwrap().status, UploadStatus::Completed);
    }

    #[test]
    fn test_items_progress_independently() {
        let (mut sim, clock) = simulator(9);
        let first = sim.accept(&[clip()])[0].id;

        clock.advance(ms(600));
        sim.tick();
        let second = sim.accept(&[CandidateFile::new("b.png", "image/png", 1)])[0].id;

        let first_progress = sim.get(first).unwrap().progress;
        assert!(first_progress > 0);
        assert_eq!(sim.get(second).unwrap().progress, 0);

        let ids: Vec<Uuid> = sim.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn test_shutdown_stops_all_timers() {
        let (mut sim, clock) = simulator(2);
        sim.accept(&[clip(), CandidateFile::new("b.png", "image/png", 1)]);

        clock.advance(ms(200));
        sim.tick();
        let before: Vec<UploadItem> = sim.items().to_vec();

        sim.shutdown();
        assert!(sim.is_idle());
        assert_eq!(sim.next_deadline(), None);

        clock.advance(ms(60_000));
        assert_eq!(sim.tick(), 0);
        assert_eq!(sim.items(), before.as_slice());
        assert!(sim.accept(&[clip()]).is_empty());
    }

    #[test]
    fn test_summary_counts() {
        let (mut sim, clock) = simulator(4);
        sim.accept(&[clip()]);
        clock.advance(ms(200 * 20 + 1000 + 4 * 2000));
        sim.tick();
        sim.accept(&[clip()]);

        let summary = sim.summary();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.uploading, 1);
        assert_eq!(summary.error, 0);
    }
}
