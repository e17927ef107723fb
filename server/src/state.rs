//! Application state shared by the HTTP handlers.

use std::sync::Arc;

use log::info;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use trafficwatch::upload::{self, DriverHandle, TokioClock};
use trafficwatch::{Config, DashboardState, TrafficWatchError, UploadProgressBroadcaster};

use crate::events;

pub struct AppState {
    /// Configuration the server was started with.
    pub config: Config,

    /// Dashboard state: tab, filter, selection, uploads and activity.
    pub dashboard: Arc<RwLock<DashboardState>>,

    /// Upload progress broadcaster (shared with the simulator).
    pub broadcaster: UploadProgressBroadcaster,

    /// Driver running the upload simulator on wall-clock time.
    driver: Mutex<Option<DriverHandle>>,

    /// Progress event bridge task.
    bridge: Mutex<Option<JoinHandle<()>>>,
}

impl AppState {
    /// Builds the state from `config`, loading the fixture it names.
    pub fn new(config: Config) -> Result<Self, TrafficWatchError> {
        let broadcaster = UploadProgressBroadcaster::default();
        let dashboard =
            DashboardState::from_config(&config, Arc::new(TokioClock::new()), broadcaster.clone())?;

        Ok(Self {
            config,
            dashboard: Arc::new(RwLock::new(dashboard)),
            broadcaster,
            driver: Mutex::new(None),
            bridge: Mutex::new(None),
        })
    }

    /// Starts the upload driver and the event bridge. Calling it twice is a
    /// no-op.
    pub async fn start(&self) {
        let mut driver = self.driver.lock().await;
        if driver.is_some() {
            return;
        }

        *self.bridge.lock().await = Some(events::start_event_bridge(
            Arc::clone(&self.dashboard),
            &self.broadcaster,
        ));
        *driver = Some(upload::driver::spawn(Arc::clone(&self.dashboard)));
        info!("Upload pipeline started");
    }

    /// Tells the driver that uploads were accepted.
    pub async fn wake(&self) {
        if let Some(driver) = self.driver.lock().await.as_ref() {
            driver.wake();
        }
    }

    /// Stops the driver, clears pending timers and ends the event bridge.
    pub async fn shutdown(&self) {
        if let Some(driver) = self.driver.lock().await.take() {
            driver.shutdown().await;
        }
        self.dashboard.write().await.teardown();

        if let Some(bridge) = self.bridge.lock().await.take() {
            bridge.abort();
        }
        info!("Upload pipeline stopped");
    }
}
