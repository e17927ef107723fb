//! Runs an [`UploadSimulator`] on wall-clock time.
//!
//! One task owns the scheduling loop: it sleeps until the simulator's next
//! deadline, a wake-up after new uploads, or shutdown, then advances the
//! simulator under the host's write lock. Dropping or shutting down the
//! [`DriverHandle`] clears every pending timer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Notify, RwLock};
use tokio::task::JoinHandle;

use super::simulator::UploadSimulator;

/// State container that owns an upload simulator.
pub trait SimulatorHost: Send + Sync + 'static {
    fn simulator(&self) -> &UploadSimulator;

    fn simulator_mut(&mut self) -> &mut UploadSimulator;
}

impl SimulatorHost for UploadSimulator {
    fn simulator(&self) -> &UploadSimulator {
        self
    }

    fn simulator_mut(&mut self) -> &mut UploadSimulator {
        self
    }
}

/// Handle to a running driver task.
pub struct DriverHandle {
    shutdown_tx: watch::Sender<bool>,
    wake: Arc<Notify>,
    join: Option<JoinHandle<()>>,
}

impl DriverHandle {
    /// Tells the driver that new timers were scheduled.
    pub fn wake(&self) {
        self.wake.notify_one();
    }

    /// Stops the driver and waits for it to clear the simulator's timers.
    pub async fn shutdown(mut self) {
        let _ = self.shutdown_tx.send(true);
        if let Some(join) = self.join.take() {
            if let Err(e) = join.await {
                log::error!("Upload driver task failed: {}", e);
            }
        }
    }
}

impl Drop for DriverHandle {
    fn drop(&mut self) {
        // The task sees the flag (or the closed channel) and clears timers
        // itself on its way out.
        let _ = self.shutdown_tx.send(true);
    }
}

/// Spawns the scheduling loop for the simulator inside `host`.
pub fn spawn<H: SimulatorHost>(host: Arc<RwLock<H>>) -> DriverHandle {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let wake = Arc::new(Notify::new());

    let join = tokio::spawn(run(host, shutdown_rx, Arc::clone(&wake)));

    DriverHandle {
        shutdown_tx,
        wake,
        join: Some(join),
    }
}

async fn run<H: SimulatorHost>(
    host: Arc<RwLock<H>>,
    mut shutdown_rx: watch::Receiver<bool>,
    wake: Arc<Notify>,
) {
    log::info!("Upload driver started");

    loop {
        if *shutdown_rx.borrow() {
            break;
        }

        let wait = {
            let guard = host.read().await;
            let sim = guard.simulator();
            sim.next_deadline()
                .map(|deadline| deadline.saturating_sub(sim.clock().now()))
        };

        tokio::select! {
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    break;
                }
            }
            _ = wake.notified() => {}
            _ = sleep_or_park(wait) => {
                let mut guard = host.write().await;
                let fired = guard.simulator_mut().tick();
                log::trace!("Upload driver fired {} timers", fired);
            }
        }
    }

    host.write().await.simulator_mut().shutdown();
    log::info!("Upload driver stopped");
}

async fn sleep_or_park(wait: Option<Duration>) {
    match wait {
        Some(wait) => tokio::time::sleep(wait).await,
        None => std::future::pending::<()>().await,
    }
}
