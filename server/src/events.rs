//! Event bridge between the upload pipeline and the dashboard activity feed.

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use trafficwatch::dashboard::ActivityKind;
use trafficwatch::{DashboardState, UploadEventKind, UploadProgressBroadcaster, UploadProgressEvent};

/// Activity feed line for an upload event, if it deserves one.
fn activity_message(event: &UploadProgressEvent) -> Option<String> {
    match event.kind {
        UploadEventKind::Accepted => Some(format!("{} queued for analysis", event.filename)),
        UploadEventKind::Completed => Some(format!("Analysis complete for {}", event.filename)),
        _ => None,
    }
}

/// Subscribes to `broadcaster` and records upload milestones in the
/// dashboard's activity feed. Progress ticks are only logged at debug.
pub fn start_event_bridge(
    dashboard: Arc<RwLock<DashboardState>>,
    broadcaster: &UploadProgressBroadcaster,
) -> JoinHandle<()> {
    info!("Starting upload event bridge");

    let mut rx = broadcaster.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    match event.kind {
                        UploadEventKind::Progress => {
                            debug!("{}: {}", event.filename, event.message);
                        }
                        _ => info!("{}: {}", event.filename, event.message),
                    }

                    if let Some(message) = activity_message(&event) {
                        dashboard
                            .write()
                            .await
                            .record_activity(ActivityKind::Upload, message);
                    }
                }
                Err(RecvError::Lagged(n)) => {
                    warn!("Upload event bridge lagged, missed {} events", n);
                }
                Err(RecvError::Closed) => {
                    info!("Upload broadcaster closed, stopping event bridge");
                    break;
                }
            }
        }
    })
}
