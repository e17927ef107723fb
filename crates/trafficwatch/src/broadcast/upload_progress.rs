//! Upload progress broadcaster for real-time pipeline status streaming.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::upload::{UploadItem, UploadStatus};

/// What happened to an upload item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UploadEventKind {
    Accepted,
    Progress,
    UploadFinished,
    Step,
    Completed,
}

impl std::fmt::Display for UploadEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadEventKind::Accepted => write!(f, "Accepted"),
            UploadEventKind::Progress => write!(f, "Uploading"),
            UploadEventKind::UploadFinished => write!(f, "Upload finished"),
            UploadEventKind::Step => write!(f, "Processing"),
            UploadEventKind::Completed => write!(f, "Completed"),
        }
    }
}

/// Progress event for an upload item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadProgressEvent {
    /// Upload item identifier.
    pub item_id: Uuid,
    /// Original filename.
    pub filename: String,
    pub kind: UploadEventKind,
    /// Item status after the transition.
    pub status: UploadStatus,
    /// Item progress after the transition.
    pub progress: u8,
    /// Current processing step label, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
    /// Human-readable message describing the transition.
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl UploadProgressEvent {
    /// Captures the current state of `item`.
    pub fn from_item(item: &UploadItem, kind: UploadEventKind) -> Self {
        let message = match (kind, item.current_step.as_deref()) {
            (UploadEventKind::Step, Some(step)) => format!("{}...", step),
            (UploadEventKind::Progress, _) => format!("Uploading {}%", item.progress),
            (UploadEventKind::Completed, _) => "Analysis complete".to_string(),
            _ => kind.to_string(),
        };

        Self {
            item_id: item.id,
            filename: item.name.clone(),
            kind,
            status: item.status,
            progress: item.progress,
            step: item.current_step.clone(),
            message,
            timestamp: Utc::now(),
        }
    }
}

/// Broadcasts upload progress events for streaming.
#[derive(Clone)]
pub struct UploadProgressBroadcaster {
    sender: Arc<broadcast::Sender<UploadProgressEvent>>,
}

impl UploadProgressBroadcaster {
    /// Creates a new broadcaster with the specified channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Sends a progress event to all subscribers.
    pub fn send(&self, event: UploadProgressEvent) {
        // Ignore errors - no active receivers is fine
        let _ = self.sender.send(event);
    }

    /// Creates a new subscriber for progress events.
    pub fn subscribe(&self) -> broadcast::Receiver<UploadProgressEvent> {
        self.sender.subscribe()
    }
}

impl Default for UploadProgressBroadcaster {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::CandidateFile;

    fn item() -> UploadItem {
        UploadItem::from_candidate(&CandidateFile::new("clip.mp4", "video/mp4", 2_000_000))
    }

    #[test]
    fn test_send_without_subscribers_is_fine() {
        let broadcaster = UploadProgressBroadcaster::new(4);
        broadcaster.send(UploadProgressEvent::from_item(&item(), UploadEventKind::Accepted));
    }

    #[test]
    fn test_broadcaster_send_receive() {
        let broadcaster = UploadProgressBroadcaster::new(10);
        let mut rx = broadcaster.subscribe();

        let item = item();
        broadcaster.send(UploadProgressEvent::from_item(&item, UploadEventKind::Accepted));

        let received = rx.try_recv().unwrap();
        assert_eq!(received.item_id, item.id);
        assert_eq!(received.filename, "clip.mp4");
        assert_eq!(received.status, UploadStatus::Uploading);
        assert_eq!(received.progress, 0);
        assert_eq!(received.kind, UploadEventKind::Accepted);
    }

    #[test]
    fn test_step_message_uses_label() {
        let mut item = item();
        item.status = UploadStatus::Processing;
        item.progress = 100;
        item.current_step = Some("Running AI detection".to_string());

        let event = UploadProgressEvent::from_item(&item, UploadEventKind::Step);
        assert_eq!(event.message, "Running AI detection...");

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["step"], "Running AI detection");
        assert_eq!(json["status"], "processing");
    }
}
