//! Owner notification and evidence actions.
//!
//! Both actions only produce an acknowledgement for the operator; no SMS
//! gateway or file transfer is involved.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::violations::ViolationRecord;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationAction {
    SendSms,
    DownloadEvidence,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Acknowledgement {
    pub action: NotificationAction,
    pub violation_id: u32,
    pub plate: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

pub fn send_sms(record: &ViolationRecord) -> Acknowledgement {
    let message = format!("SMS sent to vehicle owner for {}", record.plate);
    log::info!("{}", message);
    acknowledge(NotificationAction::SendSms, record, message)
}

pub fn download_evidence(record: &ViolationRecord) -> Acknowledgement {
    let message = format!(
        "Evidence {} downloaded for {}",
        record.evidence_ref, record.plate
    );
    log::info!("{}", message);
    acknowledge(NotificationAction::DownloadEvidence, record, message)
}

fn acknowledge(
    action: NotificationAction,
    record: &ViolationRecord,
    message: String,
) -> Acknowledgement {
    Acknowledgement {
        action,
        violation_id: record.id,
        plate: record.plate.clone(),
        message,
        timestamp: Utc::now(),
    }
}
