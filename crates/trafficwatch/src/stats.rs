//! Aggregates over violation records for the analytics cards.

use serde::Serialize;

use crate::violations::{NotificationStatus, ViolationRecord, ViolationType};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub violation_type: ViolationType,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: NotificationStatus,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ViolationSummary {
    pub total: usize,
    /// One entry per type, in [`ViolationType::ALL`] order, zeros included.
    pub by_type: Vec<TypeCount>,
    pub by_status: Vec<StatusCount>,
    pub total_fines: u64,
    /// Mean detector confidence, rounded to a whole percentage.
    pub mean_confidence_percent: u32,
}

pub fn summarize(records: &[ViolationRecord]) -> ViolationSummary {
    let by_type = ViolationType::ALL
        .iter()
        .map(|t| TypeCount {
            violation_type: *t,
            count: records.iter().filter(|r| r.violation_type == *t).count(),
        })
        .collect();

    let by_status = NotificationStatus::ALL
        .iter()
        .map(|s| StatusCount {
            status: *s,
            count: records.iter().filter(|r| r.status == *s).count(),
        })
        .collect();

    let total_fines = records.iter().map(|r| u64::from(r.fine_amount)).sum();

    let mean_confidence_percent = if records.is_empty() {
        0
    } else {
        let sum: f64 = records.iter().map(|r| r.confidence).sum();
        (sum / records.len() as f64 * 100.0).round() as u32
    };

    ViolationSummary {
        total: records.len(),
        by_type,
        by_status,
        total_fines,
        mean_confidence_percent,
    }
}
