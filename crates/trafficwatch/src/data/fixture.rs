//! Immutable demo dataset backing the dashboard.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DataError;
use crate::violations::{ViolationRecord, ViolationType};

const DEMO_FIXTURE_JSON: &str = include_str!("../../fixtures/demo.json");

/// Headline numbers shown on the dashboard stat cards.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_violations: u32,
    pub pending_sms: u32,
    pub processing: u32,
}

/// One point of the weekly trend line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub label: String,
    pub total: u32,
    pub notified: u32,
}

/// One slice of the violation-type pie chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DistributionSlice {
    #[serde(rename = "type")]
    pub violation_type: ViolationType,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    #[serde(default)]
    pub stats: DashboardStats,
    pub violations: Vec<ViolationRecord>,
    #[serde(default)]
    pub trends: Vec<TrendPoint>,
    #[serde(default)]
    pub distribution: Vec<DistributionSlice>,
}

impl Fixture {
    /// The demo dataset compiled into the crate.
    pub fn demo() -> Result<Self, DataError> {
        Self::from_json(DEMO_FIXTURE_JSON)
    }

    pub fn from_json(content: &str) -> Result<Self, DataError> {
        let fixture: Fixture = serde_json::from_str(content)?;
        fixture.validate()?;
        Ok(fixture)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| DataError::ReadFixture {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&content)
    }

    fn validate(&self) -> Result<(), DataError> {
        let mut seen = HashSet::new();

        for record in &self.violations {
            if !seen.insert(record.id) {
                return Err(DataError::InvalidFixture {
                    message: format!("Duplicate violation id {}", record.id),
                });
            }

            if record.plate.trim().is_empty() {
                return Err(DataError::InvalidFixture {
                    message: format!("Violation {} has an empty plate", record.id),
                });
            }

            if !(0.0..=1.0).contains(&record.confidence) {
                return Err(DataError::InvalidFixture {
                    message: format!(
                        "Violation {} confidence {} is outside [0, 1]",
                        record.id, record.confidence
                    ),
                });
            }
        }

        Ok(())
    }
}
