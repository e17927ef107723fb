//! Violation gallery filtering.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::record::{ViolationRecord, ViolationType};
use crate::error::FilterError;

/// Active gallery filter: everything, or one violation type. Serialized as
/// `"all"` or the type name, the same strings [`FromStr`] accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ViolationFilter {
    #[default]
    All,
    Type(ViolationType),
}

impl ViolationFilter {
    pub fn matches(&self, record: &ViolationRecord) -> bool {
        match self {
            ViolationFilter::All => true,
            ViolationFilter::Type(t) => record.violation_type == *t,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationFilter::All => "all",
            ViolationFilter::Type(t) => t.as_str(),
        }
    }
}

impl FromStr for ViolationFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(ViolationFilter::All);
        }
        s.parse().map(ViolationFilter::Type)
    }
}

impl From<ViolationFilter> for String {
    fn from(filter: ViolationFilter) -> Self {
        filter.as_str().to_string()
    }
}

impl TryFrom<String> for ViolationFilter {
    type Error = FilterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for ViolationFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the records matching `filter`, preserving input order.
pub fn filter_by_type<'a>(
    records: &'a [ViolationRecord],
    filter: ViolationFilter,
) -> Vec<&'a ViolationRecord> {
    records.iter().filter(|r| filter.matches(r)).collect()
}

/// Looks up a record by id.
pub fn find(records: &[ViolationRecord], id: u32) -> Option<&ViolationRecord> {
    records.iter().find(|r| r.id == id)
}
