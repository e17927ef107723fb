//! Violation record types.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// Kind of traffic violation the detector reports.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ViolationType {
    Helmet,
    Signal,
    Seatbelt,
    Lane,
    Speed,
}

impl ViolationType {
    /// All types in display order.
    pub const ALL: [ViolationType; 5] = [
        ViolationType::Helmet,
        ViolationType::Signal,
        ViolationType::Seatbelt,
        ViolationType::Lane,
        ViolationType::Speed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationType::Helmet => "helmet",
            ViolationType::Signal => "signal",
            ViolationType::Seatbelt => "seatbelt",
            ViolationType::Lane => "lane",
            ViolationType::Speed => "speed",
        }
    }
}

impl std::fmt::Display for ViolationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViolationType::Helmet => write!(f, "No Helmet"),
            ViolationType::Signal => write!(f, "Signal Jump"),
            ViolationType::Seatbelt => write!(f, "No Seatbelt"),
            ViolationType::Lane => write!(f, "Wrong Lane"),
            ViolationType::Speed => write!(f, "Over Speeding"),
        }
    }
}

impl FromStr for ViolationType {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "helmet" => Ok(ViolationType::Helmet),
            "signal" => Ok(ViolationType::Signal),
            "seatbelt" => Ok(ViolationType::Seatbelt),
            "lane" => Ok(ViolationType::Lane),
            "speed" => Ok(ViolationType::Speed),
            other => Err(FilterError::UnknownType(other.to_string())),
        }
    }
}

/// Owner notification state of a violation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    Notified,
    Pending,
    Processing,
}

impl NotificationStatus {
    pub const ALL: [NotificationStatus; 3] = [
        NotificationStatus::Notified,
        NotificationStatus::Pending,
        NotificationStatus::Processing,
    ];
}

/// A single detected violation. Read-only demo data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViolationRecord {
    pub id: u32,
    pub plate: String,
    #[serde(rename = "type")]
    pub violation_type: ViolationType,
    pub location: String,
    /// ISO-8601 local timestamp of the detection.
    pub timestamp: String,
    /// Detector confidence in `[0, 1]`.
    pub confidence: f64,
    pub fine_amount: u32,
    pub status: NotificationStatus,
    /// Reference to the evidence image or clip.
    pub evidence_ref: String,
    pub description: String,
}

impl ViolationRecord {
    /// Confidence as a whole percentage for display.
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_type_parse() {
        assert_eq!("helmet".parse::<ViolationType>(), Ok(ViolationType::Helmet));
        assert_eq!(" Speed ".parse::<ViolationType>(), Ok(ViolationType::Speed));
        assert_eq!(
            "parking".parse::<ViolationType>(),
            Err(FilterError::UnknownType("parking".to_string()))
        );
    }

    #[test]
    fn test_violation_type_round_trips_as_str() {
        for t in ViolationType::ALL {
            assert_eq!(t.as_str().parse::<ViolationType>(), Ok(t));
        }
    }

    #[test]
    fn test_record_serializes_type_field() {
        let record = ViolationRecord {
            id: 1,
            plate: "MH12AB1234".to_string(),
            violation_type: ViolationType::Helmet,
            location: "MG Road".to_string(),
            timestamp: "2024-01-15T10:30:00".to_string(),
            confidence: 0.944,
            fine_amount: 1000,
            status: NotificationStatus::Notified,
            evidence_ref: "evidence/v001.jpg".to_string(),
            description: "Rider without helmet".to_string(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "helmet");
        assert_eq!(json["fineAmount"], 1000);
        assert_eq!(json["status"], "notified");
        assert_eq!(record.confidence_percent(), 94);
    }
}
