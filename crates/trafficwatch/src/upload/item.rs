use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of an upload item. Transitions only move forward:
/// uploading → processing → completed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    Uploading,
    Processing,
    Completed,
    /// Declared for clients; the mock pipeline never produces it.
    Error,
}

impl UploadStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, UploadStatus::Completed | UploadStatus::Error)
    }
}

impl std::fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadStatus::Uploading => write!(f, "uploading"),
            UploadStatus::Processing => write!(f, "processing"),
            UploadStatus::Completed => write!(f, "completed"),
            UploadStatus::Error => write!(f, "error"),
        }
    }
}

/// A file offered for upload, as described by the picker or drop zone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CandidateFile {
    pub name: String,
    pub mime_type: String,
    pub byte_size: u64,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, byte_size: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            byte_size,
        }
    }

    /// Describes a file on disk: size from metadata, MIME type guessed from
    /// the extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let guessed = mime_guess::from_path(path).first_or_octet_stream();
        let mime_type = declared_mime_type(guessed.essence_str()).to_string();

        Ok(Self {
            name,
            mime_type,
            byte_size: metadata.len(),
        })
    }
}

/// Maps registered MIME names to the names upload pickers declare for the
/// same formats.
fn declared_mime_type(essence: &str) -> &str {
    match essence {
        "video/x-msvideo" => "video/avi",
        "video/quicktime" => "video/mov",
        other => other,
    }
}

/// Client-side record tracking the fake progress of one accepted file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadItem {
    pub id: Uuid,
    pub name: String,
    pub byte_size: u64,
    pub mime_type: String,
    pub status: UploadStatus,
    /// Percentage in `0..=100`.
    pub progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_step: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UploadItem {
    pub fn from_candidate(file: &CandidateFile) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: file.name.clone(),
            byte_size: file.byte_size,
            mime_type: file.mime_type.clone(),
            status: UploadStatus::Uploading,
            progress: 0,
            current_step: None,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_new_item_starts_uploading() {
        let item = UploadItem::from_candidate(&CandidateFile::new("a.png", "image/png", 10));
        assert_eq!(item.status, UploadStatus::Uploading);
        assert_eq!(item.progress, 0);
        assert!(item.current_step.is_none());
        assert_eq!(item.mime_type, "image/png");
    }

    #[test]
    fn test_items_get_distinct_ids() {
        let file = CandidateFile::new("a.png", "image/png", 10);
        assert_ne!(
            UploadItem::from_candidate(&file).id,
            UploadItem::from_candidate(&file).id
        );
    }

    #[test]
    fn test_candidate_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junction.jpg");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&[0u8; 1234]).unwrap();

        let candidate = CandidateFile::from_path(&path).unwrap();
        assert_eq!(candidate.name, "junction.jpg");
        assert_eq!(candidate.mime_type, "image/jpeg");
        assert_eq!(candidate.byte_size, 1234);
    }

    #[test]
    fn test_candidate_from_path_declares_accepted_types() {
        let dir = tempfile::tempdir().unwrap();
        let policy = crate::upload::AcceptPolicy::default();
        let expected = [
            ("a.mp4", "video/mp4"),
            ("a.avi", "video/avi"),
            ("a.mov", "video/mov"),
            ("a.jpg", "image/jpeg"),
            ("a.png", "image/png"),
        ];

        for (name, mime_type) in expected {
            let path = dir.path().join(name);
            std::fs::write(&path, b"frame").unwrap();

            let candidate = CandidateFile::from_path(&path).unwrap();
            assert_eq!(candidate.mime_type, mime_type, "{name}");
            assert!(policy.admits(&candidate), "{name} should be admitted");
        }
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(UploadStatus::Processing).unwrap(),
            serde_json::json!("processing")
        );
        assert!(UploadStatus::Completed.is_finished());
        assert!(!UploadStatus::Uploading.is_finished());
    }
}
