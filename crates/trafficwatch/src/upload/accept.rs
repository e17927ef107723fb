//! Upload admission rules.

use crate::config::SimulatorConfig;

use super::item::CandidateFile;

/// Decides which candidate files enter the pipeline. Rejections are silent:
/// the policy only filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptPolicy {
    allowed_mime_types: Vec<String>,
    max_bytes: u64,
}

impl AcceptPolicy {
    pub fn new(allowed_mime_types: Vec<String>, max_bytes: u64) -> Self {
        Self {
            allowed_mime_types,
            max_bytes,
        }
    }

    pub fn from_config(config: &SimulatorConfig) -> Self {
        Self::new(config.allowed_mime_types.clone(), config.max_file_bytes)
    }

    /// True iff the declared type is allowed and the size is within limit.
    pub fn admits(&self, file: &CandidateFile) -> bool {
        self.allowed_mime_types.iter().any(|m| *m == file.mime_type)
            && file.byte_size <= self.max_bytes
    }

    /// Keeps admitted files in arrival order.
    pub fn filter<'a>(&self, files: &'a [CandidateFile]) -> Vec<&'a CandidateFile> {
        files
            .iter()
            .filter(|f| {
                let ok = self.admits(f);
                if !ok {
                    tracing::debug!(
                        file = %f.name,
                        mime_type = %f.mime_type,
                        bytes = f.byte_size,
                        "Dropping upload candidate"
                    );
                }
                ok
            })
            .collect()
    }
}

impl Default for AcceptPolicy {
    fn default() -> Self {
        Self::from_config(&SimulatorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: u64 = 104_857_600;

    #[test]
    fn test_admits_each_allowed_type() {
        let policy = AcceptPolicy::default();
        for mime in ["video/mp4", "video/avi", "video/mov", "image/jpeg", "image/png"] {
            assert!(policy.admits(&CandidateFile::new("f", mime, 1)), "{mime}");
        }
    }

    #[test]
    fn test_rejects_other_types() {
        let policy = AcceptPolicy::default();
        for mime in ["video/quicktime", "image/gif", "application/pdf", "", "VIDEO/MP4"] {
            assert!(!policy.admits(&CandidateFile::new("f", mime, 1)), "{mime}");
        }
    }

    #[test]
    fn test_size_boundary() {
        let policy = AcceptPolicy::default();
        assert!(policy.admits(&CandidateFile::new("f", "video/mp4", LIMIT)));
        assert!(!policy.admits(&CandidateFile::new("f", "video/mp4", LIMIT + 1)));
        assert!(policy.admits(&CandidateFile::new("f", "video/mp4", 0)));
    }

    #[test]
    fn test_filter_keeps_arrival_order() {
        let policy = AcceptPolicy::default();
        let files = vec![
            CandidateFile::new("b.png", "image/png", 10),
            CandidateFile::new("notes.txt", "text/plain", 10),
            CandidateFile::new("a.mp4", "video/mp4", 10),
            CandidateFile::new("huge.mp4", "video/mp4", LIMIT + 1),
        ];

        let names: Vec<&str> = policy.filter(&files).iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b.png", "a.mp4"]);
    }
}
