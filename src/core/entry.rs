//! Queue entry definition and status transitions.

use std::sync::Arc;
use uuid::Uuid;

use crate::utils::mime;

/// One user-supplied input file: name, declared media type, and bytes.
///
/// Bytes are reference-counted so an in-flight conversion can keep working on
/// them after the entry itself is removed from the queue.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Arc<[u8]>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Size of the input in bytes
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Intake rule: declared media type must start with `image/`.
    pub fn is_image(&self) -> bool {
        mime::is_image_media_type(&self.media_type)
    }
}

/// Result of a successful conversion.
///
/// `media_type` is always the target format's canonical media type, not
/// whatever the encoder reported. The bytes are shared with any history
/// record that keeps a re-download reference.
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    pub file_name: String,
    pub media_type: &'static str,
    pub bytes: Arc<[u8]>,
}

impl ConversionOutput {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Per-entry conversion status.
///
/// The success payload lives in `Completed` and the failure message in
/// `Errored`, so exactly one of result/error can exist at a time.
#[derive(Debug, Clone)]
pub enum EntryStatus {
    Pending,
    Converting,
    Completed(ConversionOutput),
    Errored(String),
}

impl EntryStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn is_errored(&self) -> bool {
        matches!(self, Self::Errored(_))
    }
}

/// One queued file and its conversion status.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub id: Uuid,
    pub source: SourceFile,
    pub status: EntryStatus,
}

impl FileEntry {
    /// Creates a new pending entry with a fresh id.
    pub fn new(source: SourceFile) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            status: EntryStatus::Pending,
        }
    }

    /// The completed output, if this entry has one.
    pub fn result(&self) -> Option<&ConversionOutput> {
        match &self.status {
            EntryStatus::Completed(output) => Some(output),
            _ => None,
        }
    }

    /// The failure message, if this entry errored.
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            EntryStatus::Errored(msg) => Some(msg),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entry_is_pending() {
        let entry = FileEntry::new(SourceFile::new("a.png", "image/png", vec![1, 2, 3]));
        assert!(matches!(entry.status, EntryStatus::Pending));
        assert!(entry.result().is_none());
        assert!(entry.error().is_none());
        assert_eq!(entry.source.size(), 3);
    }

    #[test]
    fn result_and_error_follow_status() {
        let mut entry = FileEntry::new(SourceFile::new("a.png", "image/png", vec![]));
        entry.status = EntryStatus::Errored("boom".into());
        assert_eq!(entry.error(), Some("boom"));
        assert!(entry.result().is_none());

        entry.status = EntryStatus::Completed(ConversionOutput {
            file_name: "a.webp".into(),
            media_type: "image/webp",
            bytes: vec![9].into(),
        });
        assert!(entry.error().is_none());
        assert_eq!(entry.result().map(|o| o.size()), Some(1));
    }

    #[test]
    fn intake_rule_uses_declared_media_type() {
        assert!(SourceFile::new("a", "image/png", vec![]).is_image());
        assert!(!SourceFile::new("a.png", "text/plain", vec![]).is_image());
    }
}
