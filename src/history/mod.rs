//! Persisted conversion history.
//!
//! Each successful conversion appends one metadata record, newest first. The
//! full list is written as JSON after every mutation; byte payloads are never
//! persisted, so after a reload re-download is unavailable and `download` is
//! `None`. History is best-effort: storage failures are logged and swallowed,
//! never surfaced to the conversion path.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::core::{ConversionOutput, SourceFile};
use crate::utils::{OutputFormat, format_size};

/// Metadata about one past successful conversion.
///
/// Records have their own ids; the originating queue entry may be long gone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub id: Uuid,
    pub original_name: String,
    pub converted_name: String,
    pub original_size: String,
    pub converted_size: String,
    pub format: String,
    pub timestamp: DateTime<Utc>,
    /// Output bytes for re-download. Never serialized; absent after a reload.
    #[serde(skip)]
    pub download: Option<Arc<[u8]>>,
}

/// Append-only, newest-first history list persisted under a fixed path.
pub struct HistoryStore {
    records: Vec<HistoryRecord>,
    path: PathBuf,
}

impl HistoryStore {
    /// Loads the history from `path`.
    ///
    /// Absent or malformed data yields an empty list; load never fails.
    pub fn load(path: PathBuf) -> Self {
        let records = match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<Vec<HistoryRecord>>(&bytes) {
                Ok(records) => records,
                Err(e) => {
                    warn!("Ignoring malformed history at {}: {e}", path.display());
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!("Cannot read history at {}: {e}", path.display());
                Vec::new()
            }
        };
        Self { records, path }
    }

    /// Records in newest-first order.
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn get(&self, id: Uuid) -> Option<&HistoryRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Appends a record for a successful conversion and persists.
    ///
    /// The record keeps a second reference to the output bytes so the result
    /// stays re-downloadable while this process lives.
    pub fn record_success(
        &mut self,
        source: &SourceFile,
        output: &ConversionOutput,
        format: OutputFormat,
    ) {
        let record = HistoryRecord {
            id: Uuid::new_v4(),
            original_name: source.name.clone(),
            converted_name: output.file_name.clone(),
            original_size: format_size(source.size()),
            converted_size: format_size(output.size()),
            format: format.label().to_string(),
            timestamp: Utc::now(),
            download: Some(output.bytes.clone()),
        };
        self.records.insert(0, record);
        self.persist();
    }

    /// Removes one record, dropping its download reference.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        let removed = self.records.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    /// Empties the list and erases the storage file entirely, so a later load
    /// goes through the "absent" path rather than parsing an empty array.
    pub fn clear_all(&mut self) {
        self.records.clear();
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Cannot remove history file {}: {e}", self.path.display());
            }
        }
    }

    /// Writes the metadata list to disk. Failures are logged and swallowed.
    fn persist(&self) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("Cannot create history directory {}: {e}", parent.display());
                return;
            }
        }
        match serde_json::to_vec_pretty(&self.records) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    warn!("Cannot write history to {}: {e}", self.path.display());
                } else {
                    debug!("Persisted {} history records", self.records.len());
                }
            }
            Err(e) => warn!("Cannot serialize history: {e}"),
        }
    }
}
