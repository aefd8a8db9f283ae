//! The conversion queue state machine.
//!
//! Entries move `Pending → Converting → Completed | Errored`. Entries are
//! kept in an insertion-ordered map keyed by id, so removal and result
//! application never go through a positional index.

use std::sync::Arc;
use indexmap::IndexMap;
use tracing::debug;
use uuid::Uuid;

use crate::convert::Converter;
use crate::core::entry::{ConversionOutput, EntryStatus, FileEntry, SourceFile};
use crate::core::events::{EventSink, Notice};
use crate::core::guard::SingleFlight;
use crate::history::HistoryStore;
use crate::utils::{ConverterResult, OutputFormat, derive_output_name};

/// Outcome of a single-entry conversion attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertOutcome {
    /// Entry reached `Completed`
    Converted,
    /// Entry reached `Errored`
    Failed,
    /// Entry was already `Converting` or `Completed`; nothing was done
    Skipped,
    /// No entry with that id exists
    Missing,
    /// The entry was removed while its conversion ran; the result was dropped
    Discarded,
}

/// Counts from one bulk pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkReport {
    /// False when another bulk pass already held the guard
    pub started: bool,
    pub completed: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Counts from one intake batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntakeReport {
    pub accepted: usize,
    pub rejected: usize,
}

/// Ordered collection of file entries plus the bulk-pass guard.
pub struct ConversionQueue {
    entries: IndexMap<Uuid, FileEntry>,
    guard: Arc<SingleFlight>,
}

impl Default for ConversionQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversionQueue {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            guard: SingleFlight::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.values()
    }

    pub fn get(&self, id: Uuid) -> Option<&FileEntry> {
        self.entries.get(&id)
    }

    /// The single-flight guard, exposed so a host can observe bulk activity.
    pub fn bulk_guard(&self) -> &Arc<SingleFlight> {
        &self.guard
    }

    /// Validates and appends a batch of candidate files.
    ///
    /// Candidates whose declared media type is not `image/*` produce one
    /// rejection notice each and no entry. Accepted files become `Pending`
    /// entries appended in batch order; existing entries are untouched.
    pub fn enqueue(&mut self, files: Vec<SourceFile>, sink: &dyn EventSink) -> IntakeReport {
        let mut report = IntakeReport::default();
        for file in files {
            if !file.is_image() {
                sink.notify(Notice::FileRejected {
                    name: file.name.clone(),
                    media_type: file.media_type.clone(),
                });
                report.rejected += 1;
                continue;
            }
            let entry = FileEntry::new(file);
            self.entries.insert(entry.id, entry);
            report.accepted += 1;
        }
        report
    }

    /// Removes an entry, dropping its source and output buffers.
    ///
    /// An in-flight conversion for the id keeps running on its own reference
    /// to the source bytes; its result is discarded at apply time.
    pub fn remove_entry(&mut self, id: Uuid) -> bool {
        self.entries.shift_remove(&id).is_some()
    }

    /// Converts a single entry to `format`.
    ///
    /// No-op when the entry is already `Converting` or `Completed`. `Errored`
    /// entries are retried. On success the entry owns the output and a
    /// history record is appended; on failure the error message is captured
    /// on the entry. Either way the failure never propagates to the caller.
    pub async fn convert_one(
        &mut self,
        id: Uuid,
        format: OutputFormat,
        quality: u8,
        converter: &dyn Converter,
        history: &mut HistoryStore,
        sink: &dyn EventSink,
    ) -> ConvertOutcome {
        let Some(bytes) = self.begin_convert(id) else {
            return match self.entries.get(&id) {
                Some(_) => ConvertOutcome::Skipped,
                None => ConvertOutcome::Missing,
            };
        };

        let result = converter.convert(bytes, format, quality).await;
        self.apply_outcome(id, format, result, history, sink)
    }

    /// Marks an entry `Converting` and hands out its source bytes.
    ///
    /// Returns `None` for missing entries and for entries already
    /// `Converting` or `Completed`.
    pub fn begin_convert(&mut self, id: Uuid) -> Option<Arc<[u8]>> {
        let entry = self.entries.get_mut(&id)?;
        if matches!(
            entry.status,
            EntryStatus::Converting | EntryStatus::Completed(_)
        ) {
            return None;
        }
        entry.status = EntryStatus::Converting;
        Some(entry.source.bytes.clone())
    }

    /// Applies a settled conversion result to the entry that requested it.
    ///
    /// Lookup is by id: if the entry was removed while the conversion ran,
    /// the result is dropped here and no other entry is touched.
    pub fn apply_outcome(
        &mut self,
        id: Uuid,
        format: OutputFormat,
        result: ConverterResult<Arc<[u8]>>,
        history: &mut HistoryStore,
        sink: &dyn EventSink,
    ) -> ConvertOutcome {
        let Some(entry) = self.entries.get_mut(&id) else {
            debug!("discarding conversion result for removed entry {id}");
            return ConvertOutcome::Discarded;
        };

        match result {
            Ok(bytes) => {
                let output = ConversionOutput {
                    file_name: derive_output_name(&entry.source.name, format),
                    media_type: format.media_type(),
                    bytes,
                };
                history.record_success(&entry.source, &output, format);
                sink.notify(Notice::ConversionCompleted {
                    name: entry.source.name.clone(),
                    output_name: output.file_name.clone(),
                    original_size: entry.source.size(),
                    converted_size: output.size(),
                });
                entry.status = EntryStatus::Completed(output);
                ConvertOutcome::Converted
            }
            Err(err) => {
                let message = err.to_string();
                sink.notify(Notice::ConversionFailed {
                    name: entry.source.name.clone(),
                    error: message.clone(),
                });
                entry.status = EntryStatus::Errored(message);
                ConvertOutcome::Failed
            }
        }
    }

    /// Converts every non-completed entry, strictly in queue order.
    ///
    /// At most one bulk pass runs at a time: a second call while one is
    /// active returns a report with `started == false` and does nothing.
    /// Entry N+1 starts only after entry N settles, and one entry's failure
    /// never stops the pass. The guard is released on every exit path.
    pub async fn convert_all(
        &mut self,
        format: OutputFormat,
        quality: u8,
        converter: &dyn Converter,
        history: &mut HistoryStore,
        sink: &dyn EventSink,
    ) -> BulkReport {
        let Some(_permit) = SingleFlight::try_acquire(&self.guard) else {
            debug!("bulk conversion already running, ignoring request");
            return BulkReport::default();
        };

        let ids: Vec<Uuid> = self.entries.keys().copied().collect();
        let mut report = BulkReport {
            started: true,
            ..BulkReport::default()
        };

        for id in ids {
            match self
                .convert_one(id, format, quality, converter, history, sink)
                .await
            {
                ConvertOutcome::Converted => report.completed += 1,
                ConvertOutcome::Failed => report.failed += 1,
                ConvertOutcome::Skipped => report.skipped += 1,
                ConvertOutcome::Missing | ConvertOutcome::Discarded => {}
            }
        }

        sink.notify(Notice::BulkFinished {
            completed: report.completed,
            failed: report.failed,
            skipped: report.skipped,
        });
        report
    }
}
