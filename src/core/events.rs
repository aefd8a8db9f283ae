//! Notification seam between the queue and whatever front end hosts it.
//!
//! The queue emits a [`Notice`] per user-visible event; the CLI installs a
//! tracing-backed sink, tests install a recording sink.

use tracing::{info, warn};

use crate::utils::format_size;

/// One user-visible notification.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// A candidate file was rejected at intake (not an image media type)
    FileRejected { name: String, media_type: String },
    /// One entry finished converting successfully
    ConversionCompleted {
        name: String,
        output_name: String,
        original_size: u64,
        converted_size: u64,
    },
    /// One entry failed to convert
    ConversionFailed { name: String, error: String },
    /// A bulk pass settled, successes and failures included
    BulkFinished {
        completed: usize,
        failed: usize,
        skipped: usize,
    },
}

/// Fire-and-forget notification sink.
pub trait EventSink: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Sink that routes notices to the log.
pub struct LogSink;

impl EventSink for LogSink {
    fn notify(&self, notice: Notice) {
        match notice {
            Notice::FileRejected { name, media_type } => {
                warn!("Skipping '{name}': {media_type} is not an image media type");
            }
            Notice::ConversionCompleted {
                name,
                output_name,
                original_size,
                converted_size,
            } => {
                info!(
                    "'{name}' → '{output_name}' ({} → {})",
                    format_size(original_size),
                    format_size(converted_size)
                );
            }
            Notice::ConversionFailed { name, error } => {
                warn!("Conversion failed for '{name}': {error}");
            }
            Notice::BulkFinished {
                completed,
                failed,
                skipped,
            } => {
                if failed > 0 {
                    warn!("Bulk pass finished: {completed} converted, {failed} failed, {skipped} skipped");
                } else {
                    info!("Bulk pass finished: {completed} converted, {skipped} skipped");
                }
            }
        }
    }
}
