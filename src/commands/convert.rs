//! The convert command: intake, bulk conversion, export.

use std::path::PathBuf;

use anyhow::bail;
use tracing::{info, warn};

use crate::convert::RasterConverter;
use crate::core::{ConversionQueue, LogSink, SourceFile};
use crate::export::{self, ExportItem};
use crate::history::HistoryStore;
use crate::utils::{OutputFormat, mime};

/// Reads the input files, converts everything, and exports the results.
///
/// Unreadable and non-image files are skipped with a per-file warning; per-entry conversion
/// failures are reported but do not stop the run. The command fails only when
/// nothing could be exported or when some conversions failed (non-zero exit
/// for scripting).
pub async fn run(
    files: Vec<PathBuf>,
    format: OutputFormat,
    quality: Option<u8>,
    output_dir: PathBuf,
    separate: bool,
    history_path: PathBuf,
) -> anyhow::Result<()> {
    let quality = quality.unwrap_or_else(|| format.default_quality());
    if !format.validate_quality(quality) {
        bail!("quality {quality} is out of range for {format}");
    }

    let sink = LogSink;
    let mut history = HistoryStore::load(history_path);
    let mut queue = ConversionQueue::new();

    let mut sources = Vec::with_capacity(files.len());
    let mut unreadable = 0usize;
    for path in &files {
        // An unreadable input is a per-file problem, not a reason to abandon
        // the rest of the batch.
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Skipping {}: {e}", path.display());
                unreadable += 1;
                continue;
            }
        };
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        sources.push(SourceFile::new(name, mime::from_path(path), bytes));
    }

    let intake = queue.enqueue(sources, &sink);
    if queue.is_empty() {
        bail!(
            "no image files accepted ({} rejected, {} unreadable)",
            intake.rejected,
            unreadable
        );
    }

    info!(
        "Converting {} of {} files to {format} (quality {quality})",
        queue.len(),
        intake.accepted + intake.rejected + unreadable
    );

    let report = queue
        .convert_all(format, quality, &RasterConverter, &mut history, &sink)
        .await;

    let items: Vec<ExportItem> = queue
        .entries()
        .filter_map(|entry| entry.result())
        .map(|output| ExportItem {
            name: output.file_name.clone(),
            bytes: output.bytes.clone(),
        })
        .collect();

    if items.is_empty() {
        bail!("every conversion failed; nothing to export");
    }

    if separate {
        for item in &items {
            export::export_single(&output_dir, &item.name, &item.bytes)?;
        }
        info!("Wrote {} files to {}", items.len(), output_dir.display());
    } else {
        let path = export::export_completed(&output_dir, &items)?;
        info!("Wrote {}", path.display());
    }

    if report.failed > 0 {
        bail!(
            "{} of {} conversions failed",
            report.failed,
            report.completed + report.failed
        );
    }
    Ok(())
}
