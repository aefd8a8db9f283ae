//! Export of completed conversions: direct file writes and the bulk archive.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::utils::{ConverterError, ConverterResult};

/// Fixed filename for the bulk-download archive.
pub const ARCHIVE_NAME: &str = "converted-images.zip";

/// One completed result staged for export.
#[derive(Debug, Clone)]
pub struct ExportItem {
    /// Derived output filename
    pub name: String,
    pub bytes: Arc<[u8]>,
}

/// Writes a single result to `dir` under its derived filename.
pub fn export_single(dir: &Path, name: &str, bytes: &[u8]) -> ConverterResult<PathBuf> {
    fs::create_dir_all(dir)
        .map_err(|e| ConverterError::export(format!("cannot create {}: {e}", dir.display())))?;
    let path = dir.join(name);
    fs::write(&path, bytes)
        .map_err(|e| ConverterError::export(format!("cannot write {}: {e}", path.display())))?;
    debug!("Exported {}", path.display());
    Ok(path)
}

/// Exports completed results to `dir`.
///
/// Exactly one result degrades to a direct download; more than one produces
/// a single archive named [`ARCHIVE_NAME`].
pub fn export_completed(dir: &Path, items: &[ExportItem]) -> ConverterResult<PathBuf> {
    match items {
        [] => Err(ConverterError::export("no completed conversions to export")),
        [only] => export_single(dir, &only.name, &only.bytes),
        many => export_archive(dir, many),
    }
}

/// Builds the bulk archive: one entry per item, flat, deflate-compressed.
///
/// The writer is finished before the path is returned, so a caller can never
/// observe a partially built archive.
pub fn export_archive(dir: &Path, items: &[ExportItem]) -> ConverterResult<PathBuf> {
    fs::create_dir_all(dir)
        .map_err(|e| ConverterError::export(format!("cannot create {}: {e}", dir.display())))?;
    let path = dir.join(ARCHIVE_NAME);
    let file = File::create(&path)
        .map_err(|e| ConverterError::export(format!("cannot create {}: {e}", path.display())))?;

    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for item in items {
        zip.start_file(item.name.as_str(), options)?;
        zip.write_all(&item.bytes)
            .map_err(|e| ConverterError::export(format!("cannot write archive entry: {e}")))?;
    }
    zip.finish()?;

    debug!("Exported archive {} ({} entries)", path.display(), items.len());
    Ok(path)
}
