// Module declarations in dependency order
pub mod utils;
pub mod core;
pub mod convert;
pub mod history;
pub mod export;
pub mod cli;
pub mod commands;

// Public exports for external consumers
pub use crate::core::{
    BulkReport, ConversionOutput, ConversionQueue, ConvertOutcome, EntryStatus, EventSink,
    FileEntry, IntakeReport, LogSink, Notice, SingleFlight, SourceFile,
};
pub use crate::convert::{Converter, RasterConverter};
pub use crate::export::{ARCHIVE_NAME, ExportItem, export_completed};
pub use crate::history::{HistoryRecord, HistoryStore};
pub use crate::utils::{ConverterError, ConverterResult, OutputFormat};

// This library file is used as a public API for consuming this crate as a library.
// The actual application entry point is in main.rs.
