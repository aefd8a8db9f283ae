//! Core queue types and state machine.
//!
//! - [`FileEntry`] / [`EntryStatus`]: one queued file and its status
//! - [`ConversionQueue`]: enqueue, convert, remove; the state machine
//! - [`SingleFlight`]: the bulk-pass guard
//! - [`EventSink`] / [`Notice`]: the notification seam

mod entry;
pub mod events;
mod guard;
mod queue;

pub use entry::{ConversionOutput, EntryStatus, FileEntry, SourceFile};
pub use events::{EventSink, LogSink, Notice};
pub use guard::{FlightPermit, SingleFlight};
pub use queue::{BulkReport, ConversionQueue, ConvertOutcome, IntakeReport};
