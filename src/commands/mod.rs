//! CLI command handlers.

pub mod convert;
pub mod history;

use std::path::PathBuf;

/// Default location of the persisted history file.
pub fn default_history_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("image-converter")
        .join("history.json")
}
