//! Command-line interface definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

use crate::utils::OutputFormat;

/// Batch image converter CLI
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// History storage file (default: under the platform data directory)
    #[arg(long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub history_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert images to a chosen output format
    #[command(visible_alias = "c")]
    Convert {
        /// Input image files
        #[arg(required = true, value_hint = clap::ValueHint::FilePath)]
        files: Vec<PathBuf>,

        /// Target format: webp, avif, jpeg or png
        #[arg(short, long)]
        format: OutputFormat,

        /// Encode quality 1-100 for lossy targets (default depends on format)
        #[arg(short, long)]
        quality: Option<u8>,

        /// Output directory
        #[arg(short, long, default_value = ".", value_hint = clap::ValueHint::DirPath)]
        output: PathBuf,

        /// Write every result as an individual file instead of one archive
        #[arg(long)]
        separate: bool,
    },

    /// Inspect or prune the conversion history
    #[command(visible_alias = "h")]
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

/// History subcommands
#[derive(Subcommand, Debug)]
pub enum HistoryAction {
    /// List recorded conversions, newest first
    List,
    /// Remove one record by id
    Remove { id: Uuid },
    /// Delete every record and the storage file itself
    Clear,
}
