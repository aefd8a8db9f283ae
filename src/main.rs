use clap::Parser;
use tracing_subscriber::EnvFilter;

use image_converter::cli::{Cli, Commands, HistoryAction};
use image_converter::commands;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_thread_ids(false)   // Remove thread IDs
        .with_thread_names(false) // Remove thread names
        .with_target(false)       // Remove module path
        .with_ansi(true)          // Keep colored output
        .with_writer(std::io::stderr) // Keep stdout clean for command output
        .compact();               // Use compact formatter instead of pretty

    subscriber.init();

    let cli = Cli::parse();
    let history_path = cli
        .history_file
        .unwrap_or_else(commands::default_history_path);

    match cli.command {
        Commands::Convert {
            files,
            format,
            quality,
            output,
            separate,
        } => commands::convert::run(files, format, quality, output, separate, history_path).await,
        Commands::History { action } => match action {
            HistoryAction::List => {
                commands::history::list(history_path);
                Ok(())
            }
            HistoryAction::Remove { id } => commands::history::remove(history_path, id),
            HistoryAction::Clear => {
                commands::history::clear(history_path);
                Ok(())
            }
        },
    }
}
