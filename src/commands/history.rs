//! History subcommands: list, remove, clear.

use std::path::PathBuf;

use anyhow::bail;
use uuid::Uuid;

use crate::history::HistoryStore;

pub fn list(history_path: PathBuf) {
    let store = HistoryStore::load(history_path);
    if store.records().is_empty() {
        println!("No conversion history.");
        return;
    }

    for record in store.records() {
        println!(
            "{}  {}  {} → {}  [{}]  {} → {}",
            record.id,
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            record.original_name,
            record.converted_name,
            record.format,
            record.original_size,
            record.converted_size,
        );
    }
}

pub fn remove(history_path: PathBuf, id: Uuid) -> anyhow::Result<()> {
    let mut store = HistoryStore::load(history_path);
    if !store.remove(id) {
        bail!("no history record with id {id}");
    }
    println!("Removed {id}.");
    Ok(())
}

pub fn clear(history_path: PathBuf) {
    let mut store = HistoryStore::load(history_path);
    store.clear_all();
    println!("History cleared.");
}
