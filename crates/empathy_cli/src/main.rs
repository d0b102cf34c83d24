//! Diagnostic CLI for a slot database.
//!
//! # Responsibility
//! - Verify `empathy_core` linkage without the Flutter runtime.
//! - Print a per-slot summary of a database file when one is given.

use empathy_core::db::migrations::schema_version;
use empathy_core::{AppState, BootstrapOptions, LoadStatus, Slot, SqliteKvStore};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("empathy_core ping={}", empathy_core::ping());
    println!("empathy_core version={}", empathy_core::core_version());

    let Some(path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    let store = match SqliteKvStore::open(&path) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("failed to open {path}: {err}");
            return ExitCode::FAILURE;
        }
    };
    match schema_version(store.connection()) {
        Ok(version) => println!("schema_version={version}"),
        Err(err) => eprintln!("failed to read schema version: {err}"),
    }
    let state = AppState::bootstrap(store, &BootstrapOptions::default());
    let settings = state.settings();
    println!(
        "settings theme={} language={}",
        settings.theme.code(),
        settings.language.code()
    );
    for (slot, status) in state.load_report() {
        println!("slot {:<18} key={} {}", slot.name(), slot.key(), describe(*slot, *status));
    }
    ExitCode::SUCCESS
}

fn describe(slot: Slot, status: LoadStatus) -> String {
    match status {
        LoadStatus::Missing => "absent".to_string(),
        LoadStatus::Loaded(_) if slot == Slot::Settings => "loaded".to_string(),
        LoadStatus::Loaded(count) => format!("items={count}"),
        LoadStatus::Defaulted => "unreadable (reset to default)".to_string(),
    }
}
