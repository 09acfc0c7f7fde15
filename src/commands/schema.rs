use super::open_store;
use crate::config::Config;
use crate::error::Result;
use crate::storage::CURRENT_SCHEMA_VERSION;
use colored::Colorize;

/// Open the store, which applies pending migrations, and report what ran
pub fn run_schema(config: &Config) -> Result<()> {
    let store = open_store(config)?;
    let report = store.migration_report();

    println!("Stored schema version: {}", report.from);
    println!("Current schema version: {}", CURRENT_SCHEMA_VERSION);

    if report.is_noop() {
        println!("{}", "Storage is up to date.".green());
    } else {
        for step in &report.applied {
            println!("{}", format!("Applied migration: {}", step).green());
        }
    }

    Ok(())
}
