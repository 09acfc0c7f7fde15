//! Command-line interface definition for EZ Eatin'
//!
//! This module defines the CLI structure using clap's derive API. Each
//! invocation performs a single list or item operation.

use crate::config::StorageBackend;
use crate::shopping::{CATEGORY_SUGGESTIONS, STORE_SUGGESTIONS, UNIT_SUGGESTIONS};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// EZ Eatin' - shopping lists for your meal plan
///
/// Keep several named shopping lists, add items with prices and stores,
/// and check them off as you shop.
#[derive(Parser, Debug, Clone)]
#[command(name = "ezeatin")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the database location
    #[arg(long)]
    pub db_path: Option<PathBuf>,

    /// Override the storage backend
    #[arg(long, value_enum)]
    pub backend: Option<StorageBackend>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show the current list
    Show {
        /// Only show items from this store
        #[arg(short, long)]
        store: Option<String>,

        /// Only show items not yet purchased
        #[arg(long, conflicts_with = "purchased")]
        pending: bool,

        /// Only show purchased items
        #[arg(long)]
        purchased: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Manage shopping lists
    Lists {
        #[command(subcommand)]
        command: ListCommand,
    },

    /// Manage items on the current list
    Items {
        #[command(subcommand)]
        command: ItemCommand,
    },

    /// Show the storage schema version and run pending migrations
    Schema,
}

/// List management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ListCommand {
    /// Show all lists
    Show {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Create a new list and switch to it
    Create {
        /// Name of the new list
        name: String,
    },

    /// Rename the current list
    Rename {
        /// New name
        name: String,
    },

    /// Copy the current list (stays on the current list)
    Duplicate,

    /// Delete the current list
    Delete,

    /// Switch the current list
    Select {
        /// List id, id prefix, or name
        list: String,
    },
}

/// Item subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ItemCommand {
    /// Add an item to the current list
    Add {
        /// Item name
        name: String,

        /// Quantity to buy
        #[arg(short, long, default_value_t = 1.0, allow_negative_numbers = true)]
        quantity: f64,

        /// Unit (pcs, lbs, gal, ...)
        #[arg(short, long, long_help = suggestion_help("Unit", UNIT_SUGGESTIONS))]
        unit: Option<String>,

        /// Estimated price of the line
        #[arg(short, long, allow_negative_numbers = true)]
        price: Option<f64>,

        /// Store to buy it at
        #[arg(short, long, long_help = suggestion_help("Store to buy it at", STORE_SUGGESTIONS))]
        store: Option<String>,

        /// Category (produce, dairy, ...)
        #[arg(
            short = 'C',
            long,
            long_help = suggestion_help("Category", CATEGORY_SUGGESTIONS)
        )]
        category: Option<String>,
    },

    /// Remove an item from the current list
    Remove {
        /// Item id
        id: String,
    },

    /// Mark an item purchased, or unmark it
    Toggle {
        /// Item id
        id: String,
    },

    /// Remove every item from the current list
    Clear,
}

/// Long help for a free-text field that lists common values without
/// restricting input to them
fn suggestion_help(label: &str, suggestions: &[&str]) -> String {
    format!(
        "{}\n\nCommon values: {}\nAny other value is accepted.",
        label,
        suggestions.join(", ")
    )
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            db_path: None,
            backend: None,
            command: Commands::Show {
                store: None,
                pending: false,
                purchased: false,
                json: false,
            },
        }
    }
}
