//! EZ Eatin' - shopping list CLI
//!
#![doc = "Main entry point for the ezeatin shopping list application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ezeatin::cli::{Cli, Commands};
use ezeatin::commands;
use ezeatin::commands::show::ShowArgs;
use ezeatin::config::Config;
use ezeatin::shopping::ItemFilter;

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    match cli.command {
        Commands::Show {
            store,
            pending,
            purchased,
            json,
        } => {
            let filter = if pending {
                ItemFilter::Pending
            } else if purchased {
                ItemFilter::Purchased
            } else {
                ItemFilter::All
            };
            commands::show::run_show(
                &config,
                ShowArgs {
                    store,
                    filter,
                    json,
                },
            )
        }
        Commands::Lists { command } => {
            tracing::debug!(?command, "Running list command");
            commands::lists::handle_lists(&config, command)
        }
        Commands::Items { command } => {
            tracing::debug!(?command, "Running item command");
            commands::items::handle_items(&config, command)
        }
        Commands::Schema => commands::schema::run_schema(&config),
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so command output stays machine readable.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "ezeatin=debug" } else { "ezeatin=warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
