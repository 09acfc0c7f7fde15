use super::{notify_rejected, open_store};
use crate::cli::ListCommand;
use crate::config::Config;
use crate::error::Result;
use crate::shopping::{format_price, ListLookup, ListStore, ListSummary};
use colored::Colorize;
use prettytable::{format, Table};

/// Handle `lists` subcommands
pub fn handle_lists(config: &Config, command: ListCommand) -> Result<()> {
    let mut store = open_store(config)?;

    match command {
        ListCommand::Show { json } => {
            if json {
                let summaries: Vec<ListSummary> =
                    store.lists().iter().map(ListSummary::of).collect();
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                print_lists(&store, &config.display.currency_symbol);
            }
        }
        ListCommand::Create { name } => {
            if let Some(id) = notify_rejected(store.create(&name))? {
                println!(
                    "{}",
                    format!("Created list \"{}\" ({})", store.current().name, id).green()
                );
            }
        }
        ListCommand::Rename { name } => {
            let old = store.current().name.clone();
            if notify_rejected(store.rename(&name))?.is_some() {
                println!(
                    "{}",
                    format!("Renamed \"{}\" to \"{}\"", old, store.current().name).green()
                );
            }
        }
        ListCommand::Duplicate => {
            let id = store.duplicate()?;
            let name = store.get(&id).map(|l| l.name.clone()).unwrap_or_default();
            println!("{}", format!("Created copy \"{}\" ({})", name, id).green());
            println!("Still on \"{}\".", store.current().name);
        }
        ListCommand::Delete => {
            if let Some(removed) = notify_rejected(store.delete())? {
                println!("{}", format!("Deleted list \"{}\"", removed.name).green());
                println!("Now on \"{}\".", store.current().name);
            }
        }
        ListCommand::Select { list } => {
            let (target, candidates) = match store.lookup(&list) {
                ListLookup::Found(found) => (Some(found.id.clone()), Vec::new()),
                ListLookup::Ambiguous(matches) => (
                    None,
                    matches
                        .iter()
                        .map(|l| format!("{} ({})", l.name, l.id))
                        .collect::<Vec<_>>(),
                ),
                ListLookup::Missing => (None, Vec::new()),
            };

            let selected = match &target {
                Some(id) => store.select_current(id)?,
                None => false,
            };
            if selected {
                println!(
                    "{}",
                    format!("Switched to \"{}\"", store.current().name).green()
                );
            } else if !candidates.is_empty() {
                println!(
                    "{}",
                    format!(
                        "\"{}\" matches {} lists, select one by id:",
                        list,
                        candidates.len()
                    )
                    .yellow()
                );
                for candidate in candidates {
                    println!("  {}", candidate);
                }
            } else {
                println!("{}", format!("No list matches \"{}\"", list).yellow());
            }
        }
    }

    Ok(())
}

fn print_lists(store: &ListStore, currency_symbol: &str) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row![
        "",
        "ID".bold(),
        "Name".bold(),
        "Items".bold(),
        "Total".bold(),
        "Last Updated".bold()
    ]);

    for list in store.lists() {
        let summary = ListSummary::of(list);
        let marker = if list.id == store.current_id() { "*" } else { "" };
        table.add_row(prettytable::row![
            marker.green(),
            summary.id.cyan(),
            summary.name,
            format!("{}/{}", summary.purchased_count, summary.item_count),
            format_price(summary.total_cost, currency_symbol),
            summary.updated_at.format("%Y-%m-%d %H:%M").to_string()
        ]);
    }

    println!("\nShopping Lists:");
    table.printstd();
    println!();
}
