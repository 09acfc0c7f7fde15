use super::{notify_rejected, open_store};
use crate::cli::ItemCommand;
use crate::config::Config;
use crate::error::Result;
use crate::shopping::{format_price, ItemDraft};
use colored::Colorize;

/// Handle `items` subcommands against the current list
pub fn handle_items(config: &Config, command: ItemCommand) -> Result<()> {
    let mut store = open_store(config)?;
    let symbol = &config.display.currency_symbol;

    match command {
        ItemCommand::Add {
            name,
            quantity,
            unit,
            price,
            store: shop,
            category,
        } => {
            let draft = ItemDraft::new(name)
                .with_quantity(quantity)
                .with_unit(unit.unwrap_or_else(|| config.items.unit.clone()))
                .with_price(price.unwrap_or(0.0))
                .with_store(shop.unwrap_or_else(|| config.items.store.clone()))
                .with_category(category.unwrap_or_else(|| config.items.category.clone()));

            if let Some(id) = notify_rejected(store.add_item(draft))? {
                println!("{}", format!("Added item {}", id).green());
                println!("Total: {}", format_price(store.total_cost(), symbol));
            }
        }
        ItemCommand::Remove { id } => match store.remove_item(&id)? {
            Some(item) => {
                println!("{}", format!("Removed \"{}\"", item.name).green());
                println!("Total: {}", format_price(store.total_cost(), symbol));
            }
            None => println!("{}", format!("No item with id {}", id).yellow()),
        },
        ItemCommand::Toggle { id } => match store.toggle_purchased(&id)? {
            Some(true) => println!("{}", format!("Marked {} as purchased", id).green()),
            Some(false) => println!("{}", format!("Marked {} as not purchased", id).green()),
            None => println!("{}", format!("No item with id {}", id).yellow()),
        },
        ItemCommand::Clear => {
            let removed = store.clear_list()?;
            println!(
                "{}",
                format!(
                    "Removed {} items from \"{}\"",
                    removed,
                    store.current().name
                )
                .green()
            );
        }
    }

    Ok(())
}
