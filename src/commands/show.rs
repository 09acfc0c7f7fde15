use super::open_store;
use crate::config::Config;
use crate::error::Result;
use crate::shopping::{
    filter_items, format_price, group_by_store, store_label, ItemFilter, ListSummary,
    ShoppingListItem,
};
use colored::Colorize;
use prettytable::{format, Table};
use serde::Serialize;

/// Options for `show`
#[derive(Debug, Clone, Default)]
pub struct ShowArgs {
    pub store: Option<String>,
    pub filter: ItemFilter,
    pub json: bool,
}

#[derive(Serialize)]
struct ShowOutput<'a> {
    list: ListSummary,
    items: Vec<&'a ShoppingListItem>,
}

/// Print the current list
pub fn run_show(config: &Config, args: ShowArgs) -> Result<()> {
    let store = open_store(config)?;
    let list = store.current();
    let symbol = &config.display.currency_symbol;

    let mut items = filter_items(&list.items, args.filter);
    if let Some(shop) = &args.store {
        let wanted = shop.trim().to_lowercase();
        items.retain(|item| store_label(item).to_lowercase() == wanted);
    }

    if args.json {
        let output = ShowOutput {
            list: ListSummary::of(list),
            items,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("\n{}", list.name.bold());
    if items.is_empty() {
        println!("{}", "No items to show.".yellow());
    } else if config.display.group_by_store {
        for group in group_by_store(items) {
            println!(
                "\n{} ({})",
                group.store.cyan().bold(),
                format_price(group.subtotal, symbol)
            );
            print_items(&group.items, symbol);
        }
    } else {
        print_items(&items, symbol);
    }

    println!();
    println!(
        "{} of {} purchased, estimated total {}",
        list.purchased_count(),
        list.items.len(),
        format_price(list.total_cost(), symbol).bold()
    );
    println!();
    Ok(())
}

fn print_items(items: &[&ShoppingListItem], symbol: &str) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);

    for item in items {
        let check = if item.purchased { "[x]" } else { "[ ]" };
        table.add_row(prettytable::row![
            check,
            item.name,
            format!("{} {}", item.quantity, item.unit),
            item.category,
            format_price(item.estimated_price, symbol),
            item.id.dimmed()
        ]);
    }

    table.printstd();
}
