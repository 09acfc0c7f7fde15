//! Display helpers: grouping by grocery store, filtering, summaries
//!
//! Nothing here mutates a list. Values are recomputed from the current
//! snapshot every time something is shown.

use super::model::{SavedShoppingList, ShoppingListItem};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Label used for items with no store set
pub const UNASSIGNED_STORE: &str = "Other";

/// Which items to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemFilter {
    #[default]
    All,
    /// Not yet purchased
    Pending,
    Purchased,
}

impl ItemFilter {
    pub fn matches(self, item: &ShoppingListItem) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !item.purchased,
            Self::Purchased => item.purchased,
        }
    }
}

/// Items bought at one store, in list order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreGroup<'a> {
    pub store: &'a str,
    pub items: Vec<&'a ShoppingListItem>,
    pub subtotal: f64,
}

/// Store an item is shown under; blank names become [`UNASSIGNED_STORE`]
pub fn store_label(item: &ShoppingListItem) -> &str {
    match item.store.trim() {
        "" => UNASSIGNED_STORE,
        store => store,
    }
}

/// Items of `items` that pass `filter`, in order
pub fn filter_items(items: &[ShoppingListItem], filter: ItemFilter) -> Vec<&ShoppingListItem> {
    items.iter().filter(|item| filter.matches(item)).collect()
}

/// Group items by store
///
/// Groups appear in the order their store is first seen; items keep their
/// relative order inside a group. Blank store names fall under
/// [`UNASSIGNED_STORE`].
///
/// # Examples
///
/// ```
/// use ezeatin::shopping::{group_by_store, ItemDraft};
///
/// let items = vec![
///     ItemDraft::new("Milk").with_store("Kroger").with_price(4.5).into_item(),
///     ItemDraft::new("Paper towels").with_store("Costco").with_price(20.0).into_item(),
///     ItemDraft::new("Bread").with_store("Kroger").with_price(3.0).into_item(),
/// ];
/// let groups = group_by_store(&items);
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].store, "Kroger");
/// assert_eq!(groups[0].subtotal, 7.5);
/// ```
pub fn group_by_store<'a, I>(items: I) -> Vec<StoreGroup<'a>>
where
    I: IntoIterator<Item = &'a ShoppingListItem>,
{
    let mut groups: Vec<StoreGroup<'a>> = Vec::new();
    for item in items {
        let store = store_label(item);
        match groups.iter_mut().find(|group| group.store == store) {
            Some(group) => {
                group.items.push(item);
                group.subtotal += item.estimated_price;
            }
            None => groups.push(StoreGroup {
                store,
                items: vec![item],
                subtotal: item.estimated_price,
            }),
        }
    }
    groups
}

/// One-line overview of a list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSummary {
    pub id: String,
    pub name: String,
    pub item_count: usize,
    pub purchased_count: usize,
    pub total_cost: f64,
    pub updated_at: DateTime<Utc>,
}

impl ListSummary {
    pub fn of(list: &SavedShoppingList) -> Self {
        Self {
            id: list.id.clone(),
            name: list.name.clone(),
            item_count: list.items.len(),
            purchased_count: list.purchased_count(),
            total_cost: list.total_cost(),
            updated_at: list.updated_at,
        }
    }
}

/// Format an amount with two decimals, e.g. `$4.50`
pub fn format_price(amount: f64, currency_symbol: &str) -> String {
    format!("{}{:.2}", currency_symbol, amount)
}
