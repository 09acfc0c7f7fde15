//! Multi-list shopping list management
//!
//! - `model`: list and item records, drafts, id generation
//! - `store`: the [`ListStore`] session context and loading
//! - `lists`: create, rename, duplicate, delete
//! - `items`: add, remove, toggle, clear, totals
//! - `view`: grouping and filtering for display

pub mod items;
pub mod lists;
pub mod model;
pub mod store;
pub mod view;

pub use model::{
    ItemDraft, SavedShoppingList, ShoppingListItem, CATEGORY_SUGGESTIONS, DEFAULT_LIST_NAME,
    STORE_SUGGESTIONS, UNIT_SUGGESTIONS,
};
pub use store::{ListLookup, ListStore};
pub use view::{
    filter_items, format_price, group_by_store, store_label, ItemFilter, ListSummary, StoreGroup,
};
