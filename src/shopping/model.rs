//! Shopping list records
//!
//! These are the only shapes that cross the persistence boundary. Field
//! names serialize in camelCase so the stored JSON matches the layout the
//! web app has always written.

use crate::error::{EzEatinError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use ulid::Ulid;
use uuid::Uuid;

/// Name given to the list created on first run and to migrated legacy lists
pub const DEFAULT_LIST_NAME: &str = "My Shopping List";

/// Suffix appended to the name of a duplicated list
pub const COPY_SUFFIX: &str = " (Copy)";

/// Unit suggestions offered by the add-item form (not enforced)
pub const UNIT_SUGGESTIONS: &[&str] = &[
    "pcs", "lbs", "oz", "kg", "g", "gal", "qt", "L", "dozen", "pack", "bag", "box", "can",
    "bottle", "bunch",
];

/// Grocery store suggestions (not enforced)
pub const STORE_SUGGESTIONS: &[&str] = &[
    "Walmart",
    "Kroger",
    "Target",
    "Costco",
    "Whole Foods",
    "Trader Joe's",
    "Aldi",
    "Safeway",
    "Publix",
    "Other",
];

/// Category suggestions (not enforced)
pub const CATEGORY_SUGGESTIONS: &[&str] = &[
    "produce",
    "dairy",
    "meat",
    "seafood",
    "bakery",
    "pantry",
    "frozen",
    "beverages",
    "snacks",
    "household",
    "other",
];

/// A single line on a shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItem {
    /// Unique item identifier
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// What to buy
    pub name: String,
    /// How many units to buy
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    /// Free-text unit, usually one of [`UNIT_SUGGESTIONS`]
    #[serde(default)]
    pub unit: String,
    /// Expected cost of the whole line
    #[serde(default)]
    pub estimated_price: f64,
    /// Grocery store to buy it at, used for grouping
    #[serde(default)]
    pub store: String,
    /// Aisle-style category
    #[serde(default)]
    pub category: String,
    /// Whether the item has been picked up
    #[serde(default)]
    pub purchased: bool,
}

fn default_quantity() -> f64 {
    1.0
}

/// A named shopping list
///
/// # Examples
///
/// ```
/// use ezeatin::shopping::SavedShoppingList;
///
/// let list = SavedShoppingList::new("Weekly groceries");
/// assert_eq!(list.name, "Weekly groceries");
/// assert!(list.items.is_empty());
/// assert_eq!(list.total_cost(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedShoppingList {
    /// Unique list identifier (ULID, so ids sort by creation time)
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// User-facing label
    pub name: String,
    /// Items in display order
    #[serde(default)]
    pub items: Vec<ShoppingListItem>,
    /// When the list was created
    pub created_at: DateTime<Utc>,
    /// When the list or any of its items last changed
    pub updated_at: DateTime<Utc>,
}

impl SavedShoppingList {
    /// Create an empty list with a fresh id
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: new_list_id(),
            name: name.into(),
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a list that starts out holding `items`
    pub fn with_items(name: impl Into<String>, items: Vec<ShoppingListItem>) -> Self {
        Self {
            items,
            ..Self::new(name)
        }
    }

    /// Sum of estimated prices over every item, purchased or not
    pub fn total_cost(&self) -> f64 {
        self.items.iter().map(|item| item.estimated_price).sum()
    }

    /// Number of items marked as purchased
    pub fn purchased_count(&self) -> usize {
        self.items.iter().filter(|item| item.purchased).count()
    }

    /// Find an item by id
    pub fn item(&self, item_id: &str) -> Option<&ShoppingListItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// Copy of this list with a new id, fresh item ids, and a " (Copy)" name
    pub fn duplicate(&self) -> Self {
        let items = self
            .items
            .iter()
            .map(|item| ShoppingListItem {
                id: new_item_id(),
                ..item.clone()
            })
            .collect();
        Self::with_items(format!("{}{}", self.name, COPY_SUFFIX), items)
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Payload of the add-item form
///
/// # Examples
///
/// ```
/// use ezeatin::shopping::ItemDraft;
///
/// let draft = ItemDraft::new("Milk")
///     .with_quantity(1.0)
///     .with_unit("gal")
///     .with_price(4.5)
///     .with_store("Kroger")
///     .with_category("dairy");
/// assert!(draft.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub estimated_price: f64,
    pub store: String,
    pub category: String,
}

impl ItemDraft {
    /// Start a draft for one piece of `name` with no price
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: 1.0,
            unit: "pcs".to_string(),
            estimated_price: 0.0,
            store: "Other".to_string(),
            category: "other".to_string(),
        }
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_price(mut self, estimated_price: f64) -> Self {
        self.estimated_price = estimated_price;
        self
    }

    pub fn with_store(mut self, store: impl Into<String>) -> Self {
        self.store = store.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Check the form rules: non-empty name, positive quantity, non-negative price
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;

        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err(EzEatinError::InvalidQuantity(self.quantity).into());
        }

        if !self.estimated_price.is_finite() || self.estimated_price < 0.0 {
            return Err(EzEatinError::InvalidPrice(self.estimated_price).into());
        }

        Ok(())
    }

    /// Turn the draft into an unpurchased item with a fresh id
    ///
    /// Does not validate; call [`ItemDraft::validate`] first.
    pub fn into_item(self) -> ShoppingListItem {
        ShoppingListItem {
            id: new_item_id(),
            name: self.name.trim().to_string(),
            quantity: self.quantity,
            unit: self.unit,
            estimated_price: self.estimated_price,
            store: self.store,
            category: self.category,
            purchased: false,
        }
    }
}

/// Trim `name` and reject it if nothing is left
pub fn validate_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(EzEatinError::EmptyName.into());
    }
    Ok(trimmed)
}

/// Generate a new list id
pub fn new_list_id() -> String {
    Ulid::new().to_string()
}

/// Generate a new item id
pub fn new_item_id() -> String {
    Uuid::new_v4().to_string()
}

/// Accept ids written as JSON strings or, by older app builds, as numbers
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}
