//! Versioned list document and its upgrade path
//!
//! Schema history:
//!
//! | version | layout |
//! |---------|--------|
//! | 0 | only `current-shopping-list`: a bare array of items, or nothing at all |
//! | 1 | `shopping-lists`: a bare array of lists |
//! | 2 | `shopping-lists`: `{ "version": 2, "lists": [...] }` |
//!
//! [`run_migrations`] detects the stored version and applies every step
//! between it and [`CURRENT_SCHEMA_VERSION`] in order.

use super::{KeyValueStore, LEGACY_LIST_KEY, SHOPPING_LISTS_KEY};
use crate::error::{EzEatinError, Result};
use crate::shopping::model::{SavedShoppingList, ShoppingListItem, DEFAULT_LIST_NAME};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Schema version written by this build
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

/// The envelope stored under `shopping-lists`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListDocument {
    pub version: u32,
    #[serde(default)]
    pub lists: Vec<SavedShoppingList>,
}

impl ListDocument {
    pub fn new(lists: Vec<SavedShoppingList>) -> Self {
        Self {
            version: CURRENT_SCHEMA_VERSION,
            lists,
        }
    }
}

/// What a call to [`run_migrations`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// Version detected before any step ran
    pub from: u32,
    /// Version after the last step
    pub to: u32,
    /// Names of the steps applied, in order
    pub applied: Vec<&'static str>,
}

impl MigrationReport {
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}

struct Migration {
    from: u32,
    name: &'static str,
    apply: fn(&mut dyn KeyValueStore) -> Result<()>,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        from: 0,
        name: "legacy single list",
        apply: migrate_legacy_single_list,
    },
    Migration {
        from: 1,
        name: "versioned envelope",
        apply: wrap_in_envelope,
    },
];

/// Inspect the stored list document and report its schema version
///
/// A document holding no lists, either an empty bare array or an envelope
/// with an empty `lists`, counts as version 0 so that legacy data is still
/// picked up when the multi-list key exists but holds nothing.
pub fn detect_version(store: &dyn KeyValueStore) -> Result<u32> {
    match store.load(SHOPPING_LISTS_KEY)? {
        None => Ok(0),
        Some(Value::Array(lists)) if lists.is_empty() => Ok(0),
        Some(Value::Array(_)) => Ok(1),
        Some(Value::Object(map)) => {
            let version = map
                .get("version")
                .and_then(Value::as_u64)
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| {
                    EzEatinError::Migration(
                        "list document has no valid version field".to_string(),
                    )
                })?;
            if version <= CURRENT_SCHEMA_VERSION && envelope_is_empty(&map) {
                return Ok(0);
            }
            Ok(version)
        }
        Some(other) => Err(EzEatinError::Migration(format!(
            "unexpected list document type: {}",
            json_type_name(&other)
        ))
        .into()),
    }
}

/// Bring the stored data up to [`CURRENT_SCHEMA_VERSION`]
///
/// # Errors
///
/// Returns `EzEatinError::Migration` if the stored version is newer than
/// this build understands or a step cannot parse what it finds. Backend
/// errors propagate unchanged; steps already applied stay applied.
pub fn run_migrations(store: &mut dyn KeyValueStore) -> Result<MigrationReport> {
    let from = detect_version(store)?;
    if from > CURRENT_SCHEMA_VERSION {
        return Err(EzEatinError::Migration(format!(
            "stored schema version {} is newer than supported version {}",
            from, CURRENT_SCHEMA_VERSION
        ))
        .into());
    }

    let mut version = from;
    let mut applied = Vec::new();
    for migration in MIGRATIONS.iter().filter(|m| m.from >= from) {
        tracing::info!(
            from = migration.from,
            to = migration.from + 1,
            "Applying storage migration: {}",
            migration.name
        );
        (migration.apply)(store)?;
        version = migration.from + 1;
        applied.push(migration.name);
    }

    Ok(MigrationReport {
        from,
        to: version,
        applied,
    })
}

/// Read the current-version document
///
/// A missing key reads as an empty document.
pub fn load_document(store: &dyn KeyValueStore) -> Result<ListDocument> {
    match store.load(SHOPPING_LISTS_KEY)? {
        Some(value) => {
            let document: ListDocument = serde_json::from_value(value).map_err(|e| {
                EzEatinError::Migration(format!("list document is malformed: {}", e))
            })?;
            if document.version != CURRENT_SCHEMA_VERSION {
                return Err(EzEatinError::Migration(format!(
                    "expected schema version {}, found {}",
                    CURRENT_SCHEMA_VERSION, document.version
                ))
                .into());
            }
            Ok(document)
        }
        None => Ok(ListDocument::new(Vec::new())),
    }
}

/// Overwrite the stored document with `lists`
pub fn save_document(store: &mut dyn KeyValueStore, lists: &[SavedShoppingList]) -> Result<()> {
    let value = serde_json::json!({
        "version": CURRENT_SCHEMA_VERSION,
        "lists": lists,
    });
    store.save(SHOPPING_LISTS_KEY, &value)
}

/// v0 -> v1: turn a non-empty legacy item array into the first list
fn migrate_legacy_single_list(store: &mut dyn KeyValueStore) -> Result<()> {
    let legacy = match store.load(LEGACY_LIST_KEY)? {
        Some(value) => value,
        None => return Ok(()),
    };

    let items: Vec<ShoppingListItem> = serde_json::from_value(legacy).map_err(|e| {
        EzEatinError::Migration(format!("legacy shopping list is malformed: {}", e))
    })?;
    if items.is_empty() {
        tracing::debug!("Legacy shopping list is empty, leaving it in place");
        return Ok(());
    }

    let count = items.len();
    let list = SavedShoppingList::with_items(DEFAULT_LIST_NAME, items);
    let lists = serde_json::to_value(vec![list])
        .map_err(|e| EzEatinError::Migration(format!("cannot encode migrated list: {}", e)))?;
    store.save(SHOPPING_LISTS_KEY, &lists)?;
    store.remove(LEGACY_LIST_KEY)?;

    tracing::info!("Migrated {} legacy items into \"{}\"", count, DEFAULT_LIST_NAME);
    Ok(())
}

/// v1 -> v2: wrap the bare list array in a versioned envelope
fn wrap_in_envelope(store: &mut dyn KeyValueStore) -> Result<()> {
    let lists = match store.load(SHOPPING_LISTS_KEY)? {
        Some(value @ Value::Array(_)) => value,
        None => Value::Array(Vec::new()),
        // Left behind when an earlier open stopped before its first flush.
        Some(Value::Object(map)) if envelope_is_empty(&map) => Value::Array(Vec::new()),
        Some(other) => {
            return Err(EzEatinError::Migration(format!(
                "expected a list array before wrapping, found {}",
                json_type_name(&other)
            ))
            .into())
        }
    };

    // Parse once so a malformed v1 document fails here rather than on load.
    let lists: Vec<SavedShoppingList> = serde_json::from_value(lists)
        .map_err(|e| EzEatinError::Migration(format!("shopping lists are malformed: {}", e)))?;
    save_document(store, &lists)
}

fn envelope_is_empty(map: &serde_json::Map<String, Value>) -> bool {
    map.get("lists")
        .map_or(true, |lists| lists.as_array().map_or(false, Vec::is_empty))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
