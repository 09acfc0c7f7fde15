//! The list store: authoritative in-memory lists plus the current pointer
//!
//! A `ListStore` is built once per session with [`ListStore::open`] and
//! handed to whatever needs to read or change lists. Every mutation ends
//! with a full flush of the list document and the pointer.

use crate::error::Result;
use crate::shopping::model::{SavedShoppingList, DEFAULT_LIST_NAME};
use crate::storage::migrations::{self, MigrationReport};
use crate::storage::{KeyValueStore, CURRENT_LIST_ID_KEY};
use serde_json::Value;

/// Outcome of resolving a user-typed list reference
#[derive(Debug, Clone, PartialEq)]
pub enum ListLookup<'a> {
    Found(&'a SavedShoppingList),
    /// Several lists share the name or id prefix
    Ambiguous(Vec<&'a SavedShoppingList>),
    Missing,
}

impl<'a> ListLookup<'a> {
    pub fn found(self) -> Option<&'a SavedShoppingList> {
        match self {
            Self::Found(list) => Some(list),
            _ => None,
        }
    }

    fn from_matches(mut matches: Vec<&'a SavedShoppingList>) -> Self {
        match matches.len() {
            0 => Self::Missing,
            1 => Self::Found(matches.remove(0)),
            _ => Self::Ambiguous(matches),
        }
    }
}

/// Session context owning all shopping lists
pub struct ListStore<S: KeyValueStore = Box<dyn KeyValueStore>> {
    pub(super) backend: S,
    pub(super) lists: Vec<SavedShoppingList>,
    pub(super) current_id: String,
    migration: MigrationReport,
}

impl<S: KeyValueStore> ListStore<S> {
    /// Load every list from `backend`, upgrading old layouts first
    ///
    /// Creates a default "My Shopping List" when nothing is stored, and
    /// falls back to the first list when the stored pointer is missing or
    /// stale. Always leaves the backend holding a non-empty list document.
    ///
    /// # Errors
    ///
    /// Propagates backend and migration errors.
    ///
    /// # Examples
    ///
    /// ```
    /// use ezeatin::shopping::ListStore;
    /// use ezeatin::storage::MemoryStore;
    ///
    /// # fn main() -> ezeatin::error::Result<()> {
    /// let store = ListStore::open(MemoryStore::new())?;
    /// assert_eq!(store.len(), 1);
    /// assert_eq!(store.current().name, "My Shopping List");
    /// # Ok(())
    /// # }
    /// ```
    pub fn open(mut backend: S) -> Result<Self> {
        let migration = migrations::run_migrations(&mut backend)?;
        if !migration.is_noop() {
            tracing::info!(
                "Storage upgraded from schema v{} to v{}",
                migration.from,
                migration.to
            );
        }

        let mut lists = migrations::load_document(&backend)?.lists;
        let default_id = match lists.first() {
            Some(first) => first.id.clone(),
            None => {
                tracing::info!("No shopping lists found, creating \"{}\"", DEFAULT_LIST_NAME);
                let list = SavedShoppingList::new(DEFAULT_LIST_NAME);
                let id = list.id.clone();
                lists.push(list);
                id
            }
        };

        let stored_pointer = backend
            .load(CURRENT_LIST_ID_KEY)?
            .and_then(|value| value.as_str().map(str::to_owned));
        let current_id = match stored_pointer {
            Some(id) if lists.iter().any(|list| list.id == id) => id,
            Some(stale) => {
                tracing::warn!("Current list {} no longer exists, selecting first list", stale);
                default_id
            }
            None => default_id,
        };

        let mut store = Self {
            backend,
            lists,
            current_id,
            migration,
        };
        store.flush()?;

        tracing::debug!(
            lists = store.lists.len(),
            current = %store.current_id,
            "Shopping lists loaded"
        );
        Ok(store)
    }

    /// All lists in creation order
    pub fn lists(&self) -> &[SavedShoppingList] {
        &self.lists
    }

    /// Number of lists; never zero
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Always false: the store keeps at least one list
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Id of the current list
    pub fn current_id(&self) -> &str {
        &self.current_id
    }

    /// The list being displayed and edited
    pub fn current(&self) -> &SavedShoppingList {
        &self.lists[self.current_index()]
    }

    pub(super) fn current_mut(&mut self) -> &mut SavedShoppingList {
        let index = self.current_index();
        &mut self.lists[index]
    }

    /// Position of the current list; the pointer always resolves
    pub(super) fn current_index(&self) -> usize {
        self.lists
            .iter()
            .position(|list| list.id == self.current_id)
            .unwrap_or(0)
    }

    /// Look up a list by exact id
    pub fn get(&self, list_id: &str) -> Option<&SavedShoppingList> {
        self.lists.iter().find(|list| list.id == list_id)
    }

    /// Resolve what a user typed to a list
    ///
    /// Tries an exact id, then a case-insensitive name, then an id prefix.
    /// A name or prefix shared by several lists is reported as ambiguous.
    pub fn lookup(&self, query: &str) -> ListLookup<'_> {
        let query = query.trim();
        if query.is_empty() {
            return ListLookup::Missing;
        }

        if let Some(list) = self.get(query) {
            return ListLookup::Found(list);
        }

        let folded = query.to_lowercase();
        let by_name: Vec<&SavedShoppingList> = self
            .lists
            .iter()
            .filter(|list| list.name.trim().to_lowercase() == folded)
            .collect();
        if !by_name.is_empty() {
            return ListLookup::from_matches(by_name);
        }

        ListLookup::from_matches(
            self.lists
                .iter()
                .filter(|list| list.id.starts_with(query))
                .collect(),
        )
    }

    /// The list `query` resolves to, if exactly one does
    pub fn find(&self, query: &str) -> Option<&SavedShoppingList> {
        self.lookup(query).found()
    }

    /// Make `list_id` the current list
    ///
    /// Returns `Ok(false)` without touching anything when no list has that
    /// id.
    pub fn select_current(&mut self, list_id: &str) -> Result<bool> {
        if self.get(list_id).is_none() {
            tracing::debug!("Ignoring selection of unknown list {}", list_id);
            return Ok(false);
        }

        self.current_id = list_id.to_string();
        self.flush()?;
        tracing::debug!("Selected list {}", list_id);
        Ok(true)
    }

    /// What the migration pass did when this store was opened
    pub fn migration_report(&self) -> &MigrationReport {
        &self.migration
    }

    /// The underlying persistence backend
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Give back the backend, dropping the in-memory state
    pub fn into_backend(self) -> S {
        self.backend
    }

    /// Write all lists and the current pointer to the backend
    ///
    /// If this fails after an in-memory mutation, memory and storage
    /// disagree until the next successful flush.
    pub fn flush(&mut self) -> Result<()> {
        migrations::save_document(&mut self.backend, &self.lists)?;
        self.backend
            .save(CURRENT_LIST_ID_KEY, &Value::String(self.current_id.clone()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, MockKeyValueStore, LEGACY_LIST_KEY, SHOPPING_LISTS_KEY};
    use serde_json::json;

    #[test]
    fn test_open_empty_backend_creates_default_list() {
        let store = ListStore::open(MemoryStore::new()).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.current().name, DEFAULT_LIST_NAME);
        assert_eq!(store.current_id(), store.lists()[0].id);

        let backend = store.backend();
        assert!(backend.contains_key(SHOPPING_LISTS_KEY));
        assert_eq!(
            backend.load(CURRENT_LIST_ID_KEY).unwrap(),
            Some(json!(store.current_id()))
        );
    }

    #[test]
    fn test_reopen_restores_lists_and_pointer() {
        let mut store = ListStore::open(MemoryStore::new()).unwrap();
        let second = store.create("Costco run").unwrap();

        let reopened = ListStore::open(store.into_backend()).unwrap();
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.current_id(), second);
        assert!(reopened.migration_report().is_noop());
    }

    #[test]
    fn test_stale_pointer_falls_back_to_first_list() {
        let mut backend = MemoryStore::new();
        migrations::save_document(
            &mut backend,
            &[SavedShoppingList::new("A"), SavedShoppingList::new("B")],
        )
        .unwrap();
        backend
            .save(CURRENT_LIST_ID_KEY, &json!("gone"))
            .unwrap();

        let store = ListStore::open(backend).unwrap();
        assert_eq!(store.current().name, "A");
        assert_eq!(
            store.backend().load(CURRENT_LIST_ID_KEY).unwrap(),
            Some(json!(store.current_id()))
        );
    }

    #[test]
    fn test_open_consumes_legacy_list() {
        let mut backend = MemoryStore::new();
        backend
            .save(
                LEGACY_LIST_KEY,
                &json!([{"id": "1", "name": "Milk"}, {"id": "2", "name": "Bread"}]),
            )
            .unwrap();

        let store = ListStore::open(backend).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.current().name, DEFAULT_LIST_NAME);
        assert_eq!(store.current().items.len(), 2);
        assert!(!store.backend().contains_key(LEGACY_LIST_KEY));
        assert_eq!(store.migration_report().from, 0);
    }

    #[test]
    fn test_select_current_unknown_id_is_reported() {
        let mut store = ListStore::open(MemoryStore::new()).unwrap();
        let before = store.current_id().to_string();

        assert!(!store.select_current("does-not-exist").unwrap());
        assert_eq!(store.current_id(), before);
    }

    #[test]
    fn test_select_current_persists_pointer() {
        let mut store = ListStore::open(MemoryStore::new()).unwrap();
        let first = store.current_id().to_string();
        store.create("Second").unwrap();

        assert!(store.select_current(&first).unwrap());
        assert_eq!(store.current_id(), first);
        assert_eq!(
            store.backend().load(CURRENT_LIST_ID_KEY).unwrap(),
            Some(json!(first))
        );
    }

    #[test]
    fn test_find_by_id_name_and_prefix() {
        let mut store = ListStore::open(MemoryStore::new()).unwrap();
        let party = store.create("BBQ Party").unwrap();

        assert_eq!(store.find(&party).unwrap().name, "BBQ Party");
        assert_eq!(store.find("bbq party").unwrap().id, party);
        assert_eq!(store.find("my shopping list").unwrap().name, DEFAULT_LIST_NAME);
        assert!(store.find("").is_none());
        assert!(store.find("no such list").is_none());
    }

    #[test]
    fn test_lookup_folds_non_ascii_case() {
        let mut store = ListStore::open(MemoryStore::new()).unwrap();
        let id = store.create("Épicerie du Marché").unwrap();

        match store.lookup("épicerie du marché") {
            ListLookup::Found(list) => assert_eq!(list.id, id),
            other => panic!("Expected a single match, got {:?}", other),
        }
    }

    #[test]
    fn test_lookup_reports_shared_names() {
        let mut store = ListStore::open(MemoryStore::new()).unwrap();
        let first = store.create("Weekly").unwrap();
        let second = store.create("weekly").unwrap();

        match store.lookup("WEEKLY") {
            ListLookup::Ambiguous(matches) => {
                let ids: Vec<&str> = matches.iter().map(|l| l.id.as_str()).collect();
                assert_eq!(ids, vec![first.as_str(), second.as_str()]);
            }
            other => panic!("Expected an ambiguous match, got {:?}", other),
        }
        assert!(store.find("weekly").is_none());
        assert_eq!(store.find(&second).unwrap().id, second);
    }

    #[test]
    fn test_lookup_missing() {
        let store = ListStore::open(MemoryStore::new()).unwrap();
        assert_eq!(store.lookup("   "), ListLookup::Missing);
        assert_eq!(store.lookup("Nowhere"), ListLookup::Missing);
    }

    #[test]
    fn test_storage_failure_on_open_propagates() {
        let mut backend = MockKeyValueStore::new();
        backend
            .expect_load()
            .returning(|_| Err(anyhow::anyhow!("storage disabled")));

        let err = ListStore::open(backend).err().unwrap();
        assert!(err.to_string().contains("storage disabled"));
    }
}
