//! Item operations, all scoped to the current list

use super::model::{ItemDraft, ShoppingListItem};
use super::store::ListStore;
use crate::error::Result;
use crate::storage::KeyValueStore;

impl<S: KeyValueStore> ListStore<S> {
    /// Validate `draft` and append it to the current list
    ///
    /// Returns the new item's id.
    ///
    /// # Errors
    ///
    /// `EmptyName`, `InvalidQuantity` or `InvalidPrice` when the draft is
    /// rejected; nothing changes in that case.
    pub fn add_item(&mut self, draft: ItemDraft) -> Result<String> {
        draft.validate()?;

        let item = draft.into_item();
        let id = item.id.clone();
        let list = self.current_mut();
        list.items.push(item);
        list.touch();
        tracing::debug!(
            list = %list.id,
            items = list.items.len(),
            total = list.total_cost(),
            "Added item {}",
            id
        );

        self.flush()?;
        Ok(id)
    }

    /// Remove an item from the current list
    ///
    /// Returns the removed item, or `None` when the id is not on the list.
    pub fn remove_item(&mut self, item_id: &str) -> Result<Option<ShoppingListItem>> {
        let list = self.current_mut();
        let Some(index) = list.items.iter().position(|item| item.id == item_id) else {
            tracing::debug!("Item {} not on list {}", item_id, list.id);
            return Ok(None);
        };

        let removed = list.items.remove(index);
        list.touch();
        tracing::debug!(list = %list.id, total = list.total_cost(), "Removed item {}", item_id);

        self.flush()?;
        Ok(Some(removed))
    }

    /// Flip the purchased flag of an item on the current list
    ///
    /// Returns the new flag, or `None` when the id is not on the list.
    /// Purchased items still count toward [`ListStore::total_cost`].
    pub fn toggle_purchased(&mut self, item_id: &str) -> Result<Option<bool>> {
        let list = self.current_mut();
        let Some(item) = list.items.iter_mut().find(|item| item.id == item_id) else {
            tracing::debug!("Item {} not on list {}", item_id, list.id);
            return Ok(None);
        };

        item.purchased = !item.purchased;
        let purchased = item.purchased;
        list.touch();

        self.flush()?;
        Ok(Some(purchased))
    }

    /// Remove every item from the current list, keeping the list itself
    ///
    /// Returns how many items were removed.
    pub fn clear_list(&mut self) -> Result<usize> {
        let list = self.current_mut();
        let removed = list.items.len();
        list.items.clear();
        list.touch();
        tracing::info!("Cleared {} items from \"{}\"", removed, list.name);

        self.flush()?;
        Ok(removed)
    }

    /// Estimated cost of the current list, purchased items included
    pub fn total_cost(&self) -> f64 {
        self.current().total_cost()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{validation_error, EzEatinError};
    use crate::shopping::{ItemDraft, ListStore};
    use crate::storage::migrations::load_document;
    use crate::storage::{MemoryStore, MockKeyValueStore};
    use crate::test_utils::{assert_error_contains, expect_rejected, open_memory_store};
    use chrono::{DateTime, Duration, Utc};

    /// Push the current list's `updated_at` a day into the past
    fn backdate(store: &mut ListStore<MemoryStore>) -> DateTime<Utc> {
        let past = Utc::now() - Duration::days(1);
        store.current_mut().updated_at = past;
        past
    }

    #[test]
    fn test_add_item_appends_and_persists() {
        let mut store = open_memory_store();
        let id = store
            .add_item(
                ItemDraft::new("Milk")
                    .with_unit("gal")
                    .with_price(4.5)
                    .with_store("Kroger")
                    .with_category("dairy"),
            )
            .unwrap();

        let item = store.current().item(&id).unwrap();
        assert_eq!(item.name, "Milk");
        assert!(!item.purchased);
        assert_eq!(store.total_cost(), 4.5);

        let stored = load_document(store.backend()).unwrap();
        assert_eq!(stored.lists[0].items.len(), 1);
    }

    #[test]
    fn test_add_item_rejects_invalid_drafts() {
        let mut store = open_memory_store();

        assert!(matches!(
            expect_rejected(store.add_item(ItemDraft::new(""))),
            EzEatinError::EmptyName
        ));
        assert!(matches!(
            expect_rejected(store.add_item(ItemDraft::new("Milk").with_quantity(0.0))),
            EzEatinError::InvalidQuantity(_)
        ));
        assert!(matches!(
            expect_rejected(store.add_item(ItemDraft::new("Milk").with_price(-1.0))),
            EzEatinError::InvalidPrice(_)
        ));
        assert_error_contains(
            store.add_item(ItemDraft::new("Milk").with_quantity(-2.0)),
            "Quantity must be greater than 0",
        );

        assert!(store.current().items.is_empty());
    }

    #[test]
    fn test_add_then_remove_restores_items() {
        let mut store = open_memory_store();
        store.add_item(ItemDraft::new("Bread")).unwrap();
        let before = store.current().items.clone();

        let id = store.add_item(ItemDraft::new("Eggs")).unwrap();
        let removed = store.remove_item(&id).unwrap();

        assert_eq!(removed.unwrap().name, "Eggs");
        assert_eq!(store.current().items, before);
    }

    #[test]
    fn test_remove_unknown_item_reports_none() {
        let mut store = open_memory_store();
        store.add_item(ItemDraft::new("Bread")).unwrap();
        assert!(store.remove_item("nope").unwrap().is_none());
        assert_eq!(store.current().items.len(), 1);
    }

    #[test]
    fn test_toggle_does_not_change_total() {
        let mut store = open_memory_store();
        let a = store.add_item(ItemDraft::new("A").with_price(5.0)).unwrap();
        let b = store.add_item(ItemDraft::new("B").with_price(2.5)).unwrap();
        assert_eq!(store.total_cost(), 7.5);

        assert_eq!(store.toggle_purchased(&a).unwrap(), Some(true));
        assert_eq!(store.total_cost(), 7.5);
        assert_eq!(store.toggle_purchased(&b).unwrap(), Some(true));
        assert_eq!(store.toggle_purchased(&a).unwrap(), Some(false));
        assert_eq!(store.total_cost(), 7.5);

        assert_eq!(store.toggle_purchased("missing").unwrap(), None);
    }

    #[test]
    fn test_clear_list_keeps_shell() {
        let mut store = open_memory_store();
        let id = store.current_id().to_string();
        let name = store.current().name.clone();
        store.add_item(ItemDraft::new("A")).unwrap();
        store.add_item(ItemDraft::new("B")).unwrap();

        assert_eq!(store.clear_list().unwrap(), 2);
        assert!(store.current().items.is_empty());
        assert_eq!(store.current_id(), id);
        assert_eq!(store.current().name, name);
        assert_eq!(store.total_cost(), 0.0);
    }

    #[test]
    fn test_items_only_touch_current_list() {
        let mut store = open_memory_store();
        let first = store.current_id().to_string();
        store.add_item(ItemDraft::new("Milk")).unwrap();
        store.create("Other").unwrap();
        store.add_item(ItemDraft::new("Chips")).unwrap();

        assert_eq!(store.get(&first).unwrap().items.len(), 1);
        assert_eq!(store.current().items[0].name, "Chips");
    }

    #[test]
    fn test_every_item_mutation_bumps_updated_at() {
        let mut store = open_memory_store();

        let past = backdate(&mut store);
        let id = store.add_item(ItemDraft::new("Milk")).unwrap();
        assert!(store.current().updated_at > past);

        let past = backdate(&mut store);
        store.toggle_purchased(&id).unwrap();
        assert!(store.current().updated_at > past);

        let past = backdate(&mut store);
        store.remove_item(&id).unwrap();
        assert!(store.current().updated_at > past);

        store.add_item(ItemDraft::new("Bread")).unwrap();
        let past = backdate(&mut store);
        store.clear_list().unwrap();
        assert!(store.current().updated_at > past);

        let stored = load_document(store.backend()).unwrap();
        assert_eq!(stored.lists[0].updated_at, store.current().updated_at);
    }

    #[test]
    fn test_rejected_or_missed_item_operations_keep_updated_at() {
        let mut store = open_memory_store();
        store.add_item(ItemDraft::new("Milk")).unwrap();
        let past = backdate(&mut store);

        expect_rejected(store.add_item(ItemDraft::new("Eggs").with_quantity(0.0)));
        assert!(store.remove_item("missing").unwrap().is_none());
        assert!(store.toggle_purchased("missing").unwrap().is_none());

        assert_eq!(store.current().updated_at, past);
    }

    #[test]
    fn test_flush_failure_propagates_after_memory_changes() {
        let mut backend = MockKeyValueStore::new();
        backend.expect_load().returning(|_| Ok(None));
        let mut writes = 0;
        backend.expect_save().returning(move |_, _| {
            writes += 1;
            // Open writes the envelope, the document and the pointer.
            if writes > 3 {
                Err(anyhow::anyhow!("quota exceeded"))
            } else {
                Ok(())
            }
        });
        backend.expect_remove().returning(|_| Ok(()));

        let mut store = ListStore::open(backend).unwrap();
        let err = store.add_item(ItemDraft::new("Milk")).unwrap_err();

        assert!(err.to_string().contains("quota exceeded"));
        assert!(validation_error(&err).is_none());
        // In-memory state already moved on; storage is behind.
        assert_eq!(store.current().items.len(), 1);
    }
}
