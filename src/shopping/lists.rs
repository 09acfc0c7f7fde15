//! Whole-list operations: create, rename, duplicate, delete

use super::model::{validate_name, SavedShoppingList};
use super::store::ListStore;
use crate::error::{EzEatinError, Result};
use crate::storage::KeyValueStore;

impl<S: KeyValueStore> ListStore<S> {
    /// Append a new empty list and make it current
    ///
    /// Returns the id of the new list.
    ///
    /// # Errors
    ///
    /// `EzEatinError::EmptyName` if `name` is blank; nothing changes.
    pub fn create(&mut self, name: &str) -> Result<String> {
        let name = validate_name(name)?;

        let list = SavedShoppingList::new(name);
        let id = list.id.clone();
        self.lists.push(list);
        self.current_id = id.clone();
        self.flush()?;

        tracing::info!("Created shopping list \"{}\" ({})", name, id);
        Ok(id)
    }

    /// Rename the current list
    ///
    /// # Errors
    ///
    /// `EzEatinError::EmptyName` if `new_name` is blank; nothing changes.
    pub fn rename(&mut self, new_name: &str) -> Result<()> {
        let new_name = validate_name(new_name)?.to_string();

        let list = self.current_mut();
        let old_name = std::mem::replace(&mut list.name, new_name);
        list.touch();
        tracing::info!("Renamed shopping list \"{}\" to \"{}\"", old_name, list.name);

        self.flush()
    }

    /// Append a copy of the current list
    ///
    /// The copy gets " (Copy)" appended to its name and fresh item ids. The
    /// selection stays on the original list. Returns the id of the copy.
    pub fn duplicate(&mut self) -> Result<String> {
        let copy = self.current().duplicate();
        let id = copy.id.clone();
        tracing::info!("Duplicated shopping list as \"{}\" ({})", copy.name, id);

        self.lists.push(copy);
        self.flush()?;
        Ok(id)
    }

    /// Delete the current list and select the first remaining one
    ///
    /// Returns the removed list.
    ///
    /// # Errors
    ///
    /// `EzEatinError::LastList` if it is the only list; nothing changes.
    pub fn delete(&mut self) -> Result<SavedShoppingList> {
        if self.lists.len() <= 1 {
            return Err(EzEatinError::LastList.into());
        }

        let index = self.current_index();
        let removed = self.lists.remove(index);
        self.current_id = self.lists[0].id.clone();
        tracing::info!(
            "Deleted shopping list \"{}\", now on \"{}\"",
            removed.name,
            self.lists[0].name
        );

        self.flush()?;
        Ok(removed)
    }
}
