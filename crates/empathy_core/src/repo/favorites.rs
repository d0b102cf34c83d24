//! Favorites collection keyed by `(item_id, item_type)`.
//!
//! # Invariants
//! - At most one favorite per composite key; enforced by checking
//!   membership before appending, not by the storage layer.
//! - Membership checks are linear scans; the list is bounded by the size of
//!   the reference catalog.

use super::collection::{CollectionStore, LoadStatus, PendingWrite};
use crate::kv::{KeyValueStore, Slot};
use crate::model::favorite::{FavoriteItem, ItemType};
use crate::model::Timestamp;
use chrono::Utc;
use log::debug;

#[derive(Debug, Clone)]
pub struct FavoritesStore {
    inner: CollectionStore<FavoriteItem>,
}

impl Default for FavoritesStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self {
            inner: CollectionStore::new(Slot::Favorites),
        }
    }

    pub fn load<S: KeyValueStore + ?Sized>(&mut self, store: &S) -> LoadStatus {
        self.inner.load(store)
    }

    /// Favorites in the order they were added.
    pub fn list(&self) -> &[FavoriteItem] {
        self.inner.list()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn is_favorite(&self, item_id: &str, item_type: ItemType) -> bool {
        self.inner
            .list()
            .iter()
            .any(|favorite| favorite.matches(item_id, item_type))
    }

    pub fn get(&self, item_id: &str, item_type: ItemType) -> Option<&FavoriteItem> {
        self.inner
            .list()
            .iter()
            .find(|favorite| favorite.matches(item_id, item_type))
    }

    /// Favorites an item. Already-favorited items are left untouched and no
    /// write is issued (`None`).
    pub fn add<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &S,
        item_id: &str,
        item_type: ItemType,
    ) -> Option<PendingWrite> {
        self.add_at(store, item_id, item_type, Utc::now())
    }

    pub fn add_at<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &S,
        item_id: &str,
        item_type: ItemType,
        date_added: Timestamp,
    ) -> Option<PendingWrite> {
        if self.is_favorite(item_id, item_type) {
            debug!(
                "event=favorite_add module=repo status=skip type={} reason=duplicate",
                item_type.code()
            );
            return None;
        }
        let favorite = FavoriteItem::new(item_id, item_type, date_added);
        Some(self.inner.append(store, favorite))
    }

    /// Unfavorites an item; `None` when it was not a favorite.
    pub fn remove<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &S,
        item_id: &str,
        item_type: ItemType,
    ) -> Option<PendingWrite> {
        self.inner
            .remove_where(store, |favorite| favorite.matches(item_id, item_type))
    }

    /// Flips favorite state and returns the new state with its write.
    pub fn toggle<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &S,
        item_id: &str,
        item_type: ItemType,
    ) -> (bool, Option<PendingWrite>) {
        if self.is_favorite(item_id, item_type) {
            (false, self.remove(store, item_id, item_type))
        } else {
            (true, self.add(store, item_id, item_type))
        }
    }
}
