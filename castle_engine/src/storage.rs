//! Name-bucketed item storage shared by rooms and the player inventory.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Item;

/// Shown by [`Storage::list`] when nothing visible is stored.
pub const EMPTY_LISTING: &str = "No items in here, search somewhere else...";

/// A multiset of item ids keyed by lowercased item name.
///
/// Capacity counts items, not weight. A bucket that empties is removed, so `has`
/// never reports a name with nothing behind it. Buckets iterate in name order, which
/// keeps listings stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Storage {
    capacity: Option<usize>,
    buckets: BTreeMap<String, Vec<Uuid>>,
}

impl Storage {
    /// Storage holding at most `capacity` items.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            buckets: BTreeMap::new(),
        }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.capacity.is_some_and(|cap| self.count() >= cap)
    }

    /// Append `item` to its name bucket. Returns false, leaving the storage untouched,
    /// when it is already at capacity.
    pub fn add(&mut self, item: &Item) -> bool {
        if self.is_full() {
            return false;
        }
        self.buckets.entry(item.key()).or_default().push(item.id);
        true
    }

    /// Pop the most recently added item stored under `name`.
    pub fn remove(&mut self, name: &str) -> Option<Uuid> {
        let key = name.trim().to_lowercase();
        let bucket = self.buckets.get_mut(&key)?;
        let removed = bucket.pop();
        if bucket.is_empty() {
            self.buckets.remove(&key);
        }
        removed
    }

    /// Remove one specific item, for when several share a name.
    pub fn remove_item(&mut self, item: &Item) -> Option<Uuid> {
        let key = item.key();
        let bucket = self.buckets.get_mut(&key)?;
        let pos = bucket.iter().position(|id| *id == item.id)?;
        let removed = bucket.remove(pos);
        if bucket.is_empty() {
            self.buckets.remove(&key);
        }
        Some(removed)
    }

    /// First item stored under `name`, without removing it.
    pub fn get(&self, name: &str) -> Option<Uuid> {
        self.buckets
            .get(&name.trim().to_lowercase())
            .and_then(|bucket| bucket.first().copied())
    }

    /// First *visible* item stored under `name`.
    pub fn find_visible(&self, name: &str, items: &HashMap<Uuid, Item>) -> Option<Uuid> {
        self.bucket(name)
            .iter()
            .copied()
            .find(|id| items.get(id).is_some_and(|item| item.visible))
    }

    /// All ids stored under `name`, oldest first.
    pub fn bucket(&self, name: &str) -> &[Uuid] {
        self.buckets
            .get(&name.trim().to_lowercase())
            .map_or(&[], Vec::as_slice)
    }

    pub fn has(&self, name: &str) -> bool {
        self.buckets.contains_key(&name.trim().to_lowercase())
    }

    pub fn contains_id(&self, id: Uuid) -> bool {
        self.buckets.values().any(|bucket| bucket.contains(&id))
    }

    pub fn count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Every stored id, in bucket order.
    pub fn ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.buckets.values().flatten().copied()
    }

    /// Player-facing listing of the visible items, one `- name` line each.
    pub fn list(&self, items: &HashMap<Uuid, Item>) -> String {
        let listing: String = self
            .ids()
            .filter_map(|id| items.get(&id))
            .filter(|item| item.visible)
            .map(|item| format!("- {}\n", item.name))
            .collect();
        if listing.is_empty() {
            EMPTY_LISTING.to_string()
        } else {
            listing
        }
    }
}
