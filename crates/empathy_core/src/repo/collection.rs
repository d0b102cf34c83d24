//! Ordered collection bound to one key-value slot.
//!
//! # Responsibility
//! - Keep an in-memory ordered list of records and mirror it to its slot.
//! - Offer upsert/remove/find/list with at most one record per id.
//!
//! # Invariants
//! - Every mutation rewrites the whole slot before returning, so the slot
//!   reflects the in-memory list before the next mutation is accepted.
//! - Reads (`find`, `list`) never touch storage.
//! - Storage failures are logged and reported through [`PendingWrite`];
//!   they never roll back the in-memory state.

use crate::kv::{read_json, write_json, KeyValueStore, Slot, StoreError};
use crate::model::Timestamp;
use chrono::{TimeDelta, Utc};
use log::{debug, error, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A record addressed by a stable string id.
pub trait Record: Clone + Serialize + DeserializeOwned {
    fn id(&self) -> &str;

    /// `(date_created, date_modified)` for records that track them.
    fn timestamps(&self) -> Option<(Timestamp, Timestamp)> {
        None
    }

    /// Mutable `(date_created, date_modified)` for records that track them.
    fn timestamps_mut(&mut self) -> Option<(&mut Timestamp, &mut Timestamp)> {
        None
    }
}

/// Handle for the durable write issued by a mutation.
///
/// The slot backend is synchronous, so the write has already finished when
/// the handle is returned. Dropping it is the fire-and-forget mode; callers
/// that need durability call [`PendingWrite::wait`].
#[derive(Debug)]
pub struct PendingWrite {
    slot: Slot,
    outcome: Result<(), StoreError>,
}

impl PendingWrite {
    /// Serializes `value` into `slot`, logging any failure.
    pub(crate) fn issue<S, V>(store: &S, slot: Slot, value: &V, items: usize) -> Self
    where
        S: KeyValueStore + ?Sized,
        V: Serialize + ?Sized,
    {
        let outcome = write_json(store, slot, value);
        match &outcome {
            Ok(()) => debug!("event=slot_write module=repo status=ok slot={slot} items={items}"),
            Err(err) => error!(
                "event=slot_write module=repo status=error slot={slot} items={items} error={err}"
            ),
        }
        Self { slot, outcome }
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Whether storage now reflects the in-memory state.
    pub fn is_durable(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn error(&self) -> Option<&StoreError> {
        self.outcome.as_ref().err()
    }

    /// Resolves the write, surfacing the storage error if it failed.
    pub fn wait(self) -> Result<(), StoreError> {
        self.outcome
    }
}

/// What `load` found in the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Slot never written; collection starts empty.
    Missing,
    /// Slot decoded into this many records.
    Loaded(usize),
    /// Slot unreadable or malformed; collection fell back to empty.
    Defaulted,
}

/// Result of an upsert.
#[derive(Debug)]
pub struct Upserted<T> {
    /// The record as stored, with timestamps normalized.
    pub record: T,
    /// `true` when an existing record with the same id was replaced.
    pub replaced: bool,
    pub write: PendingWrite,
}

/// In-memory ordered list mirrored to one slot.
///
/// The store does not own the backend; every I/O call borrows it so one
/// owner (the app state) can share a single backend across all slots.
#[derive(Debug, Clone)]
pub struct CollectionStore<T> {
    slot: Slot,
    items: Vec<T>,
}

impl<T> CollectionStore<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    pub fn new(slot: Slot) -> Self {
        Self {
            slot,
            items: Vec::new(),
        }
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Replaces the in-memory list with the slot contents.
    ///
    /// Never fails: an absent slot yields an empty list, and a malformed or
    /// unreadable slot is logged and also yields an empty list.
    pub fn load<S>(&mut self, store: &S) -> LoadStatus
    where
        S: KeyValueStore + ?Sized,
    {
        let slot = self.slot;
        match read_json::<Vec<T>, _>(store, slot) {
            Ok(Some(items)) => {
                self.items = items;
                info!(
                    "event=slot_load module=repo status=ok slot={slot} items={}",
                    self.items.len()
                );
                LoadStatus::Loaded(self.items.len())
            }
            Ok(None) => {
                self.items.clear();
                info!("event=slot_load module=repo status=skip slot={slot} reason=absent");
                LoadStatus::Missing
            }
            Err(err) => {
                self.items.clear();
                error!(
                    "event=slot_load module=repo status=error slot={slot} error_code=slot_load_failed error={err}"
                );
                LoadStatus::Defaulted
            }
        }
    }

    /// Records in insertion order.
    pub fn list(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends without any key check and persists.
    pub(crate) fn append<S>(&mut self, store: &S, item: T) -> PendingWrite
    where
        S: KeyValueStore + ?Sized,
    {
        self.items.push(item);
        self.persist(store)
    }

    /// Drops every item matching `predicate` and persists.
    ///
    /// Returns `None` without writing when nothing matched.
    pub(crate) fn remove_where<S>(
        &mut self,
        store: &S,
        predicate: impl Fn(&T) -> bool,
    ) -> Option<PendingWrite>
    where
        S: KeyValueStore + ?Sized,
    {
        let before = self.items.len();
        self.items.retain(|item| !predicate(item));
        if self.items.len() == before {
            return None;
        }
        Some(self.persist(store))
    }

    fn persist<S>(&self, store: &S) -> PendingWrite
    where
        S: KeyValueStore + ?Sized,
    {
        PendingWrite::issue(store, self.slot, &self.items, self.items.len())
    }
}

impl<T: Record> CollectionStore<T> {
    /// Inserts or replaces by id, stamping `date_modified` with the current time.
    pub fn upsert<S>(&mut self, store: &S, record: T) -> Upserted<T>
    where
        S: KeyValueStore + ?Sized,
    {
        self.upsert_at(store, record, Utc::now())
    }

    /// [`CollectionStore::upsert`] with an explicit clock reading.
    ///
    /// Replacement keeps the existing position and `date_created`; the new
    /// `date_modified` is strictly later than both previous timestamps unless
    /// they already sit at the maximum representable instant.
    pub fn upsert_at<S>(&mut self, store: &S, mut record: T, now: Timestamp) -> Upserted<T>
    where
        S: KeyValueStore + ?Sized,
    {
        let position = self.position(record.id());
        let previous = position.and_then(|index| self.items[index].timestamps());
        stamp(&mut record, previous, now);

        let replaced = match position {
            Some(index) => {
                self.items[index] = record.clone();
                true
            }
            None => {
                self.items.push(record.clone());
                false
            }
        };

        let write = self.persist(store);
        Upserted {
            record,
            replaced,
            write,
        }
    }

    /// Removes the record with `id`. Absent ids are a no-op with no write.
    pub fn remove<S>(&mut self, store: &S, id: &str) -> Option<PendingWrite>
    where
        S: KeyValueStore + ?Sized,
    {
        let removed = self.remove_where(store, |item| item.id() == id);
        if removed.is_none() {
            warn!(
                "event=record_remove module=repo status=skip slot={} reason=not_found",
                self.slot
            );
        }
        removed
    }

    pub fn find(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }
}

fn stamp<T: Record>(record: &mut T, previous: Option<(Timestamp, Timestamp)>, now: Timestamp) {
    let Some((created, modified)) = record.timestamps_mut() else {
        return;
    };
    match previous {
        Some((previous_created, previous_modified)) => {
            *created = previous_created;
            let latest = previous_created.max(previous_modified);
            // At the end of chrono's range there is no later instant; keep the latest.
            let floor = latest
                .checked_add_signed(TimeDelta::milliseconds(1))
                .unwrap_or(latest);
            *modified = now.max(floor);
        }
        None => *modified = now.max(*created),
    }
}
