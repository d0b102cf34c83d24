//! Durable key-value slots.
//!
//! # Responsibility
//! - Define the whole-value slot contract every persisted collection uses.
//! - Provide JSON encode/decode helpers shared by the collection and settings stores.
//!
//! # Invariants
//! - A slot is always read and written wholesale; there are no partial updates.
//! - Slot values are UTF-8 JSON text.

use crate::db::DbError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod sqlite;

pub use sqlite::SqliteKvStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure while reading or writing a slot.
#[derive(Debug)]
pub enum StoreError {
    /// SQLite transport or bootstrap failure.
    Db(DbError),
    /// Slot payload could not be encoded or decoded.
    Serialization(serde_json::Error),
    /// Backend refused the operation (e.g. storage not mounted).
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "malformed slot payload: {err}"),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Logical persisted slots.
///
/// Keys match the storage keys used by earlier releases of the mobile app, so
/// an exported AsyncStorage dump can be imported slot-for-slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Favorites,
    Settings,
    NvcStatements,
    EmpathyMaps,
    GratitudeEntries,
    ExerciseProgress,
}

impl Slot {
    pub const ALL: [Slot; 6] = [
        Slot::Favorites,
        Slot::Settings,
        Slot::NvcStatements,
        Slot::EmpathyMaps,
        Slot::GratitudeEntries,
        Slot::ExerciseProgress,
    ];

    /// Storage key for this slot.
    pub fn key(self) -> &'static str {
        match self {
            Slot::Favorites => "@empathy_app_favorites",
            Slot::Settings => "@empathy_app_settings",
            Slot::NvcStatements => "@empathy_app_nvc_statements",
            Slot::EmpathyMaps => "@empathy_app_empathy_maps",
            Slot::GratitudeEntries => "@empathy_app_gratitude_entries",
            Slot::ExerciseProgress => "@empathy_app_exercise_progress",
        }
    }

    /// Short name used in log events.
    pub fn name(self) -> &'static str {
        match self {
            Slot::Favorites => "favorites",
            Slot::Settings => "settings",
            Slot::NvcStatements => "nvc_statements",
            Slot::EmpathyMaps => "empathy_maps",
            Slot::GratitudeEntries => "gratitude_entries",
            Slot::ExerciseProgress => "exercise_progress",
        }
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Whole-value key-value storage.
///
/// Methods take `&self`; implementations that need mutation use interior
/// mutability. Callers serialize access (one UI thread or one owning actor).
pub trait KeyValueStore {
    /// Returns the raw slot value, or `None` when the key was never written.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    /// Replaces the slot value.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    /// Deletes the slot. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;
    /// Lists every key currently present.
    fn keys(&self) -> StoreResult<Vec<String>>;
}

/// Reads and decodes one slot.
pub fn read_json<T, S>(store: &S, slot: Slot) -> StoreResult<Option<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get(slot.key())? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encodes and writes one slot.
pub fn write_json<T, S>(store: &S, slot: Slot, value: &T) -> StoreResult<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(slot.key(), &raw)
}

#[cfg(test)]
mod tests {
    use super::Slot;
    use std::collections::HashSet;

    #[test]
    fn slot_keys_are_unique_and_prefixed() {
        let keys: HashSet<&str> = Slot::ALL.iter().map(|slot| slot.key()).collect();
        assert_eq!(keys.len(), Slot::ALL.len());
        assert!(keys.iter().all(|key| key.starts_with("@empathy_app_")));
    }
}
