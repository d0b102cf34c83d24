//! Slot-backed stores for user state.
//!
//! # Responsibility
//! - Mirror each user collection and the settings singleton to its slot.
//! - Keep storage failures inside the persistence boundary (logged, and
//!   reported through [`PendingWrite`]).
//!
//! # Invariants
//! - Stores never validate user input; validation happens in the service
//!   layer before any store is touched.

pub mod collection;
pub mod favorites;
mod records;
pub mod settings;

pub use collection::{CollectionStore, LoadStatus, PendingWrite, Record, Upserted};
pub use favorites::FavoritesStore;
pub use settings::SettingsStore;
