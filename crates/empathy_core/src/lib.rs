//! Core persistence and domain logic for the NVC empathy app.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use kv::{KeyValueStore, Slot, SqliteKvStore, StoreError, StoreResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::empathy_map::{EmpathyMap, EmpathyMapDraft};
pub use model::exercise::CompletedExercise;
pub use model::favorite::{FavoriteItem, ItemType};
pub use model::gratitude::{GratitudeDraft, GratitudeEntry, GratitudeKind};
pub use model::reference::{Emotion, EmotionCategory, Need, NeedCategory, NeedState, Source};
pub use model::settings::{AppSettings, Language, SettingsPatch, Theme};
pub use model::statement::{NvcStatement, StatementDraft};
pub use model::validation::ValidationError;
pub use model::Timestamp;
pub use repo::{CollectionStore, LoadStatus, PendingWrite, Record, Upserted};
pub use search::journal::{GratitudeCounts, GratitudeFilter};
pub use search::reference::{ReferenceCatalog, StaticCatalog};
pub use service::{AppState, BootstrapOptions, StateChange, SubscriptionId};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
