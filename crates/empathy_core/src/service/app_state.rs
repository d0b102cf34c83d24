//! Domain facade over every user store.
//!
//! # Responsibility
//! - Own the key-value backend and all in-memory stores for one process.
//! - Validate user input before any mutation and fill in ids, timestamps,
//!   default titles and language.
//! - Notify subscribers after each effective change.
//!
//! # Invariants
//! - Only `ValidationError` is returned as an error; storage failures are
//!   logged and carried by the returned [`PendingWrite`].
//! - A rejected save leaves every collection and slot untouched.
//! - Reads are served from memory only.

use super::observer::{Listener, Listeners, StateChange, SubscriptionId};
use crate::kv::{KeyValueStore, Slot};
use crate::model::empathy_map::{EmpathyMap, EmpathyMapDraft};
use crate::model::exercise::CompletedExercise;
use crate::model::favorite::{FavoriteItem, ItemType};
use crate::model::gratitude::{GratitudeDraft, GratitudeEntry, GratitudeKind};
use crate::model::settings::{AppSettings, Language, SettingsPatch};
use crate::model::statement::{NvcStatement, StatementDraft};
use crate::model::tags::normalize_tags;
use crate::model::validation::{RequiredFields, ValidationError};
use crate::model::{normalize_optional, Timestamp};
use crate::repo::{
    CollectionStore, FavoritesStore, LoadStatus, PendingWrite, SettingsStore, Upserted,
};
use crate::search::reference::{resolve_favorites, ReferenceCatalog, ResolvedFavorite};
use chrono::Utc;
use log::info;
use uuid::Uuid;

/// Startup inputs supplied by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapOptions {
    /// Device locale tag such as `lt-LT`; drives the default language.
    pub device_locale: Option<String>,
}

impl BootstrapOptions {
    pub fn with_locale(locale: impl Into<String>) -> Self {
        Self {
            device_locale: Some(locale.into()),
        }
    }
}

/// Process-wide user state, constructed at startup and dropped at shutdown.
#[derive(Debug)]
pub struct AppState<S: KeyValueStore> {
    store: S,
    settings: SettingsStore,
    favorites: FavoritesStore,
    statements: CollectionStore<NvcStatement>,
    gratitude: CollectionStore<GratitudeEntry>,
    empathy_maps: CollectionStore<EmpathyMap>,
    exercises: CollectionStore<CompletedExercise>,
    load_report: Vec<(Slot, LoadStatus)>,
    listeners: Listeners,
}

impl<S: KeyValueStore> AppState<S> {
    /// Builds the state and loads every slot from `store`.
    ///
    /// Never fails: unreadable slots fall back to empty/default values and
    /// are reported by [`AppState::load_report`].
    pub fn bootstrap(store: S, options: &BootstrapOptions) -> Self {
        let mut state = Self {
            store,
            settings: SettingsStore::for_device_locale(options.device_locale.as_deref()),
            favorites: FavoritesStore::new(),
            statements: CollectionStore::new(Slot::NvcStatements),
            gratitude: CollectionStore::new(Slot::GratitudeEntries),
            empathy_maps: CollectionStore::new(Slot::EmpathyMaps),
            exercises: CollectionStore::new(Slot::ExerciseProgress),
            load_report: Vec::new(),
            listeners: Listeners::default(),
        };
        state.reload();
        state
    }

    /// Re-reads every slot, replacing in-memory state.
    pub fn reload(&mut self) -> &[(Slot, LoadStatus)] {
        let store = &self.store;
        self.load_report = vec![
            (Slot::Settings, self.settings.load(store)),
            (Slot::Favorites, self.favorites.load(store)),
            (Slot::NvcStatements, self.statements.load(store)),
            (Slot::GratitudeEntries, self.gratitude.load(store)),
            (Slot::EmpathyMaps, self.empathy_maps.load(store)),
            (Slot::ExerciseProgress, self.exercises.load(store)),
        ];
        let defaulted = self
            .load_report
            .iter()
            .filter(|(_, status)| *status == LoadStatus::Defaulted)
            .count();
        info!(
            "event=app_state_load module=service status={} defaulted_slots={defaulted}",
            if defaulted == 0 { "ok" } else { "error" }
        );
        &self.load_report
    }

    /// Per-slot outcome of the last load.
    pub fn load_report(&self) -> &[(Slot, LoadStatus)] {
        &self.load_report
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Tears the state down, handing the backend back to the host.
    pub fn into_store(self) -> S {
        self.store
    }

    // --- Observers ---

    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    // --- Settings ---

    pub fn settings(&self) -> AppSettings {
        self.settings.current()
    }

    pub fn language(&self) -> Language {
        self.settings.current().language
    }

    pub fn update_settings(&mut self, patch: &SettingsPatch) -> (AppSettings, PendingWrite) {
        let updated = self.settings.update(&self.store, patch);
        self.listeners.notify(StateChange::Settings);
        updated
    }

    // --- Favorites ---

    pub fn favorites(&self) -> &[FavoriteItem] {
        self.favorites.list()
    }

    pub fn is_favorite(&self, item_id: &str, item_type: ItemType) -> bool {
        self.favorites.is_favorite(item_id, item_type)
    }

    /// Returns `None` (and notifies nobody) when already favorited.
    pub fn add_favorite(&mut self, item_id: &str, item_type: ItemType) -> Option<PendingWrite> {
        let write = self.favorites.add(&self.store, item_id, item_type)?;
        self.listeners.notify(StateChange::Favorites);
        Some(write)
    }

    pub fn remove_favorite(
        &mut self,
        item_id: &str,
        item_type: ItemType,
    ) -> Option<PendingWrite> {
        let write = self.favorites.remove(&self.store, item_id, item_type)?;
        self.listeners.notify(StateChange::Favorites);
        Some(write)
    }

    /// Flips favorite state, returning the new state.
    pub fn toggle_favorite(
        &mut self,
        item_id: &str,
        item_type: ItemType,
    ) -> (bool, Option<PendingWrite>) {
        let toggled = self.favorites.toggle(&self.store, item_id, item_type);
        if toggled.1.is_some() {
            self.listeners.notify(StateChange::Favorites);
        }
        toggled
    }

    /// Favorites joined with reference data in the active language, most
    /// recently added first.
    pub fn resolve_favorites<'a, C: ReferenceCatalog + ?Sized>(
        &'a self,
        catalog: &'a C,
    ) -> Vec<ResolvedFavorite<'a>> {
        resolve_favorites(self.favorites.list(), catalog, self.language())
    }

    // --- NVC statements ---

    pub fn nvc_statements(&self) -> &[NvcStatement] {
        self.statements.list()
    }

    pub fn get_nvc_statement(&self, id: &str) -> Option<&NvcStatement> {
        self.statements.find(id)
    }

    /// Saves wizard input, creating or editing depending on `draft.id`.
    ///
    /// Editing keeps the stored `date_created`; the collection store
    /// restores it on replacement.
    pub fn save_nvc_statement(
        &mut self,
        draft: StatementDraft,
    ) -> Result<Upserted<NvcStatement>, ValidationError> {
        draft.validate()?;
        let now = Utc::now();
        let language = self.language();
        let id = draft.id.unwrap_or_else(new_id);
        let title =
            non_blank(draft.title).unwrap_or_else(|| default_statement_title(language, now));

        let statement = NvcStatement {
            id,
            title,
            observation: draft.observation,
            feeling: draft.feeling,
            need: draft.need,
            request: draft.request,
            context: normalize_optional(draft.context),
            date_created: now,
            date_modified: now,
            language,
            tags: normalize_tags(&draft.tags),
        };
        Ok(self.commit_statement(statement, now))
    }

    /// Stores a complete statement as given (after validation).
    pub fn upsert_nvc_statement(
        &mut self,
        mut statement: NvcStatement,
    ) -> Result<Upserted<NvcStatement>, ValidationError> {
        statement.validate()?;
        statement.tags = normalize_tags(&statement.tags);
        Ok(self.commit_statement(statement, Utc::now()))
    }

    pub fn delete_nvc_statement(&mut self, id: &str) -> Option<PendingWrite> {
        let write = self.statements.remove(&self.store, id)?;
        self.listeners.notify(StateChange::NvcStatements);
        Some(write)
    }

    fn commit_statement(
        &mut self,
        statement: NvcStatement,
        now: Timestamp,
    ) -> Upserted<NvcStatement> {
        let upserted = self.statements.upsert_at(&self.store, statement, now);
        self.listeners.notify(StateChange::NvcStatements);
        upserted
    }

    // --- Gratitude journal ---

    pub fn gratitude_entries(&self) -> &[GratitudeEntry] {
        self.gratitude.list()
    }

    pub fn get_gratitude_entry(&self, id: &str) -> Option<&GratitudeEntry> {
        self.gratitude.find(id)
    }

    pub fn save_gratitude_entry(
        &mut self,
        draft: GratitudeDraft,
    ) -> Result<Upserted<GratitudeEntry>, ValidationError> {
        draft.validate()?;
        let now = Utc::now();
        let language = self.language();
        let id = draft.id.unwrap_or_else(new_id);
        let person_name = match draft.kind {
            GratitudeKind::Other => normalize_optional(draft.person_name),
            GratitudeKind::Personal => None,
        };
        let title = non_blank(draft.title).unwrap_or_else(|| {
            default_gratitude_title(language, draft.kind, person_name.as_deref())
        });

        let entry = GratitudeEntry {
            id,
            kind: draft.kind,
            title,
            action: draft.action,
            feeling: draft.feeling,
            need: draft.need,
            context: normalize_optional(draft.context),
            person_name,
            date_created: now,
            date_modified: now,
            language,
            tags: normalize_tags(&draft.tags),
        };
        Ok(self.commit_gratitude(entry, now))
    }

    pub fn upsert_gratitude_entry(
        &mut self,
        mut entry: GratitudeEntry,
    ) -> Result<Upserted<GratitudeEntry>, ValidationError> {
        entry.validate()?;
        if entry.kind == GratitudeKind::Personal {
            entry.person_name = None;
        }
        entry.tags = normalize_tags(&entry.tags);
        Ok(self.commit_gratitude(entry, Utc::now()))
    }

    pub fn delete_gratitude_entry(&mut self, id: &str) -> Option<PendingWrite> {
        let write = self.gratitude.remove(&self.store, id)?;
        self.listeners.notify(StateChange::GratitudeEntries);
        Some(write)
    }

    fn commit_gratitude(
        &mut self,
        entry: GratitudeEntry,
        now: Timestamp,
    ) -> Upserted<GratitudeEntry> {
        let upserted = self.gratitude.upsert_at(&self.store, entry, now);
        self.listeners.notify(StateChange::GratitudeEntries);
        upserted
    }

    // --- Empathy maps ---

    pub fn empathy_maps(&self) -> &[EmpathyMap] {
        self.empathy_maps.list()
    }

    pub fn get_empathy_map(&self, id: &str) -> Option<&EmpathyMap> {
        self.empathy_maps.find(id)
    }

    pub fn save_empathy_map(
        &mut self,
        draft: EmpathyMapDraft,
    ) -> Result<Upserted<EmpathyMap>, ValidationError> {
        draft.validate()?;
        let now = Utc::now();
        let id = draft.id.unwrap_or_else(new_id);

        let map = EmpathyMap {
            id,
            title: draft.title.trim().to_string(),
            situation: draft.situation,
            thinks: draft.thinks,
            feels: draft.feels,
            sees: draft.sees,
            says: draft.says,
            does: draft.does,
            pains: draft.pains,
            gains: draft.gains,
            date_created: now,
            date_modified: now,
        };
        Ok(self.commit_empathy_map(map, now))
    }

    pub fn upsert_empathy_map(
        &mut self,
        map: EmpathyMap,
    ) -> Result<Upserted<EmpathyMap>, ValidationError> {
        map.validate()?;
        Ok(self.commit_empathy_map(map, Utc::now()))
    }

    pub fn delete_empathy_map(&mut self, id: &str) -> Option<PendingWrite> {
        let write = self.empathy_maps.remove(&self.store, id)?;
        self.listeners.notify(StateChange::EmpathyMaps);
        Some(write)
    }

    fn commit_empathy_map(&mut self, map: EmpathyMap, now: Timestamp) -> Upserted<EmpathyMap> {
        let upserted = self.empathy_maps.upsert_at(&self.store, map, now);
        self.listeners.notify(StateChange::EmpathyMaps);
        upserted
    }

    // --- Learning exercises ---

    pub fn completed_exercises(&self) -> &[CompletedExercise] {
        self.exercises.list()
    }

    pub fn is_exercise_completed(&self, exercise_id: &str) -> bool {
        self.exercises.contains(exercise_id.trim())
    }

    /// Marks an exercise complete. A written response is required but not kept.
    pub fn complete_exercise(
        &mut self,
        exercise_id: &str,
        response: &str,
    ) -> Result<Upserted<CompletedExercise>, ValidationError> {
        RequiredFields::new("exercise")
            .check("exerciseId", exercise_id)
            .check("response", response)
            .finish()?;

        let completed = CompletedExercise {
            exercise_id: exercise_id.trim().to_string(),
            date_completed: Utc::now(),
        };
        let upserted = self.exercises.upsert(&self.store, completed);
        self.listeners.notify(StateChange::ExerciseProgress);
        Ok(upserted)
    }

    pub fn reset_exercise(&mut self, exercise_id: &str) -> Option<PendingWrite> {
        let write = self.exercises.remove(&self.store, exercise_id.trim())?;
        self.listeners.notify(StateChange::ExerciseProgress);
        Some(write)
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn non_blank(value: String) -> Option<String> {
    normalize_optional(Some(value))
}

fn default_statement_title(language: Language, now: Timestamp) -> String {
    let date = now.format("%Y-%m-%d");
    match language {
        Language::En => format!("NVC Statement {date}"),
        Language::Lt => format!("NVC teiginys {date}"),
    }
}

fn default_gratitude_title(
    language: Language,
    kind: GratitudeKind,
    person_name: Option<&str>,
) -> String {
    match (kind, language) {
        (GratitudeKind::Personal, Language::En) => "Personal Gratitude".to_string(),
        (GratitudeKind::Personal, Language::Lt) => "Asmeninis dėkingumas".to_string(),
        (GratitudeKind::Other, Language::En) => {
            format!("Gratitude for {}", person_name.unwrap_or_default())
        }
        (GratitudeKind::Other, Language::Lt) => {
            format!("Dėkingumas {}", person_name.unwrap_or_default())
        }
    }
}
