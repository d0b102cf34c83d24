mod common;

use common::{at, MemoryStore};
use empathy_core::repo::{FavoritesStore, SettingsStore};
use empathy_core::{ItemType, Language, LoadStatus, SettingsPatch, Slot, Theme};

#[test]
fn favorites_are_unique_per_item_and_type() {
    let store = MemoryStore::new();
    let mut favorites = FavoritesStore::new();

    assert!(favorites
        .add_at(&store, "trust", ItemType::Need, at(10, 0))
        .is_some());
    assert!(favorites
        .add_at(&store, "trust", ItemType::Need, at(10, 5))
        .is_none());
    // Same id under another kind is a distinct favorite.
    assert!(favorites
        .add_at(&store, "trust", ItemType::Emotion, at(10, 6))
        .is_some());

    assert_eq!(favorites.len(), 2);
    assert_eq!(
        favorites.get("trust", ItemType::Need).unwrap().date_added,
        at(10, 0)
    );
    assert_eq!(store.writes(), 2);
}

#[test]
fn favorites_persist_with_legacy_shape() {
    let store = MemoryStore::new();
    let mut favorites = FavoritesStore::new();
    favorites.add_at(&store, "joy", ItemType::Emotion, at(12, 0));

    let raw = store.raw(Slot::Favorites.key()).unwrap();
    assert!(raw.contains(r#""id":"joy""#));
    assert!(raw.contains(r#""type":"emotion""#));
    assert!(raw.contains(r#""dateAdded":"2024-06-01T12:00:00"#));

    let mut reloaded = FavoritesStore::new();
    assert_eq!(reloaded.load(&store), LoadStatus::Loaded(1));
    assert!(reloaded.is_favorite("joy", ItemType::Emotion));
}

#[test]
fn remove_and_toggle_favorites() {
    let store = MemoryStore::new();
    let mut favorites = FavoritesStore::new();

    assert!(favorites.remove(&store, "rest", ItemType::Need).is_none());
    assert_eq!(store.writes(), 0);

    let (now_favorite, write) = favorites.toggle(&store, "rest", ItemType::Need);
    assert!(now_favorite);
    assert!(write.unwrap().is_durable());

    let (now_favorite, write) = favorites.toggle(&store, "rest", ItemType::Need);
    assert!(!now_favorite);
    assert!(write.is_some());
    assert!(favorites.is_empty());
    assert_eq!(store.raw(Slot::Favorites.key()).as_deref(), Some("[]"));
}

#[test]
fn settings_default_from_device_locale() {
    let store = MemoryStore::new();
    let mut settings = SettingsStore::for_device_locale(Some("lt-LT"));

    assert_eq!(settings.load(&store), LoadStatus::Missing);
    assert_eq!(settings.current().language, Language::Lt);
    assert_eq!(settings.current().theme, Theme::Light);
}

#[test]
fn persisted_partial_settings_merge_over_defaults() {
    let store = MemoryStore::new();
    store.seed(Slot::Settings.key(), r#"{"theme":"dark"}"#);

    let mut settings = SettingsStore::for_device_locale(Some("lt"));
    assert_eq!(settings.load(&store), LoadStatus::Loaded(1));
    assert_eq!(settings.current().theme, Theme::Dark);
    assert_eq!(settings.current().language, Language::Lt);
}

#[test]
fn settings_update_persists_full_object() {
    let store = MemoryStore::new();
    let mut settings = SettingsStore::for_device_locale(None);
    settings.load(&store);

    let (current, write) = settings.update(&store, &SettingsPatch::language(Language::Lt));
    assert!(write.is_durable());
    assert_eq!(current.language, Language::Lt);
    assert_eq!(current.theme, Theme::Light);

    let raw = store.raw(Slot::Settings.key()).unwrap();
    assert_eq!(raw, r#"{"theme":"light","language":"lt"}"#);
}

#[test]
fn malformed_settings_fall_back_to_defaults() {
    let store = MemoryStore::new();
    store.seed(Slot::Settings.key(), r#"{"theme":"sepia"}"#);

    let mut settings = SettingsStore::for_device_locale(Some("en-US"));
    assert_eq!(settings.load(&store), LoadStatus::Defaulted);
    assert_eq!(settings.current(), settings.defaults());
}
