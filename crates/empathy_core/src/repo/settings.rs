//! Settings singleton persisted in its own slot.
//!
//! # Invariants
//! - Effective settings are always `defaults` merged with the persisted patch.
//! - Updates persist the full merged object, never just the patch.

use super::collection::{LoadStatus, PendingWrite};
use crate::kv::{read_json, KeyValueStore, Slot};
use crate::model::settings::{AppSettings, SettingsPatch};
use log::{error, info};

#[derive(Debug, Clone)]
pub struct SettingsStore {
    defaults: AppSettings,
    current: AppSettings,
}

impl SettingsStore {
    pub fn new(defaults: AppSettings) -> Self {
        Self {
            defaults,
            current: defaults,
        }
    }

    /// Defaults derived from the device locale at cold start.
    pub fn for_device_locale(locale: Option<&str>) -> Self {
        Self::new(AppSettings::defaults_for_locale(locale))
    }

    pub fn defaults(&self) -> AppSettings {
        self.defaults
    }

    pub fn current(&self) -> AppSettings {
        self.current
    }

    /// Reads persisted settings and merges them over the defaults.
    pub fn load<S: KeyValueStore + ?Sized>(&mut self, store: &S) -> LoadStatus {
        match read_json::<SettingsPatch, _>(store, Slot::Settings) {
            Ok(Some(patch)) => {
                self.current = self.defaults.merged(&patch);
                info!(
                    "event=settings_load module=repo status=ok theme={} language={}",
                    self.current.theme.code(),
                    self.current.language.code()
                );
                LoadStatus::Loaded(1)
            }
            Ok(None) => {
                self.current = self.defaults;
                info!(
                    "event=settings_load module=repo status=skip reason=absent language={}",
                    self.current.language.code()
                );
                LoadStatus::Missing
            }
            Err(err) => {
                self.current = self.defaults;
                error!(
                    "event=settings_load module=repo status=error error_code=settings_load_failed error={err}"
                );
                LoadStatus::Defaulted
            }
        }
    }

    /// Merges `patch` over the current settings and persists the result.
    pub fn update<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &S,
        patch: &SettingsPatch,
    ) -> (AppSettings, PendingWrite) {
        self.current = self.current.merged(patch);
        let write = PendingWrite::issue(store, Slot::Settings, &self.current, 1);
        (self.current, write)
    }
}
