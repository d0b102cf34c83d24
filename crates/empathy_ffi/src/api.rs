//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Own the single process-wide [`AppState`] behind a mutex.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - The first call that needs state opens the default database lazily.
//! - Enum-like values cross the boundary as lowercase string codes.

use empathy_core::search::journal::{most_recent_first, search_gratitude, search_statements};
use empathy_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AppState, BootstrapOptions, CompletedExercise, EmpathyMap, EmpathyMapDraft, FavoriteItem,
    GratitudeDraft, GratitudeEntry, GratitudeFilter, GratitudeKind, ItemType, Language,
    LoadStatus, NvcStatement, PendingWrite, SettingsPatch, SqliteKvStore, StatementDraft, Theme,
    Upserted, ValidationError,
};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

const APP_DB_FILE_NAME: &str = "empathy_app.sqlite3";
const APP_DB_PATH_ENV: &str = "EMPATHY_DB_PATH";

static APP: OnceLock<Mutex<Option<OpenApp>>> = OnceLock::new();

struct OpenApp {
    path: PathBuf,
    device_locale: Option<String>,
    state: AppState<SqliteKvStore>,
}

impl OpenApp {
    /// Whether a request for `path` can reuse this state as-is.
    ///
    /// A request without a locale accepts whatever locale opened the state.
    fn serves(&self, path: &Path, device_locale: Option<&str>) -> bool {
        self.path == path
            && device_locale.map_or(true, |locale| self.device_locale.as_deref() == Some(locale))
    }
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the operation was accepted.
    pub ok: bool,
    /// Whether storage reflects the change. `ok && !durable` means the change
    /// lives in memory only until the next successful write.
    pub durable: bool,
    /// Id of the saved record, when the action saves one.
    pub id: Option<String>,
    /// Fields the UI should highlight after a rejected save.
    pub invalid_fields: Vec<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn written(message: impl Into<String>, id: Option<String>, write: &PendingWrite) -> Self {
        let mut message = message.into();
        if let Some(err) = write.error() {
            message = format!("{message} Storage write failed: {err}");
        }
        Self {
            ok: true,
            durable: write.is_durable(),
            id,
            invalid_fields: Vec::new(),
            message,
        }
    }

    fn unchanged(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            durable: true,
            id: None,
            invalid_fields: Vec::new(),
            message: message.into(),
        }
    }

    fn invalid(err: &ValidationError) -> Self {
        Self {
            ok: false,
            durable: true,
            id: None,
            invalid_fields: err.fields().into_iter().map(str::to_string).collect(),
            message: err.to_string(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            durable: false,
            id: None,
            invalid_fields: Vec::new(),
            message: message.into(),
        }
    }

    fn from_upsert<T>(
        result: Result<Upserted<T>, ValidationError>,
        id_of: impl Fn(&T) -> String,
    ) -> Self {
        match result {
            Ok(upserted) => {
                let message = if upserted.replaced { "Updated." } else { "Saved." };
                Self::written(message, Some(id_of(&upserted.record)), &upserted.write)
            }
            Err(err) => Self::invalid(&err),
        }
    }

    fn from_removal(removed: Option<PendingWrite>) -> Self {
        match removed {
            Some(write) => Self::written("Deleted.", None, &write),
            None => Self::unchanged("Nothing to delete."),
        }
    }
}

/// Opens (or reopens) the app database and loads every slot.
///
/// Input semantics:
/// - `db_path`: database file; falls back to `EMPATHY_DB_PATH`, then the
///   temp directory.
/// - `device_locale`: locale tag such as `lt-LT`, used for default settings.
///
/// # FFI contract
/// - Reopening the already-open path is a no-op, unless a different
///   `device_locale` is given: the state is then bootstrapped again so
///   defaults follow the locale (for example after an earlier call opened
///   the database lazily without one).
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn app_open(db_path: Option<String>, device_locale: Option<String>) -> ActionResponse {
    let path = db_path
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(default_db_path);
    let options = BootstrapOptions { device_locale };

    let mut guard = match lock_app() {
        Ok(guard) => guard,
        Err(message) => return ActionResponse::failure(message),
    };
    if guard
        .as_ref()
        .is_some_and(|open| open.serves(&path, options.device_locale.as_deref()))
    {
        return ActionResponse::unchanged("Already open.");
    }

    match open_app(path, &options) {
        Ok(open) => {
            let message = load_summary(open.state.load_report());
            *guard = Some(open);
            ActionResponse::unchanged(message)
        }
        Err(message) => ActionResponse::failure(message),
    }
}

/// Drops the in-memory state; the next call reopens from storage.
#[flutter_rust_bridge::frb(sync)]
pub fn app_close() -> ActionResponse {
    match lock_app() {
        Ok(mut guard) => {
            let was_open = guard.take().is_some();
            ActionResponse::unchanged(if was_open { "Closed." } else { "Not open." })
        }
        Err(message) => ActionResponse::failure(message),
    }
}

/// Effective settings as string codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsDto {
    /// `light|dark`.
    pub theme: String,
    /// `en|lt`.
    pub language: String,
}

#[flutter_rust_bridge::frb(sync)]
pub fn settings_get() -> Option<SettingsDto> {
    with_app(|state| {
        let settings = state.settings();
        SettingsDto {
            theme: settings.theme.code().to_string(),
            language: settings.language.code().to_string(),
        }
    })
    .ok()
}

/// Applies a partial settings update; `None` fields keep their value.
#[flutter_rust_bridge::frb(sync)]
pub fn settings_update(theme: Option<String>, language: Option<String>) -> ActionResponse {
    let theme = match theme.as_deref().map(|code| Theme::from_code(code).ok_or(code)) {
        Some(Err(code)) => return ActionResponse::failure(format!("unknown theme `{code}`")),
        Some(Ok(theme)) => Some(theme),
        None => None,
    };
    let language = match language
        .as_deref()
        .map(|code| Language::from_code(code).ok_or(code))
    {
        Some(Err(code)) => return ActionResponse::failure(format!("unknown language `{code}`")),
        Some(Ok(language)) => Some(language),
        None => None,
    };

    let patch = SettingsPatch { theme, language };
    run(|state| {
        let (_, write) = state.update_settings(&patch);
        ActionResponse::written("Settings updated.", None, &write)
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteDto {
    pub item_id: String,
    /// `need|emotion`.
    pub item_type: String,
    pub date_added_epoch_ms: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteToggleResponse {
    pub ok: bool,
    /// Favorite state after the toggle.
    pub is_favorite: bool,
    pub message: String,
}

/// Favorites in the order they were added.
#[flutter_rust_bridge::frb(sync)]
pub fn favorites_list() -> Vec<FavoriteDto> {
    with_app(|state| state.favorites().iter().map(to_favorite_dto).collect()).unwrap_or_default()
}

#[flutter_rust_bridge::frb(sync)]
pub fn favorite_is(item_id: String, item_type: String) -> bool {
    let Some(item_type) = ItemType::from_code(&item_type) else {
        return false;
    };
    with_app(|state| state.is_favorite(&item_id, item_type)).unwrap_or(false)
}

#[flutter_rust_bridge::frb(sync)]
pub fn favorite_toggle(item_id: String, item_type: String) -> FavoriteToggleResponse {
    let Some(kind) = ItemType::from_code(&item_type) else {
        return FavoriteToggleResponse {
            ok: false,
            is_favorite: false,
            message: format!("unknown item type `{item_type}`"),
        };
    };
    match with_app(|state| state.toggle_favorite(&item_id, kind)) {
        Ok((is_favorite, write)) => FavoriteToggleResponse {
            ok: true,
            is_favorite,
            message: match write.as_ref().and_then(PendingWrite::error) {
                Some(err) => format!("Storage write failed: {err}"),
                None => String::new(),
            },
        },
        Err(message) => FavoriteToggleResponse {
            ok: false,
            is_favorite: false,
            message,
        },
    }
}

/// NVC statement as shown in lists and the detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementDto {
    pub id: String,
    pub title: String,
    pub observation: String,
    pub feeling: String,
    pub need: String,
    pub request: String,
    pub context: Option<String>,
    pub language: String,
    pub tags: Vec<String>,
    pub date_created_epoch_ms: i64,
    pub date_modified_epoch_ms: i64,
}

/// Saves wizard input. `id = None` creates a statement.
#[flutter_rust_bridge::frb(sync)]
#[allow(clippy::too_many_arguments)]
pub fn nvc_statement_save(
    id: Option<String>,
    title: String,
    observation: String,
    feeling: String,
    need: String,
    request: String,
    context: Option<String>,
    tags: Vec<String>,
) -> ActionResponse {
    let draft = StatementDraft {
        id: normalize_id(id),
        title,
        observation,
        feeling,
        need,
        request,
        context,
        tags,
    };
    run(|state| {
        ActionResponse::from_upsert(state.save_nvc_statement(draft), |s| s.id.clone())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn nvc_statement_delete(id: String) -> ActionResponse {
    run(|state| ActionResponse::from_removal(state.delete_nvc_statement(id.trim())))
}

/// Statements matching `query`, most recently modified first.
#[flutter_rust_bridge::frb(sync)]
pub fn nvc_statements_list(query: Option<String>) -> Vec<StatementDto> {
    with_app(|state| {
        let hits = search_statements(state.nvc_statements(), query.as_deref().unwrap_or_default());
        most_recent_first(hits)
            .into_iter()
            .map(to_statement_dto)
            .collect()
    })
    .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GratitudeDto {
    pub id: String,
    /// `personal|other`.
    pub kind: String,
    pub title: String,
    pub action: String,
    pub feeling: String,
    pub need: String,
    pub context: Option<String>,
    pub person_name: Option<String>,
    pub language: String,
    pub tags: Vec<String>,
    pub date_created_epoch_ms: i64,
    pub date_modified_epoch_ms: i64,
}

/// Saves a gratitude entry. `kind` is `personal|other`.
#[flutter_rust_bridge::frb(sync)]
#[allow(clippy::too_many_arguments)]
pub fn gratitude_save(
    id: Option<String>,
    kind: String,
    title: String,
    action: String,
    feeling: String,
    need: String,
    context: Option<String>,
    person_name: Option<String>,
    tags: Vec<String>,
) -> ActionResponse {
    let Some(kind) = GratitudeKind::from_code(&kind) else {
        return ActionResponse::failure(format!("unknown gratitude type `{kind}`"));
    };
    let draft = GratitudeDraft {
        id: normalize_id(id),
        kind,
        title,
        action,
        feeling,
        need,
        context,
        person_name,
        tags,
    };
    run(|state| {
        ActionResponse::from_upsert(state.save_gratitude_entry(draft), |e| e.id.clone())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn gratitude_delete(id: String) -> ActionResponse {
    run(|state| ActionResponse::from_removal(state.delete_gratitude_entry(id.trim())))
}

/// Entries for the `all|personal|other` tab matching `query`, newest first.
#[flutter_rust_bridge::frb(sync)]
pub fn gratitude_list(filter: Option<String>, query: Option<String>) -> Vec<GratitudeDto> {
    let filter = match filter.as_deref().map(str::trim) {
        Some("personal") => GratitudeFilter::Personal,
        Some("other") => GratitudeFilter::Other,
        _ => GratitudeFilter::All,
    };
    with_app(|state| {
        let hits = search_gratitude(
            state.gratitude_entries(),
            filter,
            query.as_deref().unwrap_or_default(),
        );
        most_recent_first(hits)
            .into_iter()
            .map(to_gratitude_dto)
            .collect()
    })
    .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmpathyMapDto {
    pub id: String,
    pub title: String,
    pub situation: String,
    pub thinks: String,
    pub feels: String,
    pub sees: String,
    pub says: String,
    pub does: String,
    pub pains: String,
    pub gains: String,
    pub date_created_epoch_ms: i64,
    pub date_modified_epoch_ms: i64,
}

/// Saves an empathy map; only `title` is required.
#[flutter_rust_bridge::frb(sync)]
pub fn empathy_map_save(map: EmpathyMapDto) -> ActionResponse {
    let draft = EmpathyMapDraft {
        id: normalize_id(Some(map.id)),
        title: map.title,
        situation: map.situation,
        thinks: map.thinks,
        feels: map.feels,
        sees: map.sees,
        says: map.says,
        does: map.does,
        pains: map.pains,
        gains: map.gains,
    };
    run(|state| ActionResponse::from_upsert(state.save_empathy_map(draft), |m| m.id.clone()))
}

#[flutter_rust_bridge::frb(sync)]
pub fn empathy_map_delete(id: String) -> ActionResponse {
    run(|state| ActionResponse::from_removal(state.delete_empathy_map(id.trim())))
}

#[flutter_rust_bridge::frb(sync)]
pub fn empathy_maps_list() -> Vec<EmpathyMapDto> {
    with_app(|state| {
        most_recent_first(state.empathy_maps())
            .into_iter()
            .map(to_empathy_map_dto)
            .collect()
    })
    .unwrap_or_default()
}

/// Marks a learning exercise complete. `response` must be non-blank.
#[flutter_rust_bridge::frb(sync)]
pub fn exercise_complete(exercise_id: String, response: String) -> ActionResponse {
    run(|state| {
        ActionResponse::from_upsert(state.complete_exercise(&exercise_id, &response), |done| {
            done.exercise_id.clone()
        })
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn exercise_reset(exercise_id: String) -> ActionResponse {
    run(|state| ActionResponse::from_removal(state.reset_exercise(&exercise_id)))
}

/// Ids of completed exercises, in completion order.
#[flutter_rust_bridge::frb(sync)]
pub fn exercises_completed() -> Vec<String> {
    with_app(|state| {
        state
            .completed_exercises()
            .iter()
            .map(|done: &CompletedExercise| done.exercise_id.clone())
            .collect()
    })
    .unwrap_or_default()
}

fn default_db_path() -> PathBuf {
    if let Ok(raw) = std::env::var(APP_DB_PATH_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(APP_DB_FILE_NAME)
}

fn lock_app() -> Result<std::sync::MutexGuard<'static, Option<OpenApp>>, String> {
    APP.get_or_init(|| Mutex::new(None))
        .lock()
        .map_err(|_| "app state lock poisoned".to_string())
}

fn open_app(path: PathBuf, options: &BootstrapOptions) -> Result<OpenApp, String> {
    let store = SqliteKvStore::open(&path).map_err(|err| {
        warn!(
            "event=app_open module=ffi status=error path={} error={err}",
            path.display()
        );
        format!("app DB open failed: {err}")
    })?;
    let state = AppState::bootstrap(store, options);
    info!(
        "event=app_open module=ffi status=ok path={} language={}",
        path.display(),
        state.language().code()
    );
    Ok(OpenApp {
        path,
        device_locale: options.device_locale.clone(),
        state,
    })
}

/// Runs `f` against the open state, opening the default database first if needed.
fn with_app<R>(f: impl FnOnce(&mut AppState<SqliteKvStore>) -> R) -> Result<R, String> {
    let mut guard = lock_app()?;
    if guard.is_none() {
        *guard = Some(open_app(default_db_path(), &BootstrapOptions::default())?);
    }
    match guard.as_mut() {
        Some(open) => Ok(f(&mut open.state)),
        None => Err("app state unavailable".to_string()),
    }
}

fn run(f: impl FnOnce(&mut AppState<SqliteKvStore>) -> ActionResponse) -> ActionResponse {
    with_app(f).unwrap_or_else(|message| ActionResponse::failure(message))
}

fn normalize_id(id: Option<String>) -> Option<String> {
    id.map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

fn load_summary(report: &[(empathy_core::Slot, LoadStatus)]) -> String {
    let defaulted: Vec<&str> = report
        .iter()
        .filter(|(_, status)| *status == LoadStatus::Defaulted)
        .map(|(slot, _)| slot.name())
        .collect();
    if defaulted.is_empty() {
        "Opened.".to_string()
    } else {
        format!("Opened; reset unreadable slots: {}.", defaulted.join(", "))
    }
}

fn to_favorite_dto(favorite: &FavoriteItem) -> FavoriteDto {
    FavoriteDto {
        item_id: favorite.item_id.clone(),
        item_type: favorite.item_type.code().to_string(),
        date_added_epoch_ms: favorite.date_added.timestamp_millis(),
    }
}

fn to_statement_dto(statement: &NvcStatement) -> StatementDto {
    StatementDto {
        id: statement.id.clone(),
        title: statement.title.clone(),
        observation: statement.observation.clone(),
        feeling: statement.feeling.clone(),
        need: statement.need.clone(),
        request: statement.request.clone(),
        context: statement.context.clone(),
        language: statement.language.code().to_string(),
        tags: statement.tags.clone(),
        date_created_epoch_ms: statement.date_created.timestamp_millis(),
        date_modified_epoch_ms: statement.date_modified.timestamp_millis(),
    }
}

fn to_gratitude_dto(entry: &GratitudeEntry) -> GratitudeDto {
    GratitudeDto {
        id: entry.id.clone(),
        kind: entry.kind.code().to_string(),
        title: entry.title.clone(),
        action: entry.action.clone(),
        feeling: entry.feeling.clone(),
        need: entry.need.clone(),
        context: entry.context.clone(),
        person_name: entry.person_name.clone(),
        language: entry.language.code().to_string(),
        tags: entry.tags.clone(),
        date_created_epoch_ms: entry.date_created.timestamp_millis(),
        date_modified_epoch_ms: entry.date_modified.timestamp_millis(),
    }
}

fn to_empathy_map_dto(map: &EmpathyMap) -> EmpathyMapDto {
    EmpathyMapDto {
        id: map.id.clone(),
        title: map.title.clone(),
        situation: map.situation.clone(),
        thinks: map.thinks.clone(),
        feels: map.feels.clone(),
        sees: map.sees.clone(),
        says: map.says.clone(),
        does: map.does.clone(),
        pains: map.pains.clone(),
        gains: map.gains.clone(),
        date_created_epoch_ms: map.date_created.timestamp_millis(),
        date_modified_epoch_ms: map.date_modified.timestamp_millis(),
    }
}
