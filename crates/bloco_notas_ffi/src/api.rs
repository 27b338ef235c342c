//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose note, view, statistics and theme operations to Dart via FRB.
//! - Own the single process-wide engine instance.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - The engine is opened once; later `notes_init` calls must name the same
//!   database path.
//! - Failures are reported through envelopes, never by aborting.

use bloco_notas_core::{
    category_labels, char_counter, core_version as core_version_inner, derive_preview,
    format_local_timestamp, init_logging as init_logging_inner, note_count_label,
    ping as ping_inner, Category, CategoryFilter, EmptyState, EngineConfig, Note, NotesEngine,
    SortMode, SqliteKeyValueStore, StoreError, ViewQuery, CONTENT_MAX_CHARS, TITLE_MAX_CHARS,
};
use log::warn;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

type DeviceEngine = NotesEngine<SqliteKeyValueStore>;

struct EngineSlot {
    db_path: PathBuf,
    engine: DeviceEngine,
}

static ENGINE: Mutex<Option<EngineSlot>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
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
/// Returns an empty string on success and the error message otherwise.
/// Repeating the call with the same `level + log_dir` is a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One note as rendered by a list card or the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Single-line card preview.
    pub preview: String,
    pub category: String,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
    /// Card footer date in the device zone.
    pub updated_label: String,
}

/// Result envelope for note mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    pub ok: bool,
    /// Affected note, when the operation yields one.
    pub note: Option<NoteItem>,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

impl NoteActionResponse {
    fn success(message: impl Into<String>, note: Option<NoteItem>) -> Self {
        Self {
            ok: true,
            note,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note: None,
            message: message.into(),
        }
    }
}

/// Visible list for the current search/filter/sort state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesViewResponse {
    pub items: Vec<NoteItem>,
    /// Header subtitle, counting the whole collection.
    pub count_label: String,
    /// Set when `items` is empty.
    pub empty_message: Option<String>,
    pub message: String,
}

/// Per-category count in the side panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryStatItem {
    pub label: String,
    pub count: u32,
}

/// Side panel statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesStatsResponse {
    pub total_notes: u32,
    pub total_chars: u64,
    pub categories: Vec<CategoryStatItem>,
}

/// Field limits and defaults for the note editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEditorLimits {
    pub title_max_chars: u32,
    pub content_max_chars: u32,
    /// Category preselected when creating a note.
    pub default_category: String,
}

/// Opens the engine on `db_path` (blank = configured default).
///
/// Returns an empty string on success and the error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_init(db_path: String) -> String {
    let requested = db_path.trim();
    let path = if requested.is_empty() {
        EngineConfig::from_env().db_path
    } else {
        PathBuf::from(requested)
    };

    match lock_engine() {
        Ok(mut slot) => match ensure_engine(&mut slot, path) {
            Ok(_) => String::new(),
            Err(err) => err,
        },
        Err(err) => err,
    }
}

/// Creates a note from editor input.
#[flutter_rust_bridge::frb(sync)]
pub fn note_create(title: String, content: String, category: String) -> NoteActionResponse {
    let result = with_engine(|engine| {
        engine
            .notes_mut()
            .create(&title, &content, &category)
            .map(|note| to_note_item(&note))
    });
    store_response(result, "Note created.", "note_create")
}

/// Replaces title, content and category of an existing note.
#[flutter_rust_bridge::frb(sync)]
pub fn note_update(id: i64, title: String, content: String, category: String) -> NoteActionResponse {
    let result = with_engine(|engine| {
        engine
            .notes_mut()
            .update(id, &title, &content, &category)
            .map(|note| to_note_item(&note))
    });
    store_response(result, "Note updated.", "note_update")
}

/// Deletes a note. Unknown ids succeed with a distinct message.
#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(id: i64) -> NoteActionResponse {
    match with_engine(|engine| engine.notes_mut().delete(id)) {
        Ok(true) => NoteActionResponse::success("Note deleted.", None),
        Ok(false) => NoteActionResponse::success("Note already absent.", None),
        Err(err) => NoteActionResponse::failure(format!("note_delete failed: {err}")),
    }
}

/// Deletes every note.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_clear_all() -> NoteActionResponse {
    match with_engine(|engine| engine.notes_mut().clear_all()) {
        Ok(()) => NoteActionResponse::success("All notes deleted.", None),
        Err(err) => NoteActionResponse::failure(format!("notes_clear_all failed: {err}")),
    }
}

/// Lists visible notes.
///
/// `category` is a chip label (`Todas` for all); `sort` is one of
/// `recent|oldest|alphabetical|category` and falls back to `recent`.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_view(search: String, category: String, sort: String) -> NotesViewResponse {
    let sort_mode = sort.parse::<SortMode>().unwrap_or_else(|err| {
        warn!("event=notes_view module=ffi status=fallback reason=\"{err}\"");
        SortMode::default()
    });
    let query = ViewQuery::new(search, CategoryFilter::from_label(&category), sort_mode);

    let result = with_engine(|engine| {
        let items = engine
            .view(&query)
            .into_iter()
            .map(to_note_item)
            .collect::<Vec<_>>();
        (items, engine.notes().len())
    });

    match result {
        Ok((items, total)) => {
            let empty_message = items
                .is_empty()
                .then(|| EmptyState::for_query(&query).message().to_string());
            let message = format!("Showing {} of {total} note(s).", items.len());
            NotesViewResponse {
                items,
                count_label: note_count_label(total),
                empty_message,
                message,
            }
        }
        Err(err) => NotesViewResponse {
            items: Vec::new(),
            count_label: note_count_label(0),
            empty_message: None,
            message: format!("notes_view failed: {err}"),
        },
    }
}

/// Statistics over the whole collection. Zeroes when the engine is unusable.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_stats() -> NotesStatsResponse {
    let stats = match with_engine(|engine| engine.stats()) {
        Ok(stats) => stats,
        Err(err) => {
            warn!("event=notes_stats module=ffi status=error error={err}");
            bloco_notas_core::stats(&[])
        }
    };

    NotesStatsResponse {
        total_notes: saturating_u32(stats.total_notes),
        total_chars: u64::try_from(stats.total_chars).unwrap_or(u64::MAX),
        categories: stats
            .category_stats
            .iter()
            .map(|entry| CategoryStatItem {
                label: entry.category.label().to_string(),
                count: saturating_u32(entry.count),
            })
            .collect(),
    }
}

/// Current theme flag (`false` = light).
#[flutter_rust_bridge::frb(sync)]
pub fn theme_is_dark() -> bool {
    with_engine(|engine| engine.preferences().is_dark_mode()).unwrap_or(false)
}

/// Flips the theme flag and returns the new value.
#[flutter_rust_bridge::frb(sync)]
pub fn theme_toggle() -> bool {
    with_engine(|engine| engine.preferences_mut().toggle()).unwrap_or(false)
}

/// Built-in category labels in display order.
#[flutter_rust_bridge::frb(sync)]
pub fn note_categories() -> Vec<String> {
    category_labels().into_iter().map(str::to_string).collect()
}

/// Editor limits. The engine itself accepts longer text.
#[flutter_rust_bridge::frb(sync)]
pub fn note_editor_limits() -> NoteEditorLimits {
    NoteEditorLimits {
        title_max_chars: saturating_u32(TITLE_MAX_CHARS),
        content_max_chars: saturating_u32(CONTENT_MAX_CHARS),
        default_category: Category::default_for_new_note().label().to_string(),
    }
}

/// `"n/max"` counter under an editor field.
#[flutter_rust_bridge::frb(sync)]
pub fn note_char_counter(text: String, max_chars: u32) -> String {
    char_counter(&text, max_chars as usize)
}

fn lock_engine() -> Result<MutexGuard<'static, Option<EngineSlot>>, String> {
    ENGINE
        .lock()
        .map_err(|_| "engine lock poisoned".to_string())
}

fn ensure_engine(
    slot: &mut Option<EngineSlot>,
    db_path: PathBuf,
) -> Result<&mut DeviceEngine, String> {
    if let Some(active) = slot.as_ref() {
        if active.db_path != db_path {
            return Err(format!(
                "engine already open at `{}`; refusing to switch to `{}`",
                active.db_path.display(),
                db_path.display()
            ));
        }
    } else {
        let config = EngineConfig {
            db_path: db_path.clone(),
            ..EngineConfig::from_env()
        };
        let engine =
            DeviceEngine::open(&config).map_err(|err| format!("engine open failed: {err}"))?;
        *slot = Some(EngineSlot { db_path, engine });
    }

    slot.as_mut()
        .map(|active| &mut active.engine)
        .ok_or_else(|| "engine slot empty after init".to_string())
}

fn with_engine<T>(f: impl FnOnce(&mut DeviceEngine) -> T) -> Result<T, String> {
    let mut slot = lock_engine()?;
    let db_path = match slot.as_ref() {
        Some(active) => active.db_path.clone(),
        None => EngineConfig::from_env().db_path,
    };
    let engine = ensure_engine(&mut slot, db_path)?;
    Ok(f(engine))
}

fn store_response(
    result: Result<Result<NoteItem, StoreError>, String>,
    success_message: &str,
    operation: &str,
) -> NoteActionResponse {
    match result {
        Ok(Ok(item)) => NoteActionResponse::success(success_message, Some(item)),
        Ok(Err(err)) => NoteActionResponse::failure(format!("{operation} rejected: {err}")),
        Err(err) => NoteActionResponse::failure(format!("{operation} failed: {err}")),
    }
}

fn to_note_item(note: &Note) -> NoteItem {
    NoteItem {
        id: note.id,
        title: note.title.clone(),
        content: note.content.clone(),
        preview: derive_preview(&note.content).unwrap_or_default(),
        category: note.category.clone(),
        created_at_ms: note.created_at.timestamp_millis(),
        updated_at_ms: note.updated_at.timestamp_millis(),
        updated_label: format_local_timestamp(&note.updated_at),
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, note_categories, note_char_counter, note_create, note_delete,
        note_editor_limits, note_update, notes_init, notes_stats, notes_view, ping, theme_is_dark,
        theme_toggle,
    };
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn test_db_path() -> PathBuf {
        std::env::temp_dir().join(format!(
            "bloco-notas-ffi-test-{}.sqlite3",
            std::process::id()
        ))
    }

    fn init_test_engine() {
        let error = notes_init(test_db_path().to_string_lossy().into_owned());
        assert!(error.is_empty(), "{error}");
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}{nanos}")
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "/tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn notes_init_is_idempotent_and_rejects_other_path() {
        init_test_engine();
        init_test_engine();
        let error = notes_init("/definitely/another/path.sqlite3".to_string());
        assert!(error.contains("refusing to switch"), "{error}");
    }

    #[test]
    fn create_then_view_finds_note_by_search() {
        init_test_engine();
        let token = unique_token("ffisearch");
        let created = note_create(
            format!("Title {token}"),
            "body text".to_string(),
            "💡 Ideias".to_string(),
        );
        assert!(created.ok, "{}", created.message);
        let note = created.note.expect("created note should be returned");

        let view = notes_view(token.to_uppercase(), "Todas".to_string(), "recent".to_string());
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].id, note.id);
        assert_eq!(view.items[0].preview, "body text");
        assert!(view.empty_message.is_none());
    }

    #[test]
    fn create_rejects_blank_title() {
        init_test_engine();
        let response = note_create("  ".to_string(), "body".to_string(), "x".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("title"), "{}", response.message);
    }

    #[test]
    fn update_and_delete_round_trip() {
        init_test_engine();
        let token = unique_token("ffiupdate");
        let created = note_create(token.clone(), "v1".to_string(), "📌 Outros".to_string());
        let id = created.note.expect("note").id;

        let updated = note_update(id, token.clone(), "v2".to_string(), "📌 Outros".to_string());
        assert!(updated.ok, "{}", updated.message);
        assert_eq!(updated.note.expect("note").content, "v2");

        let missing = note_update(-1, "t".to_string(), "c".to_string(), "x".to_string());
        assert!(!missing.ok);
        assert!(missing.message.contains("not found"));

        assert!(note_delete(id).ok);
        let again = note_delete(id);
        assert!(again.ok);
        assert_eq!(again.message, "Note already absent.");

        let view = notes_view(token, "Todas".to_string(), "recent".to_string());
        assert!(view.items.is_empty());
        assert!(view.empty_message.is_some());
    }

    #[test]
    fn stats_list_every_category() {
        init_test_engine();
        let stats = notes_stats();
        assert_eq!(stats.categories.len(), 5);
        assert_eq!(stats.categories[0].label, "📝 Pessoal");
        assert_eq!(note_categories().len(), 5);
    }

    #[test]
    fn editor_limits_expose_default_category() {
        let limits = note_editor_limits();
        assert_eq!(limits.title_max_chars, 50);
        assert_eq!(limits.content_max_chars, 500);
        assert_eq!(limits.default_category, "📝 Pessoal");
        assert_eq!(
            note_char_counter("olá mundo".to_string(), limits.title_max_chars),
            "9/50"
        );
    }

    #[test]
    fn theme_toggle_flips_flag() {
        init_test_engine();
        let before = theme_is_dark();
        assert_eq!(theme_toggle(), !before);
        assert_eq!(theme_is_dark(), !before);
        theme_toggle();
    }

    #[test]
    fn unknown_sort_mode_falls_back_to_recent() {
        init_test_engine();
        let view = notes_view(String::new(), "Todas".to_string(), "newest".to_string());
        assert!(view.message.starts_with("Showing"));
    }
}
