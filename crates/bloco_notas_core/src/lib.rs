//! Core engine for Bloco de Notas.
//! This crate is the single source of truth for note data and its invariants.

pub mod clock;
pub mod config;
pub mod db;
pub mod engine;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::EngineConfig;
pub use engine::NotesEngine;
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::category::{category_labels, Category, ALL_CATEGORIES_LABEL};
pub use model::note::{
    Note, NoteId, NoteInput, NoteValidationError, CONTENT_MAX_CHARS, TITLE_MAX_CHARS,
};
pub use storage::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError, StorageResult,
    DARK_MODE_STORAGE_KEY, NOTES_STORAGE_KEY,
};
pub use store::note_store::NoteStore;
pub use store::preference_store::PreferenceStore;
pub use store::{PersistError, PersistStatus, StoreError, StoreEvent, StoreResult, SubscriptionId};
pub use view::display::{
    char_counter, derive_preview, format_local_timestamp, format_timestamp, note_count_label,
    EmptyState,
};
pub use view::filter::filter_notes;
pub use view::query::{CategoryFilter, ParseSortModeError, SortMode, ViewQuery};
pub use view::sort::{locale_compare, sort_notes};
pub use view::stats::{stats, CategoryCount, Statistics};
pub use view::visible_notes;

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
