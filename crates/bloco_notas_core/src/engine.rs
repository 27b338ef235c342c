//! Wiring of note store, preference store and views over one adapter.
//!
//! # Responsibility
//! - Open the device store and share it between both stores.
//! - Restore persisted state at startup.
//! - Offer the list/statistics projections UI layers render.

use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::model::note::Note;
use crate::storage::{KeyValueStore, SqliteKeyValueStore, StorageResult};
use crate::store::note_store::NoteStore;
use crate::store::preference_store::PreferenceStore;
use crate::view::query::ViewQuery;
use crate::view::stats::{stats, Statistics};
use crate::view::visible_notes;
use log::info;
use std::sync::Arc;

/// Application-level state owner.
pub struct NotesEngine<S: KeyValueStore, C: Clock = SystemClock> {
    notes: NoteStore<Arc<S>, C>,
    preferences: PreferenceStore<Arc<S>>,
}

impl NotesEngine<SqliteKeyValueStore> {
    /// Opens the device store at `config.db_path` and restores state.
    ///
    /// # Errors
    /// - Storage bootstrap failures (unopenable file, newer schema).
    pub fn open(config: &EngineConfig) -> StorageResult<Self> {
        let storage = SqliteKeyValueStore::open(&config.db_path)?;
        let mut engine = Self::new(Arc::new(storage));
        engine.load();
        Ok(engine)
    }
}

impl<S: KeyValueStore> NotesEngine<S> {
    /// Builds an engine with empty state. Call [`NotesEngine::load`] next.
    pub fn new(storage: Arc<S>) -> Self {
        Self::with_clock(storage, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> NotesEngine<S, C> {
    pub fn with_clock(storage: Arc<S>, clock: C) -> Self {
        Self {
            notes: NoteStore::with_clock(Arc::clone(&storage), clock),
            preferences: PreferenceStore::new(storage),
        }
    }

    /// Restores notes and the theme flag. Returns the restored note count.
    pub fn load(&mut self) -> usize {
        let count = self.notes.load();
        let dark_mode = self.preferences.load();
        info!("event=engine_load module=engine status=ok notes={count} dark_mode={dark_mode}");
        count
    }

    pub fn notes(&self) -> &NoteStore<Arc<S>, C> {
        &self.notes
    }

    pub fn notes_mut(&mut self) -> &mut NoteStore<Arc<S>, C> {
        &mut self.notes
    }

    pub fn preferences(&self) -> &PreferenceStore<Arc<S>> {
        &self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut PreferenceStore<Arc<S>> {
        &mut self.preferences
    }

    /// Visible notes for `query`, in display order.
    pub fn view(&self, query: &ViewQuery) -> Vec<&Note> {
        visible_notes(self.notes.notes(), query)
    }

    /// Statistics over the whole collection.
    pub fn stats(&self) -> Statistics {
        stats(self.notes.notes())
    }
}
