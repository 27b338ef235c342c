//! Note store: sole owner and writer of the note collection.
//!
//! # Responsibility
//! - Create, update, delete and clear notes in memory.
//! - Persist the full collection after every mutating operation.
//! - Restore the collection from the persistence adapter on startup.
//!
//! # Invariants
//! - Note ids are unique and strictly increasing in allocation order.
//! - New notes are prepended; updates keep positions of all notes.
//! - Persist runs after every mutating call, including no-op deletes.
//! - Logs carry ids and counts only, never note text.

use crate::clock::{Clock, SystemClock};
use crate::model::note::{Note, NoteId, NoteInput};
use crate::storage::{KeyValueStore, NOTES_STORAGE_KEY};
use crate::store::codec::{decode_notes, encode_notes};
use crate::store::{
    PersistError, PersistStatus, StoreError, StoreEvent, StoreResult, Subscribers, SubscriptionId,
};
use chrono::{DateTime, Utc};
use log::{error, info, warn};

/// In-memory note collection bound to a persistence adapter.
pub struct NoteStore<S: KeyValueStore, C: Clock = SystemClock> {
    storage: S,
    clock: C,
    key: String,
    notes: Vec<Note>,
    last_persist: PersistStatus,
    subscribers: Subscribers,
}

impl<S: KeyValueStore> NoteStore<S> {
    /// Creates an empty store using the wall clock and the default key.
    ///
    /// Call [`NoteStore::load`] to restore persisted notes.
    pub fn new(storage: S) -> Self {
        Self::with_clock(storage, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> NoteStore<S, C> {
    /// Creates an empty store with an explicit time source.
    pub fn with_clock(storage: S, clock: C) -> Self {
        Self {
            storage,
            clock,
            key: NOTES_STORAGE_KEY.to_string(),
            notes: Vec::new(),
            last_persist: PersistStatus::NotAttempted,
            subscribers: Subscribers::default(),
        }
    }

    /// Overrides the storage key the collection is persisted under.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Notes in store order (newest creation first).
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Outcome of the persist step of the last mutating operation.
    pub fn last_persist(&self) -> &PersistStatus {
        &self.last_persist
    }

    /// Registers a listener called after each state change.
    pub fn subscribe(
        &mut self,
        listener: impl Fn(&StoreEvent) + Send + 'static,
    ) -> SubscriptionId {
        self.subscribers.add(Box::new(listener))
    }

    /// Removes a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    /// Creates a note from editor input and prepends it.
    ///
    /// # Errors
    /// - `StoreError::Validation` when title or content is blank.
    pub fn create(&mut self, title: &str, content: &str, category: &str) -> StoreResult<Note> {
        let input = NoteInput::parse(title, content, category).inspect_err(|err| {
            warn!("event=note_create module=store status=rejected reason=\"{err}\"");
        })?;

        let now = self.clock.now();
        let id = self.allocate_id(now);
        let note = Note::new(id, input.title, input.content, input.category, now);
        self.notes.insert(0, note.clone());
        info!(
            "event=note_create module=store status=ok note_id={id} total={}",
            self.notes.len()
        );

        self.persist();
        self.subscribers.notify(&StoreEvent::Created(id));
        Ok(note)
    }

    /// Replaces title, content and category of an existing note.
    ///
    /// Input is validated before the lookup, so blank input on an unknown id
    /// reports `Validation`.
    ///
    /// # Errors
    /// - `StoreError::Validation` when title or content is blank.
    /// - `StoreError::NotFound` when no note has `id`.
    pub fn update(
        &mut self,
        id: NoteId,
        title: &str,
        content: &str,
        category: &str,
    ) -> StoreResult<Note> {
        let input = NoteInput::parse(title, content, category).inspect_err(|err| {
            warn!("event=note_update module=store status=rejected note_id={id} reason=\"{err}\"");
        })?;

        let now = self.clock.now();
        let Some(note) = self.notes.iter_mut().find(|note| note.id == id) else {
            warn!("event=note_update module=store status=not_found note_id={id}");
            return Err(StoreError::NotFound(id));
        };
        note.apply(input, now);
        let updated = note.clone();
        info!("event=note_update module=store status=ok note_id={id}");

        self.persist();
        self.subscribers.notify(&StoreEvent::Updated(id));
        Ok(updated)
    }

    /// Removes the note with `id`. Unknown ids are a no-op.
    ///
    /// Returns whether a note was removed. The collection is persisted
    /// either way.
    pub fn delete(&mut self, id: NoteId) -> bool {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        let removed = self.notes.len() != before;
        info!(
            "event=note_delete module=store status={} note_id={id}",
            if removed { "ok" } else { "absent" }
        );

        self.persist();
        if removed {
            self.subscribers.notify(&StoreEvent::Deleted(id));
        }
        removed
    }

    /// Drops every note and persists an empty collection.
    pub fn clear_all(&mut self) {
        let removed = self.notes.len();
        self.notes.clear();
        info!("event=notes_clear module=store status=ok removed={removed}");

        self.persist();
        self.subscribers.notify(&StoreEvent::Cleared);
    }

    /// Replaces the collection with the persisted record.
    ///
    /// Missing record leaves the collection empty. Any read or decode
    /// failure is logged and also leaves the collection empty; nothing is
    /// written back. Returns the number of notes restored.
    pub fn load(&mut self) -> usize {
        self.notes = match self.read_persisted() {
            Ok(Some(notes)) => notes,
            Ok(None) => {
                info!("event=notes_load module=store status=empty key={}", self.key);
                Vec::new()
            }
            Err(err) => {
                error!(
                    "event=notes_load module=store status=error key={} error={err}",
                    self.key
                );
                Vec::new()
            }
        };

        let count = self.notes.len();
        if count > 0 {
            info!(
                "event=notes_load module=store status=ok key={} count={count}",
                self.key
            );
        }
        self.subscribers.notify(&StoreEvent::Loaded { count });
        count
    }

    fn read_persisted(&self) -> Result<Option<Vec<Note>>, PersistError> {
        match self.storage.get_item(&self.key)? {
            Some(raw) => decode_notes(&raw).map(Some),
            None => Ok(None),
        }
    }

    fn persist(&mut self) {
        let result = self.write_collection();
        if let Err(err) = &result {
            error!(
                "event=notes_persist module=store status=error key={} count={} error={err}",
                self.key,
                self.notes.len()
            );
        }
        self.last_persist = PersistStatus::from_result(result);
    }

    fn write_collection(&self) -> Result<usize, PersistError> {
        let payload = encode_notes(&self.notes)?;
        self.storage.set_item(&self.key, &payload)?;
        Ok(payload.len())
    }

    /// Millisecond timestamp id, bumped past the current maximum when the
    /// clock has not advanced (or went backwards).
    ///
    /// When the maximum is already `NoteId::MAX` the lowest free positive id
    /// is used instead.
    fn allocate_id(&self, now: DateTime<Utc>) -> NoteId {
        let candidate = now.timestamp_millis();
        match self.notes.iter().map(|note| note.id).max() {
            Some(max_id) if candidate <= max_id => max_id
                .checked_add(1)
                .unwrap_or_else(|| self.lowest_free_id()),
            _ => candidate,
        }
    }

    fn lowest_free_id(&self) -> NoteId {
        let mut used: Vec<NoteId> = self
            .notes
            .iter()
            .map(|note| note.id)
            .filter(|id| *id > 0)
            .collect();
        used.sort_unstable();

        let mut next: NoteId = 1;
        for id in used {
            if id == next {
                next += 1;
            } else if id > next {
                break;
            }
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::NoteStore;
    use crate::clock::ManualClock;
    use crate::storage::{MemoryKeyValueStore, NOTES_STORAGE_KEY};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn ids_stay_unique_when_clock_stalls() {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
        let mut store = NoteStore::with_clock(MemoryKeyValueStore::new(), &clock);

        let first = store.create("a", "A", "x").unwrap();
        let second = store.create("b", "B", "x").unwrap();
        clock.advance(Duration::seconds(-10));
        let third = store.create("c", "C", "x").unwrap();

        assert_eq!(second.id, first.id + 1);
        assert_eq!(third.id, second.id + 1);
    }

    #[test]
    fn id_follows_clock_when_it_advances() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let clock = ManualClock::new(start);
        let mut store = NoteStore::with_clock(MemoryKeyValueStore::new(), &clock);

        let first = store.create("a", "A", "x").unwrap();
        clock.advance(Duration::milliseconds(250));
        let second = store.create("b", "B", "x").unwrap();

        assert_eq!(first.id, start.timestamp_millis());
        assert_eq!(second.id, start.timestamp_millis() + 250);
    }

    #[test]
    fn id_after_max_value_falls_back_to_lowest_free_id() {
        let raw = format!(
            r#"[{{"id": {max}, "title": "top", "content": "c", "category": "x",
                 "createdAt": 0, "updatedAt": 0}},
               {{"id": 1, "title": "one", "content": "c", "category": "x",
                 "createdAt": 0, "updatedAt": 0}}]"#,
            max = i64::MAX
        );
        let storage = MemoryKeyValueStore::new().with_item(NOTES_STORAGE_KEY, raw);
        let mut store = NoteStore::new(&storage);
        assert_eq!(store.load(), 2);

        let first = store.create("a", "A", "x").unwrap();
        let second = store.create("b", "B", "x").unwrap();
        assert_eq!(first.id, 2);
        assert_eq!(second.id, 3);

        let mut reloaded = NoteStore::new(&storage);
        assert_eq!(reloaded.load(), 4);
    }
}
