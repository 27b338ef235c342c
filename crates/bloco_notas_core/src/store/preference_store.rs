//! Theme preference store.
//!
//! Holds the dark mode flag under its own storage key, independent of the
//! note collection. Loading never fails: a missing or malformed record
//! keeps the light theme default.

use crate::storage::{KeyValueStore, DARK_MODE_STORAGE_KEY};
use crate::store::codec::{decode_dark_mode, encode_dark_mode};
use crate::store::{PersistError, PersistStatus};
use log::{error, info, warn};

pub struct PreferenceStore<S: KeyValueStore> {
    storage: S,
    key: String,
    dark_mode: bool,
    last_persist: PersistStatus,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    /// Creates a store in light mode. Call [`PreferenceStore::load`] to
    /// restore the persisted flag.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            key: DARK_MODE_STORAGE_KEY.to_string(),
            dark_mode: false,
            last_persist: PersistStatus::NotAttempted,
        }
    }

    /// Overrides the storage key the flag is persisted under.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn is_dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn last_persist(&self) -> &PersistStatus {
        &self.last_persist
    }

    /// Flips the flag and persists it. Returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.set_dark_mode(!self.dark_mode);
        self.dark_mode
    }

    /// Sets the flag and persists it.
    pub fn set_dark_mode(&mut self, enabled: bool) {
        self.dark_mode = enabled;
        info!("event=theme_set module=preferences status=ok dark_mode={enabled}");
        self.persist();
    }

    /// Restores the persisted flag, defaulting to `false`.
    pub fn load(&mut self) -> bool {
        self.dark_mode = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => match decode_dark_mode(&raw) {
                Ok(value) => value,
                Err(err) => {
                    warn!(
                        "event=theme_load module=preferences status=malformed key={} error={err}",
                        self.key
                    );
                    false
                }
            },
            Ok(None) => false,
            Err(err) => {
                error!(
                    "event=theme_load module=preferences status=error key={} error={err}",
                    self.key
                );
                false
            }
        };
        self.dark_mode
    }

    fn persist(&mut self) {
        let result = encode_dark_mode(self.dark_mode).and_then(|payload| {
            self.storage
                .set_item(&self.key, &payload)
                .map(|()| payload.len())
                .map_err(PersistError::from)
        });
        if let Err(err) = &result {
            error!(
                "event=theme_persist module=preferences status=error key={} error={err}",
                self.key
            );
        }
        self.last_persist = PersistStatus::from_result(result);
    }
}
