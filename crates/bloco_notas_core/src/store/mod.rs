//! Owned, injectable stores for notes and the theme preference.
//!
//! # Responsibility
//! - Hold authoritative in-memory state and expose read/mutate operations.
//! - End every mutation with an explicit persist step whose outcome is
//!   observable through `last_persist()`.
//! - Notify subscribers after each state change.
//!
//! # Invariants
//! - Persistence failures never roll back or fail the in-memory mutation.
//! - Validation and not-found failures leave state untouched.

use crate::model::note::{NoteId, NoteValidationError};
use crate::storage::StorageError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod codec;
pub mod note_store;
pub mod preference_store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Rejected note operation. No state was changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Validation(NoteValidationError),
    NotFound(NoteId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<NoteValidationError> for StoreError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Failure while reading or writing a persisted record.
#[derive(Debug)]
pub enum PersistError {
    Storage(StorageError),
    Encode(serde_json::Error),
    Decode(serde_json::Error),
    /// Record parsed but violates a collection invariant.
    Corrupt(String),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode record: {err}"),
            Self::Decode(err) => write!(f, "failed to decode record: {err}"),
            Self::Corrupt(message) => write!(f, "corrupt record: {message}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Encode(err) | Self::Decode(err) => Some(err),
            Self::Corrupt(_) => None,
        }
    }
}

impl From<StorageError> for PersistError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Outcome of the most recent persist step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PersistStatus {
    /// No mutation has happened yet.
    #[default]
    NotAttempted,
    /// Full record written.
    Saved { bytes: usize },
    /// Write failed; in-memory state is still authoritative.
    Failed { message: String },
}

impl PersistStatus {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }

    fn from_result(result: Result<usize, PersistError>) -> Self {
        match result {
            Ok(bytes) => Self::Saved { bytes },
            Err(err) => Self::Failed {
                message: err.to_string(),
            },
        }
    }
}

/// State change broadcast to note store subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    Created(NoteId),
    Updated(NoteId),
    Deleted(NoteId),
    Cleared,
    Loaded { count: usize },
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&StoreEvent) + Send>;

/// Ordered listener registry.
#[derive(Default)]
struct Subscribers {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl Subscribers {
    fn add(&mut self, listener: Listener) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.listeners.push((id, listener));
        id
    }

    fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(current, _)| *current != id);
        self.listeners.len() != before
    }

    fn notify(&self, event: &StoreEvent) {
        for (_, listener) in &self.listeners {
            listener(event);
        }
    }
}
