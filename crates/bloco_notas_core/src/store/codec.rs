//! JSON codec for the notes and preference records.
//!
//! # Invariants
//! - The notes record is a JSON array in store order.
//! - Decoding is all-or-nothing: one malformed entry rejects the record.
//! - Decoded collections have unique ids and `created_at <= updated_at`.

use crate::model::note::Note;
use crate::store::PersistError;
use log::warn;
use std::collections::HashSet;

/// Serializes the full collection.
pub fn encode_notes(notes: &[Note]) -> Result<String, PersistError> {
    serde_json::to_string(notes).map_err(PersistError::Encode)
}

/// Parses a notes record.
///
/// An entry whose `updatedAt` precedes its `createdAt` is repaired by moving
/// `updated_at` up to `created_at`.
///
/// # Errors
/// - `Decode` when the payload is not a JSON array of notes.
/// - `Corrupt` when two entries share an id.
pub fn decode_notes(raw: &str) -> Result<Vec<Note>, PersistError> {
    let mut notes: Vec<Note> = serde_json::from_str(raw).map_err(PersistError::Decode)?;

    let mut seen = HashSet::with_capacity(notes.len());
    for note in &mut notes {
        if !seen.insert(note.id) {
            return Err(PersistError::Corrupt(format!(
                "duplicate note id {}",
                note.id
            )));
        }
        if note.updated_at < note.created_at {
            warn!(
                "event=notes_decode module=store status=repaired note_id={} reason=updated_before_created",
                note.id
            );
            note.updated_at = note.created_at;
        }
    }

    Ok(notes)
}

/// Serializes the dark mode flag.
pub fn encode_dark_mode(enabled: bool) -> Result<String, PersistError> {
    serde_json::to_string(&enabled).map_err(PersistError::Encode)
}

/// Parses the dark mode flag record.
pub fn decode_dark_mode(raw: &str) -> Result<bool, PersistError> {
    serde_json::from_str(raw).map_err(PersistError::Decode)
}

#[cfg(test)]
mod tests {
    use super::{decode_dark_mode, decode_notes, encode_notes};
    use crate::model::note::Note;
    use crate::store::PersistError;
    use chrono::{TimeZone, Utc};

    #[test]
    fn decodes_records_with_mixed_timestamp_forms() {
        let raw = r#"[
            {"id": 2, "title": "b", "content": "B", "category": "💡 Ideias",
             "createdAt": 1714566600000, "updatedAt": "1714566660000"},
            {"id": 1, "title": "a", "content": "A", "category": "📝 Pessoal",
             "createdAt": "2024-05-01T12:00:00.000Z", "updatedAt": "2024-05-01T12:00:00.000Z"}
        ]"#;

        let notes = decode_notes(raw).unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(
            notes[0].created_at,
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
        );
        assert_eq!(
            notes[0].updated_at,
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 31, 0).unwrap()
        );
        assert_eq!(notes[1].title, "a");
    }

    #[test]
    fn one_malformed_entry_rejects_whole_record() {
        let raw = r#"[
            {"id": 1, "title": "ok", "content": "ok", "category": "x",
             "createdAt": "2024-05-01T12:00:00.000Z", "updatedAt": "2024-05-01T12:00:00.000Z"},
            {"id": 2, "title": "bad", "content": "bad", "category": "x",
             "createdAt": "not a date", "updatedAt": "2024-05-01T12:00:00.000Z"}
        ]"#;
        assert!(matches!(decode_notes(raw), Err(PersistError::Decode(_))));
    }

    #[test]
    fn duplicate_ids_are_corrupt() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let notes = vec![Note::new(7, "a", "A", "x", at), Note::new(7, "b", "B", "x", at)];
        let raw = encode_notes(&notes).unwrap();
        assert!(matches!(decode_notes(&raw), Err(PersistError::Corrupt(_))));
    }

    #[test]
    fn updated_before_created_is_repaired() {
        let raw = r#"[{"id": 1, "title": "a", "content": "A", "category": "x",
            "createdAt": "2024-05-01T12:00:00.000Z", "updatedAt": "2024-04-01T12:00:00.000Z"}]"#;
        let notes = decode_notes(raw).unwrap();
        assert_eq!(notes[0].updated_at, notes[0].created_at);
    }

    #[test]
    fn dark_mode_record_must_be_a_boolean() {
        assert!(decode_dark_mode("true").unwrap());
        assert!(!decode_dark_mode("false").unwrap());
        assert!(decode_dark_mode("\"yes\"").is_err());
    }
}
