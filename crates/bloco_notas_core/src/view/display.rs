//! Presentation helpers for list cards, counters and empty states.

use crate::view::query::ViewQuery;
use chrono::{DateTime, Local, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Display;

const PREVIEW_MAX_CHARS: usize = 100;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Single-line card preview: whitespace runs collapsed, first 100 chars.
///
/// Returns `None` for blank content.
pub fn derive_preview(content: &str) -> Option<String> {
    let collapsed = WHITESPACE_RE.replace_all(content.trim(), " ");
    if collapsed.is_empty() {
        return None;
    }
    Some(collapsed.chars().take(PREVIEW_MAX_CHARS).collect())
}

/// Card footer date, `dd/mm/yyyy HH:MM` in the given zone.
pub fn format_timestamp<Tz>(value: &DateTime<Utc>, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    value
        .with_timezone(zone)
        .format("%d/%m/%Y %H:%M")
        .to_string()
}

/// Card footer date in the device's local zone.
pub fn format_local_timestamp(value: &DateTime<Utc>) -> String {
    format_timestamp(value, &Local)
}

/// Header subtitle: `1 nota`, `3 notas`, `0 notas`.
pub fn note_count_label(count: usize) -> String {
    if count == 1 {
        "1 nota".to_string()
    } else {
        format!("{count} notas")
    }
}

/// Editor counter, e.g. `12/50`.
pub fn char_counter(text: &str, max_chars: usize) -> String {
    format!("{}/{max_chars}", text.chars().count())
}

/// What the list shows when no note is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// The collection itself is empty.
    NoNotesYet,
    /// Search or category filter hides every note.
    NoMatches,
}

impl EmptyState {
    pub fn for_query(query: &ViewQuery) -> Self {
        if query.is_narrowed() {
            Self::NoMatches
        } else {
            Self::NoNotesYet
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::NoNotesYet => "📝 Nenhuma nota ainda.\nToque no + para criar!",
            Self::NoMatches => "🔍 Nenhuma nota encontrada",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{char_counter, derive_preview, format_timestamp, note_count_label, EmptyState};
    use crate::view::query::{CategoryFilter, SortMode, ViewQuery};
    use chrono::{FixedOffset, TimeZone, Utc};

    #[test]
    fn preview_collapses_whitespace_and_truncates() {
        assert_eq!(
            derive_preview("  line one\n\n  line\ttwo ").as_deref(),
            Some("line one line two")
        );
        assert_eq!(derive_preview(" \n ").as_deref(), None);
        let long = "x".repeat(150);
        assert_eq!(derive_preview(&long).unwrap().chars().count(), 100);
    }

    #[test]
    fn timestamp_uses_day_month_year_order() {
        let value = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        assert_eq!(format_timestamp(&value, &Utc), "01/05/2024 12:30");

        let brasilia = FixedOffset::west_opt(3 * 3600).unwrap();
        assert_eq!(format_timestamp(&value, &brasilia), "01/05/2024 09:30");
    }

    #[test]
    fn count_label_is_singular_only_for_one() {
        assert_eq!(note_count_label(0), "0 notas");
        assert_eq!(note_count_label(1), "1 nota");
        assert_eq!(note_count_label(2), "2 notas");
    }

    #[test]
    fn counter_counts_characters() {
        assert_eq!(char_counter("olá", 50), "3/50");
    }

    #[test]
    fn empty_state_depends_on_query() {
        assert_eq!(
            EmptyState::for_query(&ViewQuery::default()),
            EmptyState::NoNotesYet
        );
        let narrowed = ViewQuery::new("x", CategoryFilter::All, SortMode::Recent);
        assert_eq!(EmptyState::for_query(&narrowed), EmptyState::NoMatches);
        assert!(EmptyState::NoMatches.message().contains("Nenhuma"));
    }
}
