//! Search and category filtering.
//!
//! A note passes when the search text is empty or its lower-cased form is a
//! substring of the lower-cased title or content, and the category filter
//! matches its label exactly. Case folding is `str::to_lowercase` on both
//! sides; there is no locale-specific folding.

use crate::model::note::Note;
use crate::view::query::CategoryFilter;

/// Returns the notes that pass, in input order.
///
/// Accepts any iterator of note references, so a previous result can be
/// filtered again.
pub fn filter_notes<'a, I>(notes: I, search: &str, category: &CategoryFilter) -> Vec<&'a Note>
where
    I: IntoIterator<Item = &'a Note>,
{
    let needle = normalize_search(search);
    notes
        .into_iter()
        .filter(|note| category.matches(&note.category))
        .filter(|note| matches_search(note, needle.as_deref()))
        .collect()
}

/// Whether one note matches already-normalized search text.
pub fn matches_search(note: &Note, needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(needle) => {
            note.title.to_lowercase().contains(needle)
                || note.content.to_lowercase().contains(needle)
        }
    }
}

/// Lower-cases search text; `None` means "match everything".
///
/// Whitespace is significant: `"milk "` only matches where a space follows.
pub fn normalize_search(search: &str) -> Option<String> {
    if search.is_empty() {
        None
    } else {
        Some(search.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::{filter_notes, normalize_search};
    use crate::model::note::Note;
    use crate::view::query::CategoryFilter;
    use chrono::Utc;

    fn sample() -> Vec<Note> {
        let now = Utc::now();
        vec![
            Note::new(3, "Shopping", "Buy MILK and eggs", "📝 Pessoal", now),
            Note::new(2, "Milkshake recipe", "banana", "💡 Ideias", now),
            Note::new(1, "Roadmap", "Q3 draft", "💼 Trabalho", now),
        ]
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_content() {
        let notes = sample();
        let hits = filter_notes(&notes, "milk", &CategoryFilter::All);
        let ids: Vec<_> = hits.iter().map(|note| note.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn category_and_search_combine() {
        let notes = sample();
        let hits = filter_notes(
            &notes,
            "MILK",
            &CategoryFilter::from_label("💡 Ideias"),
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);
    }

    #[test]
    fn empty_search_matches_everything() {
        let notes = sample();
        assert_eq!(filter_notes(&notes, "", &CategoryFilter::All).len(), 3);
        assert_eq!(normalize_search(""), None);
        assert_eq!(normalize_search(" Ab "), Some(" ab ".to_string()));
    }

    #[test]
    fn surrounding_whitespace_is_part_of_the_search() {
        let now = Utc::now();
        let notes = vec![
            Note::new(2, "milky", "way", "📝 Pessoal", now),
            Note::new(1, "Buy", "milk and eggs", "📝 Pessoal", now),
        ];

        let hits = filter_notes(&notes, "milk ", &CategoryFilter::All);
        let ids: Vec<_> = hits.iter().map(|note| note.id).collect();
        assert_eq!(ids, vec![1]);
        assert!(filter_notes(&notes, "   ", &CategoryFilter::All).is_empty());
    }

    #[test]
    fn unknown_category_matches_only_itself() {
        let now = Utc::now();
        let notes = vec![Note::new(1, "t", "c", "🧪 Legacy", now)];
        assert!(filter_notes(&notes, "", &CategoryFilter::from_label("📌 Outros")).is_empty());
        assert_eq!(
            filter_notes(&notes, "", &CategoryFilter::from_label("🧪 Legacy")).len(),
            1
        );
    }

    #[test]
    fn filtering_twice_is_idempotent() {
        let notes = sample();
        let category = CategoryFilter::All;
        let once = filter_notes(&notes, "milk", &category);
        let twice = filter_notes(once.iter().copied(), "milk", &category);
        assert_eq!(once, twice);
    }
}
