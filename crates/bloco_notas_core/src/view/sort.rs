//! Display ordering.
//!
//! Sorting works on a copy of the reference list and is stable: notes with
//! equal keys keep their incoming relative order.

use crate::model::note::Note;
use crate::view::query::SortMode;
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Returns `notes` reordered by `mode`.
pub fn sort_notes<'a>(notes: &[&'a Note], mode: SortMode) -> Vec<&'a Note> {
    let mut sorted = notes.to_vec();
    match mode {
        SortMode::Recent => sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        SortMode::Oldest => sorted.sort_by(|a, b| a.updated_at.cmp(&b.updated_at)),
        SortMode::Alphabetical => sorted.sort_by(|a, b| locale_compare(&a.title, &b.title)),
        SortMode::Category => sorted.sort_by(|a, b| locale_compare(&a.category, &b.category)),
    }
    sorted
}

/// Collation used for titles and category labels.
///
/// Three levels, in order:
/// 1. base letters, ignoring accents and case (`Água` sorts with `agua`,
///    before `banana`);
/// 2. accents, unaccented first (`e` < `é`);
/// 3. case, lower case first (`apple` < `Apple`).
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| accented_letters(a).cmp(accented_letters(b)))
        .then_with(|| b.cmp(a))
}

fn base_letters(value: &str) -> impl Iterator<Item = char> + '_ {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn accented_letters(value: &str) -> impl Iterator<Item = char> + '_ {
    value.nfd().flat_map(char::to_lowercase)
}
