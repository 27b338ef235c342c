//! Derived, read-only projections of the note collection.
//!
//! # Responsibility
//! - Filter by search text and category, then order by a sort mode.
//! - Aggregate collection statistics.
//! - Format values for list cards, counters and empty states.
//!
//! # Invariants
//! - Nothing here mutates or reorders the store's collection.
//! - Every projection is recomputed from scratch; there is no cache.

pub mod display;
pub mod filter;
pub mod query;
pub mod sort;
pub mod stats;

use crate::model::note::Note;
use query::ViewQuery;

/// Notes the list should show, in display order.
pub fn visible_notes<'a>(notes: &'a [Note], query: &ViewQuery) -> Vec<&'a Note> {
    let filtered = filter::filter_notes(notes, &query.search, &query.category);
    sort::sort_notes(&filtered, query.sort)
}
