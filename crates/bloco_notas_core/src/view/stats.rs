//! Collection statistics for the side panel.

use crate::model::category::Category;
use crate::model::note::Note;

/// Count of notes in one built-in category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

/// Aggregates over the whole collection (not the filtered view).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    pub total_notes: usize,
    /// Sum of content lengths in characters; titles are not counted.
    pub total_chars: usize,
    /// One entry per built-in category, in declared order.
    pub category_stats: Vec<CategoryCount>,
}

/// Computes statistics in one pass.
///
/// Notes with an unknown category count toward the totals but toward no
/// category bucket.
pub fn stats(notes: &[Note]) -> Statistics {
    let mut counts = vec![0usize; Category::ALL.len()];
    let mut total_chars = 0usize;

    for note in notes {
        total_chars += note.content.chars().count();
        if let Some(index) = Category::ALL
            .iter()
            .position(|category| category.label() == note.category)
        {
            counts[index] += 1;
        }
    }

    Statistics {
        total_notes: notes.len(),
        total_chars,
        category_stats: Category::ALL
            .iter()
            .zip(counts)
            .map(|(category, count)| CategoryCount {
                category: *category,
                count,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::stats;
    use crate::model::category::Category;
    use crate::model::note::Note;
    use chrono::Utc;

    #[test]
    fn empty_collection_has_five_zero_buckets() {
        let result = stats(&[]);
        assert_eq!(result.total_notes, 0);
        assert_eq!(result.total_chars, 0);
        assert_eq!(result.category_stats.len(), 5);
        assert!(result.category_stats.iter().all(|entry| entry.count == 0));
    }

    #[test]
    fn unknown_category_counts_in_totals_only() {
        let now = Utc::now();
        let notes = vec![
            Note::new(1, "title ignored", "abc", Category::Work.label(), now),
            Note::new(2, "t", "héllo", "🧪 Legacy", now),
            Note::new(3, "t", "z", Category::Work.label(), now),
        ];

        let result = stats(&notes);
        assert_eq!(result.total_notes, 3);
        assert_eq!(result.total_chars, 3 + 5 + 1);
        let buckets: Vec<_> = result
            .category_stats
            .iter()
            .map(|entry| (entry.category, entry.count))
            .collect();
        assert_eq!(
            buckets,
            vec![
                (Category::Personal, 0),
                (Category::Work, 2),
                (Category::Study, 0),
                (Category::Ideas, 0),
                (Category::Other, 0),
            ]
        );
    }
}
