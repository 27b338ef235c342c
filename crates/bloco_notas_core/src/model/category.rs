//! Fixed note categories.
//!
//! Notes store their category as a plain label so that data written by older
//! builds (or edited by hand) still loads. Labels outside this set are kept
//! as-is; they simply never match a category filter or statistics bucket.

use std::fmt::{Display, Formatter};

/// Label used by the UI for the "every category" filter chip.
pub const ALL_CATEGORIES_LABEL: &str = "Todas";

/// One of the five built-in categories, in declared display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Personal,
    Work,
    Study,
    Ideas,
    Other,
}

impl Category {
    /// All categories in declared order.
    pub const ALL: [Category; 5] = [
        Category::Personal,
        Category::Work,
        Category::Study,
        Category::Ideas,
        Category::Other,
    ];

    /// Stored/display label, emoji prefix included.
    pub fn label(self) -> &'static str {
        match self {
            Self::Personal => "📝 Pessoal",
            Self::Work => "💼 Trabalho",
            Self::Study => "🎓 Estudos",
            Self::Ideas => "💡 Ideias",
            Self::Other => "📌 Outros",
        }
    }

    /// Resolves an exact stored label. No trimming or case folding.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.label() == label)
    }

    /// Category preselected in the editor for a new note.
    pub fn default_for_new_note() -> Self {
        Self::ALL[0]
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Returns all category labels in declared order.
pub fn category_labels() -> Vec<&'static str> {
    Category::ALL.iter().map(|category| category.label()).collect()
}

#[cfg(test)]
mod tests {
    use super::{category_labels, Category};

    #[test]
    fn labels_round_trip_through_from_label() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.label()), Some(category));
        }
    }

    #[test]
    fn from_label_is_exact_match_only() {
        assert_eq!(Category::from_label("Pessoal"), None);
        assert_eq!(Category::from_label(" 📝 Pessoal"), None);
        assert_eq!(Category::from_label("Todas"), None);
    }

    #[test]
    fn labels_keep_declared_order() {
        assert_eq!(
            category_labels(),
            vec![
                "📝 Pessoal",
                "💼 Trabalho",
                "🎓 Estudos",
                "💡 Ideias",
                "📌 Outros"
            ]
        );
        assert_eq!(Category::default_for_new_note(), Category::Personal);
    }
}
