//! List query state: search text, category filter and sort mode.

use crate::model::category::ALL_CATEGORIES_LABEL;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Ordering applied to the visible list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortMode {
    /// Most recently updated first.
    #[default]
    Recent,
    /// Least recently updated first.
    Oldest,
    /// Title, ascending.
    Alphabetical,
    /// Category label, ascending.
    Category,
}

impl SortMode {
    pub const ALL: [SortMode; 4] = [
        SortMode::Recent,
        SortMode::Oldest,
        SortMode::Alphabetical,
        SortMode::Category,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::Oldest => "oldest",
            Self::Alphabetical => "alphabetical",
            Self::Category => "category",
        }
    }
}

impl Display for SortMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown sort mode name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSortModeError(pub String);

impl Display for ParseSortModeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported sort mode `{}`; expected recent|oldest|alphabetical|category",
            self.0
        )
    }
}

impl Error for ParseSortModeError {}

impl FromStr for SortMode {
    type Err = ParseSortModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "recent" => Ok(Self::Recent),
            "oldest" => Ok(Self::Oldest),
            "alphabetical" => Ok(Self::Alphabetical),
            "category" => Ok(Self::Category),
            _ => Err(ParseSortModeError(value.to_string())),
        }
    }
}

/// Category restriction for the visible list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// The `Todas` chip: no restriction.
    #[default]
    All,
    /// Exact label match.
    Only(String),
}

impl CategoryFilter {
    /// Maps a chip label to a filter; `Todas` means all categories.
    pub fn from_label(label: &str) -> Self {
        if label == ALL_CATEGORIES_LABEL {
            Self::All
        } else {
            Self::Only(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES_LABEL,
            Self::Only(label) => label.as_str(),
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(label) => label == category,
        }
    }
}

/// Full list query as driven by the search box, chips and sort menu.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewQuery {
    pub search: String,
    pub category: CategoryFilter,
    pub sort: SortMode,
}

impl ViewQuery {
    pub fn new(search: impl Into<String>, category: CategoryFilter, sort: SortMode) -> Self {
        Self {
            search: search.into(),
            category,
            sort,
        }
    }

    /// Whether search text or a category chip narrows the list.
    pub fn is_narrowed(&self) -> bool {
        !self.search.is_empty() || self.category != CategoryFilter::All
    }
}
