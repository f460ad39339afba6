use crate::models::glob::GlobPattern;
use std::collections::BTreeSet;
use std::fmt;

/// The live include/exclude pattern sets of one menu session.
///
/// Classification operates on the flattened patterns of a group, not on group
/// identifiers. Both sets are ordered so that compiled arguments are stable.
/// A pattern is never a member of both sets at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationState {
    pub(crate) include: BTreeSet<GlobPattern>,
    pub(crate) exclude: BTreeSet<GlobPattern>,
}

impl ClassificationState {
    /// The empty state (nothing included, nothing excluded)
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state directly from two pattern lists.
    ///
    /// Patterns listed on both sides are kept only in the exclude set.
    pub fn from_sets<I, E, P>(include: I, exclude: E) -> Self
    where
        I: IntoIterator<Item = P>,
        E: IntoIterator<Item = P>,
        P: Into<GlobPattern>,
    {
        let exclude: BTreeSet<GlobPattern> = exclude.into_iter().map(Into::into).collect();
        let include = include
            .into_iter()
            .map(Into::into)
            .filter(|p| !exclude.contains(p))
            .collect();
        Self { include, exclude }
    }

    pub fn included(&self) -> impl Iterator<Item = &GlobPattern> {
        self.include.iter()
    }

    pub fn excluded(&self) -> impl Iterator<Item = &GlobPattern> {
        self.exclude.iter()
    }

    pub fn is_included(&self, pattern: &GlobPattern) -> bool {
        self.include.contains(pattern)
    }

    pub fn is_excluded(&self, pattern: &GlobPattern) -> bool {
        self.exclude.contains(pattern)
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    /// Derive the display status of a group from the membership of its patterns
    pub fn group_status(&self, group_patterns: &[GlobPattern]) -> GroupStatus {
        if group_patterns.is_empty() {
            return GroupStatus::Neutral;
        }

        let included = group_patterns.iter().filter(|p| self.is_included(p)).count();
        let excluded = group_patterns.iter().filter(|p| self.is_excluded(p)).count();

        if included == group_patterns.len() {
            GroupStatus::Included
        } else if excluded == group_patterns.len() {
            GroupStatus::Excluded
        } else if included == 0 && excluded == 0 {
            GroupStatus::Neutral
        } else {
            GroupStatus::Mixed
        }
    }
}

/// Display status of a glob group within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupStatus {
    Neutral,
    Included,
    Excluded,
    /// Some patterns classified, but not uniformly (shared patterns between groups)
    Mixed,
}

impl GroupStatus {
    /// Single-character marker used by the menu
    pub fn marker(self) -> char {
        match self {
            GroupStatus::Neutral => ' ',
            GroupStatus::Included => '+',
            GroupStatus::Excluded => '-',
            GroupStatus::Mixed => '~',
        }
    }
}

impl fmt::Display for GroupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GroupStatus::Neutral => "neutral",
            GroupStatus::Included => "included",
            GroupStatus::Excluded => "excluded",
            GroupStatus::Mixed => "mixed",
        };
        f.write_str(name)
    }
}

/// How the search tool should interpret the query string
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchMode {
    /// Fixed-string match
    #[default]
    Literal,
    /// Regular expression
    Regex,
}

impl SearchMode {
    pub fn from_literal(literal: bool) -> Self {
        if literal {
            SearchMode::Literal
        } else {
            SearchMode::Regex
        }
    }

    pub fn is_literal(self) -> bool {
        self == SearchMode::Literal
    }

    pub fn toggled(self) -> Self {
        match self {
            SearchMode::Literal => SearchMode::Regex,
            SearchMode::Regex => SearchMode::Literal,
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Literal => f.write_str("literal"),
            SearchMode::Regex => f.write_str("regex"),
        }
    }
}
