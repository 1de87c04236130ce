// src/core/history.rs

//! Filtered and sorted views over a scan history.

use std::cmp::Ordering;

use strum::{Display, EnumIter, IntoEnumIterator};

use crate::core::models::{SafetyStatus, SecurityAnalysis};

/// Which statuses a history view shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumIter)]
pub enum StatusFilter {
    #[default]
    #[strum(to_string = "All Status")]
    All,
    Safe,
    Warning,
    Dangerous,
}

impl StatusFilter {
    pub fn admits(&self, status: SafetyStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Safe => status == SafetyStatus::Safe,
            StatusFilter::Warning => status == SafetyStatus::Warning,
            StatusFilter::Dangerous => status == SafetyStatus::Dangerous,
        }
    }
}

/// How a history view is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumIter)]
pub enum SortKey {
    /// Most recent first.
    #[default]
    #[strum(to_string = "Date")]
    Date,
    /// Highest score first.
    #[strum(to_string = "Score")]
    Score,
    /// Alphabetical.
    #[strum(to_string = "URL")]
    Url,
}

/// Returns the variant after `current`, wrapping around.
pub fn cycle<T: IntoEnumIterator + PartialEq + Copy>(current: T) -> T {
    let all: Vec<T> = T::iter().collect();
    let position = all.iter().position(|v| *v == current).unwrap_or(0);
    all[(position + 1) % all.len()]
}

/// Search, filter and sort parameters for a history view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    pub search: String,
    pub status: StatusFilter,
    pub sort: SortKey,
}

impl HistoryQuery {
    pub fn new(search: &str, status: StatusFilter, sort: SortKey) -> Self {
        Self { search: search.to_string(), status, sort }
    }

    /// Applies the query to `history` without modifying it.
    ///
    /// Filtering runs first; the sort is stable so entries with equal keys keep
    /// their original relative order.
    pub fn apply<'a>(&self, history: &'a [SecurityAnalysis]) -> Vec<&'a SecurityAnalysis> {
        let needle = self.search.to_lowercase();
        let mut view: Vec<&SecurityAnalysis> = history
            .iter()
            .filter(|scan| scan.url.to_lowercase().contains(&needle))
            .filter(|scan| self.status.admits(scan.status))
            .collect();

        match self.sort {
            SortKey::Date => view.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
            SortKey::Score => view.sort_by(|a, b| b.safety_score.cmp(&a.safety_score)),
            SortKey::Url => view.sort_by(|a, b| locale_cmp(&a.url, &b.url)),
        }
        view
    }
}

/// Collation close to a default locale comparison: letters compare
/// case-insensitively first, lowercase sorts before uppercase on a tie, and raw
/// byte order breaks any remaining tie so the order is total.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded = a.chars().flat_map(char::to_lowercase).cmp(b.chars().flat_map(char::to_lowercase));
    folded
        .then_with(|| {
            let case_rank = |c: char| if c.is_uppercase() { 1 } else { 0 };
            a.chars().map(case_rank).cmp(b.chars().map(case_rank))
        })
        .then_with(|| a.cmp(b))
}
