//! Title matching policy used to pick target windows.

use serde::{Deserialize, Serialize};

use crate::window::{WindowHandle, WindowInfo};

/// How a window title is compared against the target query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Title contains the query, ignoring case. May match many windows.
    #[default]
    Substring,
    /// Title equals the query, ignoring case. Matches at most one window.
    Exact,
}

/// Returns whether `title` satisfies `query` under `mode`.
///
/// An empty (or whitespace-only) query never matches; otherwise a
/// substring search would attach the overlay to every window.
pub fn title_matches(title: &str, query: &str, mode: MatchMode) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return false;
    }
    let title = title.to_lowercase();
    let query = query.to_lowercase();
    match mode {
        MatchMode::Substring => title.contains(&query),
        MatchMode::Exact => title == query,
    }
}

/// Filters enumerated windows down to the tracked set.
///
/// Only visible windows qualify. Enumeration order is preserved, and
/// `Exact` mode keeps only the first hit.
pub fn select(windows: &[WindowInfo], query: &str, mode: MatchMode) -> Vec<WindowHandle> {
    let hits = windows
        .iter()
        .filter(|w| w.visible && title_matches(&w.title, query, mode))
        .map(|w| w.handle);

    match mode {
        MatchMode::Substring => hits.collect(),
        MatchMode::Exact => hits.take(1).collect(),
    }
}
