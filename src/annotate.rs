//! Issue-to-line indexing for the inspector.
//!
//! Maps a browser version's flat occurrence collection onto the lines of one
//! stylesheet: at most one occurrence is surfaced per line, and every
//! source-matching occurrence gets a stable instance ordinal so the exact
//! occurrence can be looked up again at render time without recomputing the
//! rest of the index.

use std::collections::BTreeMap;

use crate::model::{IssueOccurrence, TextSpan, VersionIssues};

/// The single issue occurrence surfaced on one stylesheet line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineAnnotation {
    pub issue_key: String,
    /// Zero-based position of the occurrence within the source-filtered
    /// sequence for its issue key
    pub instance: usize,
    /// Lines the occurrence's span covers beyond its first
    pub extra_lines: u32,
}

/// Per-line issue summary for one stylesheet, keyed by zero-indexed line number
pub type LineIndex = BTreeMap<usize, LineAnnotation>;

/// The issue occurrence the user is currently focused on (e.g. navigated to
/// from the issue list). Only ever used to pick a scroll target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveIssue {
    pub issue_key: String,
    pub instance: usize,
}

/// Build the per-line index for `active_source` from a browser version's
/// issue collection.
///
/// Each issue key keeps its own ordinal counter. The counter advances for
/// every occurrence of that key in `active_source`, whether or not the
/// occurrence wins its line slot, so an annotation's `instance` always
/// indexes back into the source-filtered sequence for its key (see
/// [`occurrence_at`]). A line slot is won by the first writer: when several
/// occurrences start on the same line the earlier issue key in the
/// collection's iteration order keeps the line and later writers are
/// dropped.
///
/// Occurrences belonging to other sources are excluded entirely and advance
/// no counter.
pub fn build_line_index(issues: &VersionIssues, active_source: &str) -> LineIndex {
    let mut index = LineIndex::new();

    for (issue_key, occurrences) in issues {
        let mut instance = 0;
        for occurrence in occurrences
            .iter()
            .filter(|occurrence| occurrence.source == active_source)
        {
            index
                .entry(occurrence.start_line_index())
                .or_insert_with(|| LineAnnotation {
                    issue_key: issue_key.clone(),
                    instance,
                    extra_lines: occurrence.span.extra_lines(),
                });
            instance += 1;
        }
    }

    index
}

/// Exact re-lookup of the occurrence behind an annotation: the `instance`-th
/// occurrence of `issue_key` in `active_source`, in collection order.
pub fn occurrence_at<'a>(
    issues: &'a VersionIssues,
    active_source: &str,
    issue_key: &str,
    instance: usize,
) -> Option<&'a IssueOccurrence> {
    issues
        .get(issue_key)?
        .iter()
        .filter(|occurrence| occurrence.source == active_source)
        .nth(instance)
}

/// The line the inspector should scroll to for `active`, if any.
///
/// Scans the index in ascending line order and returns the first line whose
/// annotation matches exactly. Returns `None` when the active occurrence is
/// not indexed, including when it lost its line slot to an earlier writer;
/// such an occurrence is simply unreachable by scroll.
pub fn find_scroll_target(index: &LineIndex, active: &ActiveIssue) -> Option<usize> {
    index
        .iter()
        .find(|(_, annotation)| {
            annotation.issue_key == active.issue_key && annotation.instance == active.instance
        })
        .map(|(line, _)| *line)
}

/// Human-readable position of a span, e.g. `Line 3, columns 5-12` or
/// `Lines 3-6, columns 5-2`
pub fn position_label(span: &TextSpan) -> String {
    let lines = if span.is_single_line() {
        format!("Line {}", span.start.line)
    } else {
        format!("Lines {}-{}", span.start.line, span.end.line)
    };
    format!(
        "{lines}, columns {}-{}",
        span.start.column, span.end.column
    )
}
