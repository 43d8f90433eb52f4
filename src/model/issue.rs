use serde::{Deserialize, Serialize};

/// A 1-indexed line/column position in a stylesheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

/// The region of a stylesheet an occurrence covers (inclusive start, `end >= start`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSpan {
    pub start: Position,
    pub end: Position,
}

impl TextSpan {
    /// Create a single-line span
    pub fn single_line(line: u32, start_column: u32, end_column: u32) -> Self {
        Self {
            start: Position {
                line,
                column: start_column,
            },
            end: Position {
                line,
                column: end_column,
            },
        }
    }

    /// Check if this span starts and ends on the same line
    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }

    /// Number of lines the span covers beyond its first.
    /// Saturates at 0 for malformed spans whose end precedes their start.
    pub fn extra_lines(&self) -> u32 {
        self.end.line.saturating_sub(self.start.line)
    }
}

/// Browser-compatibility metadata attached to an occurrence by the analysis stage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatInfo {
    /// Link to the feature's MDN documentation page
    #[serde(default)]
    pub mdn_url: Option<String>,
    /// Short human-readable summary of the compatibility problem
    #[serde(default)]
    pub description: Option<String>,
}

/// One detected compatibility problem at a specific stylesheet location.
///
/// Occurrences are produced entirely by the analysis stage that wrote the
/// report; this crate treats them as read-only input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueOccurrence {
    /// Identifier of the stylesheet the occurrence belongs to
    pub source: String,
    pub span: TextSpan,
    /// Vendor prefixes the declaration is missing, in the order the analysis reported them
    #[serde(default)]
    pub missing_prefixes: Vec<String>,
    #[serde(default)]
    pub compat: CompatInfo,
}

impl IssueOccurrence {
    /// Zero-indexed line the occurrence starts on
    pub fn start_line_index(&self) -> usize {
        (self.span.start.line as usize).saturating_sub(1)
    }
}
