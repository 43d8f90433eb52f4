use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CompatViewError, Result};

use super::issue::IssueOccurrence;

/// Issues detected for one browser version, keyed by issue kind.
///
/// The order of occurrences within each sequence is significant: it is the
/// order the analysis stage found them in, and instance ordinals index into
/// the source-filtered version of that sequence.
pub type VersionIssues = BTreeMap<String, Vec<IssueOccurrence>>;

/// A compatibility report produced by an external analysis stage.
///
/// Stylesheet text can be embedded directly (`stylesheets`) or referenced by
/// path (`stylesheet_files`); referenced files are read at load time,
/// resolved relative to the report's directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatReport {
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
    /// browser -> version -> issue key -> occurrences
    pub browsers: BTreeMap<String, BTreeMap<String, VersionIssues>>,
    #[serde(default)]
    pub stylesheets: BTreeMap<String, String>,
    #[serde(default)]
    pub stylesheet_files: BTreeMap<String, PathBuf>,
}

impl CompatReport {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut report: CompatReport = serde_json::from_str(&contents)?;

        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        report.resolve_stylesheet_files(&base_dir)?;
        report.validate()?;

        Ok(report)
    }

    /// Read externally referenced stylesheets into `stylesheets`.
    /// Embedded text wins when both forms name the same source.
    fn resolve_stylesheet_files(&mut self, base_dir: &Path) -> Result<()> {
        let files = std::mem::take(&mut self.stylesheet_files);
        for (source, file_path) in files {
            if self.stylesheets.contains_key(&source) {
                continue;
            }
            let resolved = if file_path.is_absolute() {
                file_path
            } else {
                base_dir.join(file_path)
            };
            let text = fs::read_to_string(&resolved).map_err(|e| {
                CompatViewError::InvalidReport(format!(
                    "cannot read stylesheet '{}' from {}: {e}",
                    source,
                    resolved.display()
                ))
            })?;
            self.stylesheets.insert(source, text);
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.browsers.is_empty() {
            return Err(CompatViewError::EmptyReport);
        }
        for (browser, versions) in &self.browsers {
            if versions.is_empty() {
                return Err(CompatViewError::InvalidReport(format!(
                    "browser '{browser}' lists no versions"
                )));
            }
        }
        Ok(())
    }

    pub fn browser_names(&self) -> Vec<&str> {
        self.browsers.keys().map(String::as_str).collect()
    }

    pub fn versions_of(&self, browser: &str) -> Vec<&str> {
        self.browsers
            .get(browser)
            .map(|versions| versions.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn issues_for(&self, browser: &str, version: &str) -> Option<&VersionIssues> {
        self.browsers.get(browser)?.get(version)
    }

    pub fn stylesheet_names(&self) -> Vec<&str> {
        self.stylesheets.keys().map(String::as_str).collect()
    }

    pub fn stylesheet_text(&self, source: &str) -> Option<&str> {
        self.stylesheets.get(source).map(String::as_str)
    }

    pub fn require_stylesheet(&self, source: &str) -> Result<&str> {
        self.stylesheet_text(source)
            .ok_or_else(|| CompatViewError::MissingStylesheet(source.to_string()))
    }

    /// Total occurrences for a browser/version across all issue kinds
    pub fn issue_count(&self, browser: &str, version: &str) -> usize {
        self.issues_for(browser, version)
            .map(|issues| issues.values().map(Vec::len).sum())
            .unwrap_or(0)
    }

    /// Occurrences for a browser/version that belong to one stylesheet
    pub fn issue_count_for_source(&self, browser: &str, version: &str, source: &str) -> usize {
        self.issues_for(browser, version)
            .map(|issues| {
                issues
                    .values()
                    .flat_map(|occurrences| occurrences.iter())
                    .filter(|occurrence| occurrence.source == source)
                    .count()
            })
            .unwrap_or(0)
    }
}
