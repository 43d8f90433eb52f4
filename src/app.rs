use std::collections::HashMap;

use crate::annotate::{self, ActiveIssue, LineIndex};
use crate::error::{CompatViewError, Result};
use crate::model::{CompatReport, IssueOccurrence, VersionIssues};
use crate::syntax::HighlightedLines;
use crate::theme::Theme;

/// Default rows kept visible above the target line when scrolling to an issue
pub const SCROLL_TOP_MARGIN: usize = 3;

/// Startup options resolved from config and CLI
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub scroll_margin: usize,
    pub default_browser: Option<String>,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            scroll_margin: SCROLL_TOP_MARGIN,
            default_browser: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPanel {
    Stylesheets,
    Issues,
    Inspector,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub content: String,
    pub message_type: MessageType,
}

/// Which lines have their detail panel open.
///
/// Updates are non-destructive: toggling returns a new state instead of
/// mutating in place, so a render pass never observes a half-applied change.
/// State lives as long as the current stylesheet selection and is replaced
/// wholesale when a new stylesheet is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    open: HashMap<usize, bool>,
}

impl ExpansionState {
    pub fn is_open(&self, line: usize) -> bool {
        self.open.get(&line).copied().unwrap_or(false)
    }

    /// Return a new state with `line` flipped; absent lines read as closed
    pub fn toggled(&self, line: usize) -> Self {
        let mut open = self.open.clone();
        open.insert(line, !self.is_open(line));
        Self { open }
    }
}

/// One row in the issue navigator: a concrete occurrence addressable by its
/// issue key and instance ordinal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueEntry {
    pub issue_key: String,
    pub instance: usize,
    pub source: String,
    /// 1-indexed start line, for display
    pub line: u32,
}

#[derive(Debug, Default)]
pub struct InspectorState {
    /// Scroll offset in visual rows (stylesheet lines plus open detail rows)
    pub scroll_offset: usize,
    /// Cursor position as a zero-indexed stylesheet line
    pub cursor_line: usize,
    pub viewport_height: usize, // Set during render
}

pub struct App {
    pub theme: Theme,
    pub report: CompatReport,

    pub input_mode: InputMode,
    pub focused_panel: FocusedPanel,

    // Current selection
    pub browser: String,
    pub version: String,
    pub stylesheet: Option<String>,

    /// The issue occurrence the user navigated to, if any
    pub active_issue: Option<ActiveIssue>,
    /// Armed when the active issue changes; resolved into a scroll offset
    /// exactly once on the next render pass
    scroll_pending: bool,
    /// Rows kept visible above a scroll target
    scroll_margin: usize,

    pub open_lines: ExpansionState,
    /// Per-line issue index for the selected stylesheet; rebuilt whenever the
    /// browser, version or stylesheet selection changes
    pub line_index: LineIndex,
    /// Text lines of the selected stylesheet
    pub stylesheet_lines: Vec<String>,
    /// Cached syntect spans for the selected stylesheet
    pub highlighted_lines: HighlightedLines,

    pub inspector: InspectorState,
    pub stylesheet_cursor: usize,
    pub issue_cursor: usize,
    /// Flattened occurrence list for the selected browser/version
    pub issue_entries: Vec<IssueEntry>,

    pub should_quit: bool,
    pub message: Option<Message>,
    /// Pending output to print to stdout after the TUI exits
    pub pending_stdout_output: Option<String>,
}

impl App {
    pub fn new(report: CompatReport, theme: Theme, options: AppOptions) -> Result<Self> {
        // Prefer the configured browser when the report knows it
        let browser = options
            .default_browser
            .as_deref()
            .filter(|preferred| report.browsers.contains_key(*preferred))
            .map(str::to_string)
            .or_else(|| {
                report
                    .browser_names()
                    .first()
                    .map(|name| name.to_string())
            })
            .ok_or(CompatViewError::EmptyReport)?;
        let version = report
            .versions_of(&browser)
            .first()
            .map(|version| version.to_string())
            .ok_or_else(|| {
                CompatViewError::InvalidReport(format!("browser '{browser}' lists no versions"))
            })?;

        let mut app = Self {
            theme,
            report,
            input_mode: InputMode::Normal,
            focused_panel: FocusedPanel::Stylesheets,
            browser,
            version,
            stylesheet: None,
            active_issue: None,
            scroll_pending: false,
            scroll_margin: options.scroll_margin,
            open_lines: ExpansionState::default(),
            line_index: LineIndex::new(),
            stylesheet_lines: Vec::new(),
            highlighted_lines: HighlightedLines::new(),
            inspector: InspectorState::default(),
            stylesheet_cursor: 0,
            issue_cursor: 0,
            issue_entries: Vec::new(),
            should_quit: false,
            message: None,
            pending_stdout_output: None,
        };
        app.rebuild_issue_entries();
        Ok(app)
    }

    pub fn current_issues(&self) -> Option<&VersionIssues> {
        self.report.issues_for(&self.browser, &self.version)
    }

    /// The occurrence behind the annotation on `line`, if any
    pub fn occurrence_on_line(&self, line: usize) -> Option<&IssueOccurrence> {
        let annotation = self.line_index.get(&line)?;
        let stylesheet = self.stylesheet.as_deref()?;
        annotate::occurrence_at(
            self.current_issues()?,
            stylesheet,
            &annotation.issue_key,
            annotation.instance,
        )
    }

    // --- Selection -----------------------------------------------------

    pub fn select_stylesheet(&mut self, name: &str) {
        let lines: Vec<String> = match self.report.require_stylesheet(name) {
            Ok(text) => text.lines().map(str::to_string).collect(),
            Err(e) => {
                self.set_error(e.to_string());
                return;
            }
        };
        if self.stylesheet.as_deref() == Some(name) {
            return;
        }

        self.stylesheet = Some(name.to_string());
        self.stylesheet_lines = lines;
        self.highlighted_lines = self
            .theme
            .syntax_highlighter()
            .highlight_stylesheet_lines(name, &self.stylesheet_lines);

        // A new selection is a new inspector instance: detail panels close,
        // the cursor and scroll reset, and any active issue is forgotten.
        self.open_lines = ExpansionState::default();
        self.inspector = InspectorState::default();
        self.active_issue = None;
        self.scroll_pending = false;
        self.rebuild_line_index();
    }

    pub fn rebuild_line_index(&mut self) {
        self.line_index = match (&self.stylesheet, self.current_issues()) {
            (Some(stylesheet), Some(issues)) => annotate::build_line_index(issues, stylesheet),
            _ => LineIndex::new(),
        };
    }

    /// Flatten the selected browser/version's collection into navigator rows.
    ///
    /// Ordinals here must agree with the line annotator: per issue key, each
    /// occurrence is numbered within the sequence filtered to its own source.
    pub fn rebuild_issue_entries(&mut self) {
        let mut entries = Vec::new();
        if let Some(issues) = self.current_issues() {
            for (issue_key, occurrences) in issues {
                let mut per_source: HashMap<&str, usize> = HashMap::new();
                for occurrence in occurrences {
                    let counter = per_source.entry(occurrence.source.as_str()).or_insert(0);
                    entries.push(IssueEntry {
                        issue_key: issue_key.clone(),
                        instance: *counter,
                        source: occurrence.source.clone(),
                        line: occurrence.span.start.line,
                    });
                    *counter += 1;
                }
            }
        }
        self.issue_entries = entries;
        self.issue_cursor = self.issue_cursor.min(self.issue_entries.len().saturating_sub(1));
    }

    pub fn next_browser(&mut self) {
        self.cycle_browser(1);
    }

    pub fn prev_browser(&mut self) {
        self.cycle_browser(-1);
    }

    fn cycle_browser(&mut self, step: isize) {
        let browsers = self.report.browser_names();
        if browsers.len() < 2 {
            return;
        }
        let current = browsers
            .iter()
            .position(|name| *name == self.browser)
            .unwrap_or(0);
        let next = (current as isize + step).rem_euclid(browsers.len() as isize) as usize;
        self.browser = browsers[next].to_string();

        // Keep the version valid for the new browser
        if !self.report.versions_of(&self.browser).contains(&self.version.as_str()) {
            self.version = self
                .report
                .versions_of(&self.browser)
                .first()
                .map(|version| version.to_string())
                .unwrap_or_default();
        }
        self.selection_changed();
        self.set_message(format!("Browser: {} {}", self.browser, self.version));
    }

    pub fn next_version(&mut self) {
        self.cycle_version(1);
    }

    pub fn prev_version(&mut self) {
        self.cycle_version(-1);
    }

    fn cycle_version(&mut self, step: isize) {
        let versions = self.report.versions_of(&self.browser);
        if versions.len() < 2 {
            return;
        }
        let current = versions
            .iter()
            .position(|version| *version == self.version)
            .unwrap_or(0);
        let next = (current as isize + step).rem_euclid(versions.len() as isize) as usize;
        self.version = versions[next].to_string();
        self.selection_changed();
        self.set_message(format!("Version: {} {}", self.browser, self.version));
    }

    /// Browser/version changed: the index and navigator are stale, and the
    /// active issue no longer refers to anything in the new collection.
    fn selection_changed(&mut self) {
        self.active_issue = None;
        self.scroll_pending = false;
        self.issue_cursor = 0;
        self.rebuild_issue_entries();
        self.rebuild_line_index();
    }

    // --- Issue navigation ----------------------------------------------

    /// Navigate to a navigator row: switch to its stylesheet if needed, mark
    /// it active and arm the scroll latch.
    pub fn jump_to_issue(&mut self, entry_idx: usize) {
        let Some(entry) = self.issue_entries.get(entry_idx).cloned() else {
            return;
        };
        self.issue_cursor = entry_idx;

        if self.stylesheet.as_deref() != Some(entry.source.as_str()) {
            self.select_stylesheet(&entry.source);
            if self.stylesheet.as_deref() != Some(entry.source.as_str()) {
                // Selection failed (source unknown to the report); the error
                // message is already set.
                return;
            }
        }

        self.active_issue = Some(ActiveIssue {
            issue_key: entry.issue_key,
            instance: entry.instance,
        });
        self.scroll_pending = true;
    }

    pub fn next_issue(&mut self) {
        if self.issue_entries.is_empty() {
            self.set_message("No issues for this browser version");
            return;
        }
        let next = (self.issue_cursor + 1) % self.issue_entries.len();
        self.jump_to_issue(next);
    }

    pub fn prev_issue(&mut self) {
        if self.issue_entries.is_empty() {
            self.set_message("No issues for this browser version");
            return;
        }
        let prev = self
            .issue_cursor
            .checked_sub(1)
            .unwrap_or(self.issue_entries.len() - 1);
        self.jump_to_issue(prev);
    }

    /// Resolve the pending active issue into a scroll position.
    ///
    /// Called once at the start of each render pass; the latch is cleared
    /// whether or not a target was found, so the scroll fires at most once
    /// per navigation. An active issue whose occurrence lost its line slot
    /// resolves to nothing and the view simply stays put.
    pub fn resolve_pending_scroll(&mut self) {
        if !self.scroll_pending {
            return;
        }
        self.scroll_pending = false;

        let Some(active) = &self.active_issue else {
            return;
        };
        if let Some(target) = annotate::find_scroll_target(&self.line_index, active) {
            self.inspector.cursor_line = target;
            self.inspector.scroll_offset =
                self.visual_row_of(target).saturating_sub(self.scroll_margin);
        }
    }

    #[cfg(test)]
    pub fn scroll_is_pending(&self) -> bool {
        self.scroll_pending
    }

    // --- Expansion -----------------------------------------------------

    /// Toggle the detail panel under the cursor line. Only annotated lines
    /// carry a panel.
    pub fn toggle_line_at_cursor(&mut self) {
        let line = self.inspector.cursor_line;
        if self.line_index.contains_key(&line) {
            self.open_lines = self.open_lines.toggled(line);
        } else {
            self.set_message("No issue on this line");
        }
    }

    /// Rows the detail panel under `line` occupies when open: one per body
    /// row (prefixes, description, source, position, documentation),
    /// matching what the inspector renders.
    pub fn detail_panel_height(&self, line: usize) -> usize {
        let Some(occurrence) = self.occurrence_on_line(line) else {
            return 0;
        };
        let mut rows = 2; // source + position
        if !occurrence.missing_prefixes.is_empty() {
            rows += 1;
        }
        if occurrence.compat.description.is_some() {
            rows += 1;
        }
        if occurrence.compat.mdn_url.is_some() {
            rows += 1;
        }
        rows
    }

    // --- Scrolling -----------------------------------------------------

    /// Visual row of a stylesheet line: the line itself plus every open
    /// detail panel above it
    pub fn visual_row_of(&self, line: usize) -> usize {
        let panels_above: usize = self
            .line_index
            .range(..line)
            .filter(|(l, _)| self.open_lines.is_open(**l))
            .map(|(l, _)| self.detail_panel_height(*l))
            .sum();
        line + panels_above
    }

    /// Total visual rows the inspector can scroll over
    pub fn total_visual_rows(&self) -> usize {
        let panels: usize = self
            .line_index
            .keys()
            .filter(|line| self.open_lines.is_open(**line))
            .map(|line| self.detail_panel_height(*line))
            .sum();
        self.stylesheet_lines.len() + panels
    }

    pub fn cursor_down(&mut self, lines: usize) {
        let max_line = self.stylesheet_lines.len().saturating_sub(1);
        self.inspector.cursor_line = (self.inspector.cursor_line + lines).min(max_line);
        self.ensure_cursor_visible();
    }

    pub fn cursor_up(&mut self, lines: usize) {
        self.inspector.cursor_line = self.inspector.cursor_line.saturating_sub(lines);
        self.ensure_cursor_visible();
    }

    pub fn scroll_down(&mut self, lines: usize) {
        let max_line = self.stylesheet_lines.len().saturating_sub(1);
        let max_scroll = self.max_scroll_offset();
        self.inspector.cursor_line = (self.inspector.cursor_line + lines).min(max_line);
        self.inspector.scroll_offset = (self.inspector.scroll_offset + lines).min(max_scroll);
        self.ensure_cursor_visible();
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.inspector.cursor_line = self.inspector.cursor_line.saturating_sub(lines);
        self.inspector.scroll_offset = self.inspector.scroll_offset.saturating_sub(lines);
        self.ensure_cursor_visible();
    }

    pub fn go_to_top(&mut self) {
        self.inspector.cursor_line = 0;
        self.inspector.scroll_offset = 0;
    }

    pub fn go_to_bottom(&mut self) {
        self.inspector.cursor_line = self.stylesheet_lines.len().saturating_sub(1);
        self.ensure_cursor_visible();
    }

    pub fn max_scroll_offset(&self) -> usize {
        let viewport = self.inspector.viewport_height.max(1);
        self.total_visual_rows().saturating_sub(viewport)
    }

    fn ensure_cursor_visible(&mut self) {
        let viewport = self.inspector.viewport_height.max(1);
        let cursor_row = self.visual_row_of(self.inspector.cursor_line);
        if cursor_row < self.inspector.scroll_offset {
            self.inspector.scroll_offset = cursor_row;
        }
        if cursor_row >= self.inspector.scroll_offset + viewport {
            self.inspector.scroll_offset = cursor_row - viewport + 1;
        }
    }

    // --- Sidebar -------------------------------------------------------

    pub fn stylesheet_list_down(&mut self, n: usize) {
        let max = self.report.stylesheet_names().len().saturating_sub(1);
        self.stylesheet_cursor = (self.stylesheet_cursor + n).min(max);
    }

    pub fn stylesheet_list_up(&mut self, n: usize) {
        self.stylesheet_cursor = self.stylesheet_cursor.saturating_sub(n);
    }

    pub fn select_stylesheet_at_cursor(&mut self) {
        let Some(name) = self
            .report
            .stylesheet_names()
            .get(self.stylesheet_cursor)
            .map(|name| name.to_string())
        else {
            return;
        };
        self.select_stylesheet(&name);
        self.focused_panel = FocusedPanel::Inspector;
    }

    pub fn issue_list_down(&mut self, n: usize) {
        let max = self.issue_entries.len().saturating_sub(1);
        self.issue_cursor = (self.issue_cursor + n).min(max);
    }

    pub fn issue_list_up(&mut self, n: usize) {
        self.issue_cursor = self.issue_cursor.saturating_sub(n);
    }

    // --- Messages ------------------------------------------------------

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(Message {
            content: msg.into(),
            message_type: MessageType::Info,
        });
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.message = Some(Message {
            content: msg.into(),
            message_type: MessageType::Warning,
        });
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.message = Some(Message {
            content: msg.into(),
            message_type: MessageType::Error,
        });
    }

    pub fn toggle_help(&mut self) {
        self.input_mode = match self.input_mode {
            InputMode::Help => InputMode::Normal,
            _ => InputMode::Help,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CompatInfo, IssueOccurrence, Position, TextSpan};
    use std::collections::BTreeMap;

    fn occurrence(source: &str, line: u32) -> IssueOccurrence {
        IssueOccurrence {
            source: source.to_string(),
            span: TextSpan {
                start: Position { line, column: 3 },
                end: Position { line, column: 9 },
            },
            missing_prefixes: Vec::new(),
            compat: CompatInfo::default(),
        }
    }

    fn test_report() -> CompatReport {
        let mut issues = VersionIssues::new();
        issues.insert(
            "flexbox".to_string(),
            vec![
                occurrence("a.css", 3),
                occurrence("a.css", 3),
                occurrence("a.css", 7),
                occurrence("b.css", 2),
            ],
        );
        issues.insert("grid".to_string(), vec![occurrence("a.css", 5)]);

        let mut versions = BTreeMap::new();
        versions.insert("66".to_string(), issues);
        versions.insert("80".to_string(), VersionIssues::new());

        let mut browsers = BTreeMap::new();
        browsers.insert("chrome".to_string(), versions);

        let mut firefox_versions = BTreeMap::new();
        firefox_versions.insert("52".to_string(), VersionIssues::new());
        browsers.insert("firefox".to_string(), firefox_versions);

        let mut stylesheets = BTreeMap::new();
        stylesheets.insert(
            "a.css".to_string(),
            ".a { display: flex; }\n.b {}\n.c { flex: 1; }\n.d {}\n.e { display: grid; }\n.f {}\n.g { flex-wrap: wrap; }\n.h {}\n".to_string(),
        );
        stylesheets.insert("b.css".to_string(), ".z { display: flex; }\n.y {}\n".to_string());

        CompatReport {
            generated_at: None,
            browsers,
            stylesheets,
            stylesheet_files: BTreeMap::new(),
        }
    }

    fn test_app() -> App {
        App::new(test_report(), Theme::dark(), AppOptions::default()).expect("app should build")
    }

    mod expansion_tests {
        use super::*;

        #[test]
        fn lines_default_to_closed() {
            let state = ExpansionState::default();
            assert!(!state.is_open(7));
        }

        #[test]
        fn first_toggle_opens_a_line() {
            let state = ExpansionState::default().toggled(7);
            assert!(state.is_open(7));
            assert!(!state.is_open(3));
        }

        #[test]
        fn toggling_twice_restores_prior_state() {
            let state = ExpansionState::default().toggled(7).toggled(7);
            assert!(!state.is_open(7));
        }

        #[test]
        fn toggle_leaves_other_lines_unchanged() {
            let state = ExpansionState::default().toggled(2).toggled(9);
            assert!(state.is_open(2));
            assert!(state.is_open(9));
            let state = state.toggled(9);
            assert!(state.is_open(2));
            assert!(!state.is_open(9));
        }

        #[test]
        fn toggle_is_non_destructive() {
            let original = ExpansionState::default().toggled(4);
            let _updated = original.toggled(4);
            assert!(original.is_open(4));
        }
    }

    mod selection_tests {
        use super::*;

        #[test]
        fn new_app_starts_with_first_browser_and_no_stylesheet() {
            let app = test_app();
            assert_eq!(app.browser, "chrome");
            assert_eq!(app.version, "66");
            assert!(app.stylesheet.is_none());
            assert!(app.line_index.is_empty());
        }

        #[test]
        fn selecting_a_stylesheet_builds_the_line_index() {
            let mut app = test_app();
            app.select_stylesheet("a.css");

            assert_eq!(app.stylesheet_lines.len(), 8);
            // flexbox wins line 3 (index 2), grid line 5 (index 4),
            // flexbox instance 2 wins line 7 (index 6)
            assert_eq!(app.line_index.len(), 3);
            assert_eq!(app.line_index[&2].issue_key, "flexbox");
            assert_eq!(app.line_index[&2].instance, 0);
            assert_eq!(app.line_index[&4].issue_key, "grid");
            assert_eq!(app.line_index[&6].instance, 2);
        }

        #[test]
        fn selecting_a_new_stylesheet_resets_expansion_state() {
            let mut app = test_app();
            app.select_stylesheet("a.css");
            app.inspector.cursor_line = 2;
            app.toggle_line_at_cursor();
            assert!(app.open_lines.is_open(2));

            app.select_stylesheet("b.css");
            assert!(!app.open_lines.is_open(2));
            assert_eq!(app.inspector.cursor_line, 0);
        }

        #[test]
        fn reselecting_the_same_stylesheet_keeps_state() {
            let mut app = test_app();
            app.select_stylesheet("a.css");
            app.inspector.cursor_line = 2;
            app.toggle_line_at_cursor();

            app.select_stylesheet("a.css");
            assert!(app.open_lines.is_open(2));
        }

        #[test]
        fn selecting_unknown_stylesheet_sets_error_and_keeps_selection() {
            let mut app = test_app();
            app.select_stylesheet("a.css");
            app.select_stylesheet("missing.css");

            assert_eq!(app.stylesheet.as_deref(), Some("a.css"));
            assert!(matches!(
                app.message,
                Some(Message {
                    message_type: MessageType::Error,
                    ..
                })
            ));
        }

        #[test]
        fn cycling_version_rebuilds_index_and_clears_active_issue() {
            let mut app = test_app();
            app.select_stylesheet("a.css");
            app.jump_to_issue(0);
            assert!(app.active_issue.is_some());

            app.next_version();
            assert_eq!(app.version, "80");
            assert!(app.active_issue.is_none());
            assert!(app.line_index.is_empty(), "version 80 has no issues");
        }

        #[test]
        fn cycling_browser_resets_version_when_missing() {
            let mut app = test_app();
            app.next_browser();
            assert_eq!(app.browser, "firefox");
            assert_eq!(app.version, "52");
        }

        #[test]
        fn configured_default_browser_is_honored() {
            let options = AppOptions {
                default_browser: Some("firefox".to_string()),
                ..AppOptions::default()
            };
            let app = App::new(test_report(), Theme::dark(), options).expect("app should build");
            assert_eq!(app.browser, "firefox");
            assert_eq!(app.version, "52");
        }

        #[test]
        fn unknown_default_browser_falls_back_to_first() {
            let options = AppOptions {
                default_browser: Some("netscape".to_string()),
                ..AppOptions::default()
            };
            let app = App::new(test_report(), Theme::dark(), options).expect("app should build");
            assert_eq!(app.browser, "chrome");
        }
    }

    mod issue_navigation_tests {
        use super::*;

        #[test]
        fn issue_entries_number_instances_per_source() {
            let app = test_app();
            let flexbox_a: Vec<&IssueEntry> = app
                .issue_entries
                .iter()
                .filter(|e| e.issue_key == "flexbox" && e.source == "a.css")
                .collect();
            assert_eq!(flexbox_a.len(), 3);
            assert_eq!(
                flexbox_a.iter().map(|e| e.instance).collect::<Vec<_>>(),
                vec![0, 1, 2]
            );

            let flexbox_b: Vec<&IssueEntry> = app
                .issue_entries
                .iter()
                .filter(|e| e.issue_key == "flexbox" && e.source == "b.css")
                .collect();
            assert_eq!(flexbox_b.len(), 1);
            assert_eq!(flexbox_b[0].instance, 0);
        }

        #[test]
        fn jump_to_issue_selects_stylesheet_and_arms_scroll() {
            let mut app = test_app();
            app.jump_to_issue(0);

            assert_eq!(app.stylesheet.as_deref(), Some("a.css"));
            assert!(app.scroll_is_pending());
            let active = app.active_issue.as_ref().expect("active issue set");
            assert_eq!(active.issue_key, "flexbox");
            assert_eq!(active.instance, 0);
        }

        #[test]
        fn resolve_pending_scroll_moves_cursor_and_clears_latch() {
            let mut app = test_app();
            app.inspector.viewport_height = 4;
            // flexbox instance 2 is indexed on line 7 (index 6)
            let entry_idx = app
                .issue_entries
                .iter()
                .position(|e| e.issue_key == "flexbox" && e.instance == 2)
                .expect("entry exists");
            app.jump_to_issue(entry_idx);

            app.resolve_pending_scroll();
            assert_eq!(app.inspector.cursor_line, 6);
            assert_eq!(app.inspector.scroll_offset, 6 - SCROLL_TOP_MARGIN);
            assert!(!app.scroll_is_pending());

            // A second resolve in the same state is a no-op: the latch fired.
            app.inspector.scroll_offset = 0;
            app.resolve_pending_scroll();
            assert_eq!(app.inspector.scroll_offset, 0);
        }

        #[test]
        fn unreachable_active_issue_scrolls_nowhere() {
            let mut app = test_app();
            // flexbox instance 1 lost line 3 to instance 0
            let entry_idx = app
                .issue_entries
                .iter()
                .position(|e| e.issue_key == "flexbox" && e.instance == 1)
                .expect("entry exists");
            app.jump_to_issue(entry_idx);

            app.resolve_pending_scroll();
            assert_eq!(app.inspector.cursor_line, 0);
            assert_eq!(app.inspector.scroll_offset, 0);
            assert!(!app.scroll_is_pending());
        }

        #[test]
        fn next_issue_wraps_around() {
            let mut app = test_app();
            let count = app.issue_entries.len();
            app.issue_cursor = count - 1;
            app.next_issue();
            assert_eq!(app.issue_cursor, 0);
        }

        #[test]
        fn configured_scroll_margin_shapes_the_scroll_offset() {
            let options = AppOptions {
                scroll_margin: 1,
                ..AppOptions::default()
            };
            let mut app =
                App::new(test_report(), Theme::dark(), options).expect("app should build");
            let entry_idx = app
                .issue_entries
                .iter()
                .position(|e| e.issue_key == "flexbox" && e.instance == 2)
                .expect("entry exists");
            app.jump_to_issue(entry_idx);

            app.resolve_pending_scroll();
            assert_eq!(app.inspector.scroll_offset, 5);
        }
    }

    mod inspector_tests {
        use super::*;

        #[test]
        fn toggle_at_cursor_only_works_on_annotated_lines() {
            let mut app = test_app();
            app.select_stylesheet("a.css");

            app.inspector.cursor_line = 1; // unannotated
            app.toggle_line_at_cursor();
            assert!(!app.open_lines.is_open(1));

            app.inspector.cursor_line = 2; // flexbox line
            app.toggle_line_at_cursor();
            assert!(app.open_lines.is_open(2));
        }

        #[test]
        fn visual_rows_account_for_open_panels() {
            let mut app = test_app();
            app.select_stylesheet("a.css");

            assert_eq!(app.visual_row_of(6), 6);
            assert_eq!(app.total_visual_rows(), 8);

            app.inspector.cursor_line = 2;
            app.toggle_line_at_cursor();
            // Open panel on line index 2 (source + position rows)
            assert_eq!(app.detail_panel_height(2), 2);
            assert_eq!(app.visual_row_of(1), 1);
            assert_eq!(app.visual_row_of(6), 8);
            assert_eq!(app.total_visual_rows(), 10);
        }

        #[test]
        fn detail_panel_height_counts_optional_rows() {
            let mut report = test_report();
            let grid = report
                .browsers
                .get_mut("chrome")
                .and_then(|versions| versions.get_mut("66"))
                .and_then(|issues| issues.get_mut("grid"))
                .expect("grid issues exist");
            grid[0].missing_prefixes = vec!["-ms-".to_string()];
            grid[0].compat.description = Some("Needs the -ms- prefix".to_string());
            grid[0].compat.mdn_url =
                Some("https://developer.mozilla.org/docs/Web/CSS/grid".to_string());

            let mut app =
                App::new(report, Theme::dark(), AppOptions::default()).expect("app should build");
            app.select_stylesheet("a.css");

            assert_eq!(app.detail_panel_height(4), 5, "all optional rows present");
            assert_eq!(app.detail_panel_height(2), 2, "source and position only");
            assert_eq!(app.detail_panel_height(1), 0, "no annotation, no panel");
        }

        #[test]
        fn cursor_is_clamped_to_stylesheet_length() {
            let mut app = test_app();
            app.select_stylesheet("b.css");
            app.inspector.viewport_height = 10;

            app.cursor_down(99);
            assert_eq!(app.inspector.cursor_line, 1);
            app.cursor_up(99);
            assert_eq!(app.inspector.cursor_line, 0);
        }

        #[test]
        fn ensure_cursor_visible_scrolls_the_viewport() {
            let mut app = test_app();
            app.select_stylesheet("a.css");
            app.inspector.viewport_height = 3;

            app.cursor_down(5);
            // Cursor at visual row 5, viewport of 3 -> offset 3
            assert_eq!(app.inspector.scroll_offset, 3);

            app.cursor_up(5);
            assert_eq!(app.inspector.scroll_offset, 0);
        }
    }
}
