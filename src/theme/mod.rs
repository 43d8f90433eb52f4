//! Theme support for compatview
//!
//! Provides dark and light themes, plus CLI argument parsing for theme
//! selection and the report path.

use std::path::PathBuf;
use std::sync::OnceLock;

use ratatui::style::Color;
use two_face::theme::EmbeddedThemeName;

use crate::config::config_path_hint;
use crate::syntax::SyntaxHighlighter;

/// Complete color theme for the application
pub struct Theme {
    /// Cached syntax highlighter (lazily initialized)
    highlighter: OnceLock<SyntaxHighlighter>,

    // Base colors
    pub panel_bg: Color,
    pub bg_highlight: Color,
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_dim: Color,

    // Inspector colors
    pub line_number: Color,
    pub issue_line_fg: Color,
    pub issue_line_bg: Color,
    pub issue_open_bg: Color,
    pub active_marker: Color,

    // Detail panel colors
    pub detail_border: Color,
    pub detail_label: Color,
    pub prefix_code: Color,
    pub link: Color,

    // Syntect theme name for syntax highlighting
    pub syntect_theme: EmbeddedThemeName,

    // UI element colors
    pub border_focused: Color,
    pub border_unfocused: Color,
    pub status_bar_bg: Color,
    pub cursor_color: Color,
    pub issue_count: Color,

    // Message colors
    pub message_info_fg: Color,
    pub message_info_bg: Color,
    pub message_warning_fg: Color,
    pub message_warning_bg: Color,
    pub message_error_fg: Color,
    pub message_error_bg: Color,

    // Mode indicator colors
    pub mode_fg: Color,
    pub mode_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create the dark theme (default colors)
    pub fn dark() -> Self {
        Self {
            highlighter: OnceLock::new(),

            // Base colors
            panel_bg: Color::Rgb(22, 23, 29),
            bg_highlight: Color::Rgb(58, 62, 76),
            fg_primary: Color::Rgb(236, 238, 242),
            fg_secondary: Color::Rgb(198, 204, 215),
            fg_dim: Color::Rgb(138, 144, 158),

            // Inspector colors
            line_number: Color::Rgb(108, 114, 128),
            issue_line_fg: Color::Rgb(252, 205, 96),
            issue_line_bg: Color::Rgb(64, 47, 8),
            issue_open_bg: Color::Rgb(86, 62, 10),
            active_marker: Color::Rgb(96, 196, 248),

            // Detail panel colors
            detail_border: Color::Rgb(252, 205, 96),
            detail_label: Color::Rgb(96, 196, 248),
            prefix_code: Color::Rgb(238, 108, 108),
            link: Color::Rgb(108, 168, 252),

            // Syntect theme for syntax highlighting
            syntect_theme: EmbeddedThemeName::Base16EightiesDark,

            // UI element colors
            border_focused: Color::Rgb(96, 196, 248),
            border_unfocused: Color::Rgb(98, 104, 116),
            status_bar_bg: Color::Rgb(32, 34, 42),
            cursor_color: Color::Rgb(252, 205, 96),
            issue_count: Color::Rgb(238, 108, 108),

            // Message colors
            message_info_fg: Color::Rgb(16, 18, 24),
            message_info_bg: Color::Rgb(96, 196, 248),
            message_warning_fg: Color::Rgb(16, 18, 24),
            message_warning_bg: Color::Rgb(252, 205, 96),
            message_error_fg: Color::Rgb(240, 242, 246),
            message_error_bg: Color::Rgb(210, 74, 74),

            // Mode indicator colors
            mode_fg: Color::Rgb(16, 18, 24),
            mode_bg: Color::Rgb(96, 196, 248),
        }
    }

    /// Create the light theme (optimized for light terminal backgrounds)
    pub fn light() -> Self {
        Self {
            highlighter: OnceLock::new(),

            // Base colors - dark text on light background
            panel_bg: Color::Rgb(248, 246, 238),
            bg_highlight: Color::Rgb(206, 210, 226),
            fg_primary: Color::Rgb(20, 22, 28),
            fg_secondary: Color::Rgb(46, 50, 60),
            fg_dim: Color::Rgb(96, 102, 114),

            // Inspector colors - subtle backgrounds, dark text
            line_number: Color::Rgb(122, 128, 140),
            issue_line_fg: Color::Rgb(132, 84, 6),
            issue_line_bg: Color::Rgb(252, 238, 196),
            issue_open_bg: Color::Rgb(246, 224, 152),
            active_marker: Color::Rgb(12, 74, 158),

            // Detail panel colors
            detail_border: Color::Rgb(132, 84, 6),
            detail_label: Color::Rgb(12, 74, 158),
            prefix_code: Color::Rgb(168, 24, 24),
            link: Color::Rgb(12, 74, 158),

            // Syntect theme for syntax highlighting (light variant)
            syntect_theme: EmbeddedThemeName::Base16OceanLight,

            // UI element colors
            border_focused: Color::Rgb(12, 74, 158),
            border_unfocused: Color::Rgb(124, 128, 138),
            status_bar_bg: Color::Rgb(214, 216, 228),
            cursor_color: Color::Rgb(132, 84, 6),
            issue_count: Color::Rgb(168, 24, 24),

            // Message colors
            message_info_fg: Color::Rgb(248, 250, 252),
            message_info_bg: Color::Rgb(24, 100, 172),
            message_warning_fg: Color::Rgb(24, 20, 8),
            message_warning_bg: Color::Rgb(240, 206, 128),
            message_error_fg: Color::Rgb(248, 250, 252),
            message_error_bg: Color::Rgb(172, 48, 48),

            // Mode indicator colors
            mode_fg: Color::Rgb(248, 250, 252),
            mode_bg: Color::Rgb(24, 100, 172),
        }
    }

    /// Get the syntax highlighter for this theme (lazily initialized, cached)
    pub fn syntax_highlighter(&self) -> &SyntaxHighlighter {
        self.highlighter
            .get_or_init(|| SyntaxHighlighter::new(self.syntect_theme))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeArg {
    #[default]
    Dark,
    Light,
}

const VALID_THEMES: &str = "dark, light";

/// CLI arguments parsed from command line
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Path to the compatibility report to inspect
    pub report: Option<PathBuf>,
    pub theme: Option<ThemeArg>,
}

impl ThemeArg {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    fn build(self) -> Theme {
        match self {
            Self::Dark => Theme::dark(),
            Self::Light => Theme::light(),
        }
    }
}

/// Resolve the theme from CLI and config, CLI winning. An unknown config
/// value falls back to dark with a warning; unknown CLI values were already
/// rejected at parse time.
pub fn resolve_theme_with_config(
    cli_theme: Option<ThemeArg>,
    config_theme: Option<&str>,
) -> (Theme, Vec<String>) {
    if let Some(theme) = cli_theme {
        return (theme.build(), Vec::new());
    }

    match config_theme {
        None => (ThemeArg::default().build(), Vec::new()),
        Some(name) => match ThemeArg::from_str(name) {
            Some(theme) => (theme.build(), Vec::new()),
            None => (
                ThemeArg::default().build(),
                vec![format!(
                    "Warning: Unknown theme '{name}' in config, using dark. Valid options: {VALID_THEMES}"
                )],
            ),
        },
    }
}

/// Print help message and exit
fn print_help() -> ! {
    let name = std::env::args()
        .next()
        .and_then(|p| {
            std::path::Path::new(&p)
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "compatview".to_string());
    let config_path = config_path_hint();
    println!(
        "compatview - Inspect CSS browser-compatibility reports in your terminal

Usage: {name} [OPTIONS] <REPORT>

Arguments:
  <REPORT>               Path to a compatibility report (JSON)

Options:
  --theme <THEME>        Color theme to use [default: dark]
                         Valid values: {VALID_THEMES}
                         Precedence: --theme > {config_path} > dark
  -h, --help             Print this help message

Press ? in the application for keybinding help."
    );
    std::process::exit(0);
}

fn parse_theme_value(value: &str) -> Result<ThemeArg, String> {
    if value.is_empty() || value.starts_with('-') {
        return Err(format!("--theme requires a value ({VALID_THEMES})"));
    }
    ThemeArg::from_str(value)
        .ok_or_else(|| format!("Unknown theme '{value}'. Valid options: {VALID_THEMES}"))
}

/// Parse CLI arguments from command line
///
/// We use a handrolled argument parser instead of clap to keep binary size
/// small and build times fast. If we end up needing more complex argument
/// handling, we can revisit this decision.
pub fn parse_cli_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    parse_cli_args_from(&args).unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        std::process::exit(2);
    })
}

fn parse_cli_args_from(args: &[String]) -> Result<CliArgs, String> {
    let mut cli_args = CliArgs::default();

    let mut i = 1;
    while i < args.len() {
        let arg = &args[i];

        if arg == "-h" || arg == "--help" {
            print_help();
        }

        if arg == "--theme" {
            let value = args.get(i + 1).map(String::as_str).unwrap_or_default();
            cli_args.theme = Some(parse_theme_value(value)?);
            i += 2;
            continue;
        }

        if let Some(value) = arg.strip_prefix("--theme=") {
            cli_args.theme = Some(parse_theme_value(value)?);
            i += 1;
            continue;
        }

        if arg.starts_with('-') {
            return Err(format!("Unknown option '{arg}'"));
        }

        if cli_args.report.is_some() {
            return Err(format!("Unexpected extra argument '{arg}'"));
        }
        cli_args.report = Some(PathBuf::from(arg));
        i += 1;
    }

    Ok(cli_args)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_for_test(args: &[&str]) -> Result<CliArgs, String> {
        let args = args.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        parse_cli_args_from(&args)
    }

    #[test]
    fn should_parse_report_path_as_positional() {
        let args = parse_for_test(&["compatview", "report.json"]).unwrap();
        assert_eq!(args.report, Some(PathBuf::from("report.json")));
        assert_eq!(args.theme, None);
    }

    #[test]
    fn should_parse_theme_with_separate_value() {
        let args = parse_for_test(&["compatview", "--theme", "light", "report.json"]).unwrap();
        assert_eq!(args.theme, Some(ThemeArg::Light));
        assert_eq!(args.report, Some(PathBuf::from("report.json")));
    }

    #[test]
    fn should_parse_theme_with_equals_value() {
        let args = parse_for_test(&["compatview", "--theme=dark", "report.json"]).unwrap();
        assert_eq!(args.theme, Some(ThemeArg::Dark));
    }

    #[test]
    fn should_reject_unknown_theme() {
        let result = parse_for_test(&["compatview", "--theme", "sepia"]);
        assert!(result.is_err());
    }

    #[test]
    fn should_reject_theme_without_value() {
        let result = parse_for_test(&["compatview", "--theme"]);
        assert!(result.is_err());
    }

    #[test]
    fn should_reject_unknown_option() {
        let result = parse_for_test(&["compatview", "--frobnicate"]);
        assert!(result.is_err());
    }

    #[test]
    fn should_reject_second_positional_argument() {
        let result = parse_for_test(&["compatview", "a.json", "b.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn theme_arg_from_str_is_case_insensitive() {
        assert_eq!(ThemeArg::from_str(" Light "), Some(ThemeArg::Light));
        assert_eq!(ThemeArg::from_str("DARK"), Some(ThemeArg::Dark));
        assert_eq!(ThemeArg::from_str("sepia"), None);
    }

    // Themes carry no identity, so resolution is asserted through the
    // syntect theme name each variant pins.
    #[test]
    fn cli_theme_takes_precedence_over_config() {
        let (theme, warnings) = resolve_theme_with_config(Some(ThemeArg::Light), Some("dark"));
        assert!(matches!(
            theme.syntect_theme,
            EmbeddedThemeName::Base16OceanLight
        ));
        assert!(warnings.is_empty());
    }

    #[test]
    fn config_theme_is_used_when_cli_absent() {
        let (theme, warnings) = resolve_theme_with_config(None, Some("light"));
        assert!(matches!(
            theme.syntect_theme,
            EmbeddedThemeName::Base16OceanLight
        ));
        assert!(warnings.is_empty());
    }

    #[test]
    fn unknown_config_theme_warns_and_falls_back_to_dark() {
        let (theme, warnings) = resolve_theme_with_config(None, Some("sepia"));
        assert!(matches!(
            theme.syntect_theme,
            EmbeddedThemeName::Base16EightiesDark
        ));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("sepia"));
    }
}
