use ratatui::style::{Color, Modifier, Style};
use std::path::Path;
use syntect::easy::HighlightLines;
use syntect::highlighting::FontStyle;
use two_face::theme::EmbeddedThemeName;

/// A single line of highlighted spans (style + text pairs).
pub type HighlightedSpans = Vec<(Style, String)>;

/// Per-line highlight results for a stylesheet: `None` for a line syntect
/// could not process, so the renderer can fall back to plain text.
pub type HighlightedLines = Vec<Option<HighlightedSpans>>;

/// Highlights the text lines of a stylesheet
pub struct SyntaxHighlighter {
    syntax_set: syntect::parsing::SyntaxSet,
    theme: syntect::highlighting::Theme,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new(EmbeddedThemeName::Base16EightiesDark)
    }
}

impl SyntaxHighlighter {
    pub fn new(theme_name: EmbeddedThemeName) -> Self {
        Self {
            syntax_set: two_face::syntax::extra_newlines(),
            theme: two_face::theme::extra()[theme_name].clone(),
        }
    }

    /// Highlight every line of a stylesheet.
    ///
    /// A highlight failure is scoped to its line: that entry becomes `None`
    /// and the remaining lines keep their highlighting. Sources whose
    /// extension resolves to no syntax are highlighted as plain CSS, since
    /// everything a compatibility report names is a stylesheet of some kind.
    pub fn highlight_stylesheet_lines(&self, source: &str, lines: &[String]) -> HighlightedLines {
        let Some(syntax) = self.resolve_syntax(Path::new(source)) else {
            return vec![None; lines.len()];
        };

        let mut highlighter = HighlightLines::new(syntax, &self.theme);
        lines
            .iter()
            .map(|line| {
                let ranges = highlighter.highlight_line(line, &self.syntax_set).ok()?;
                Some(
                    ranges
                        .into_iter()
                        .map(|(style, text)| (convert_style(style), text.to_string()))
                        .collect(),
                )
            })
            .collect()
    }

    /// Resolve a syntax definition for a source name: exact extension first,
    /// then lowercased, then a preprocessor alias, then plain CSS.
    fn resolve_syntax(&self, source: &Path) -> Option<&syntect::parsing::SyntaxReference> {
        let by_ext = |ext: &str| self.syntax_set.find_syntax_by_extension(ext);

        if let Some(ext) = source.extension().and_then(|e| e.to_str()) {
            let normalized = ext.to_ascii_lowercase();
            if let Some(syntax) = by_ext(ext)
                .or_else(|| by_ext(&normalized))
                .or_else(|| preprocessor_alias(&normalized).and_then(by_ext))
            {
                return Some(syntax);
            }
        }

        by_ext("css")
    }
}

/// Map preprocessor extensions two-face has no grammar for onto one it does
fn preprocessor_alias(ext: &str) -> Option<&'static str> {
    match ext {
        "pcss" | "postcss" | "styl" | "stylus" => Some("css"),
        "sass" => Some("scss"),
        _ => None,
    }
}

fn convert_style(style: syntect::highlighting::Style) -> Style {
    let fg = style.foreground;
    let mut converted = Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b));

    for (font_style, modifier) in [
        (FontStyle::BOLD, Modifier::BOLD),
        (FontStyle::ITALIC, Modifier::ITALIC),
        (FontStyle::UNDERLINE, Modifier::UNDERLINED),
    ] {
        if style.font_style.contains(font_style) {
            converted = converted.add_modifier(modifier);
        }
    }

    converted
}
