use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::{App, FocusedPanel};
use crate::ui::styles;

pub fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(35), // Stylesheet list
            Constraint::Percentage(65), // Issue navigator
        ])
        .split(area);

    render_stylesheet_list(frame, app, chunks[0]);
    render_issue_list(frame, app, chunks[1]);
}

fn render_stylesheet_list(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focused_panel == FocusedPanel::Stylesheets;

    let block = Block::default()
        .title(" Stylesheets ")
        .borders(Borders::ALL)
        .border_style(styles::border_style(&app.theme, focused));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let names = app.report.stylesheet_names();
    if names.is_empty() {
        let placeholder = Paragraph::new(Line::from(Span::styled(
            " (report carries no stylesheets)",
            styles::dim_style(&app.theme),
        )));
        frame.render_widget(placeholder, inner);
        return;
    }

    let name_width = (inner.width as usize).saturating_sub(8);
    let items: Vec<Line> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let is_selected = app.stylesheet.as_deref() == Some(*name);
            let is_cursor = focused && i == app.stylesheet_cursor;
            let count = app
                .report
                .issue_count_for_source(&app.browser, &app.version, name);

            let pointer = if is_selected { "▶" } else { " " };
            let style = if is_cursor {
                styles::selected_style(&app.theme)
            } else {
                Style::default()
            };

            let count_span = if count > 0 {
                Span::styled(format!(" {count}"), styles::issue_count_style(&app.theme))
            } else {
                Span::styled(" ✓", styles::dim_style(&app.theme))
            };

            Line::from(vec![
                Span::styled(pointer.to_string(), style),
                Span::styled(format!(" {}", truncate_to_width(name, name_width)), style),
                count_span,
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(items), inner);
}

fn render_issue_list(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focused_panel == FocusedPanel::Issues;

    let title = format!(" Issues [{} {}] ", app.browser, app.version);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(styles::border_style(&app.theme, focused));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.issue_entries.is_empty() {
        let placeholder = Paragraph::new(Line::from(Span::styled(
            " No issues for this browser version",
            styles::dim_style(&app.theme),
        )));
        frame.render_widget(placeholder, inner);
        return;
    }

    let viewport = inner.height as usize;
    // Keep the cursor row in view for long issue lists
    let scroll = app
        .issue_cursor
        .saturating_sub(viewport.saturating_sub(1) / 2)
        .min(app.issue_entries.len().saturating_sub(viewport));

    let key_width = (inner.width as usize).saturating_sub(6);
    let items: Vec<Line> = app
        .issue_entries
        .iter()
        .enumerate()
        .skip(scroll)
        .take(viewport)
        .map(|(i, entry)| {
            let is_cursor = focused && i == app.issue_cursor;
            let is_active = app.active_issue.as_ref().is_some_and(|active| {
                active.issue_key == entry.issue_key && active.instance == entry.instance
            }) && app.stylesheet.as_deref() == Some(entry.source.as_str());

            let style = if is_cursor {
                styles::selected_style(&app.theme)
            } else {
                Style::default()
            };
            let marker = if is_active {
                Span::styled("▶", styles::active_marker_style(&app.theme))
            } else {
                Span::raw(" ")
            };

            let label = format!(
                "{} #{} {}:{}",
                entry.issue_key, entry.instance, entry.source, entry.line
            );
            Line::from(vec![
                marker,
                Span::styled(format!(" {}", truncate_to_width(&label, key_width)), style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(items), inner);
}

/// Truncate a label to a display width, appending an ellipsis when cut
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    let budget = max_width.saturating_sub(1);
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_leaves_short_labels_alone() {
        assert_eq!(truncate_to_width("a.css", 20), "a.css");
    }

    #[test]
    fn truncate_cuts_long_labels_with_ellipsis() {
        assert_eq!(truncate_to_width("stylesheet-name.css", 8), "stylesh…");
    }

    #[test]
    fn truncate_respects_wide_characters() {
        // Each CJK character is two columns wide
        let truncated = truncate_to_width("漢字漢字", 5);
        assert_eq!(truncated, "漢字…");
    }
}
