use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::annotate::position_label;
use crate::app::{App, FocusedPanel};
use crate::model::IssueOccurrence;
use crate::ui::styles;

/// Render the stylesheet inspector: the selected stylesheet's lines with
/// highlighted issue lines and their expanded detail panels.
pub fn render_inspector(frame: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.focused_panel == FocusedPanel::Inspector;

    let title = match &app.stylesheet {
        Some(name) => format!(" {name} "),
        None => " Inspector ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(styles::border_style(&app.theme, focused));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    app.inspector.viewport_height = inner.height as usize;

    if app.stylesheet.is_none() {
        render_placeholder(frame, app, inner);
        return;
    }

    // The scroll decision for a newly activated issue is data computed once
    // per pass, before any line is laid out.
    app.resolve_pending_scroll();

    let gutter_width = line_number_width(app.stylesheet_lines.len());
    let mut rows: Vec<Line> = Vec::new();

    for (number, text) in app.stylesheet_lines.iter().enumerate() {
        let annotation = app.line_index.get(&number);
        let is_open = annotation.is_some() && app.open_lines.is_open(number);
        let is_cursor = focused && number == app.inspector.cursor_line;
        let is_active = match (&app.active_issue, annotation) {
            (Some(active), Some(annotation)) => {
                annotation.issue_key == active.issue_key && annotation.instance == active.instance
            }
            _ => false,
        };

        let marker = if is_active {
            Span::styled("▶", styles::active_marker_style(&app.theme))
        } else {
            Span::raw(" ")
        };
        let gutter = Span::styled(
            format!("{:>gutter_width$} ", number + 1),
            if is_cursor {
                styles::cursor_gutter_style(&app.theme)
            } else {
                styles::line_number_style(&app.theme)
            },
        );

        let mut spans = vec![marker, gutter];
        spans.extend(content_spans(app, number, text, annotation.is_some(), is_open));

        let mut line = Line::from(spans);
        if is_cursor {
            line = line.style(styles::cursor_line_style(&app.theme));
        }
        rows.push(line);

        if is_open && let Some(occurrence) = app.occurrence_on_line(number) {
            rows.extend(detail_lines(app, occurrence, gutter_width));
        }
    }

    let visible: Vec<Line> = rows
        .into_iter()
        .skip(app.inspector.scroll_offset)
        .take(inner.height as usize)
        .collect();

    frame.render_widget(Paragraph::new(visible), inner);
}

/// Shown when no stylesheet is selected
fn render_placeholder(frame: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Select a stylesheet from the sidebar",
            styles::dim_style(&app.theme),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// Spans for one stylesheet line: syntect highlighting when available, with
/// the issue background overlaid on annotated lines
fn content_spans(
    app: &App,
    number: usize,
    text: &str,
    annotated: bool,
    open: bool,
) -> Vec<Span<'static>> {
    let highlighted = app
        .highlighted_lines
        .get(number)
        .and_then(|line| line.as_ref());

    if annotated {
        // Issue lines use the flat highlight style, not per-token colors
        let style = styles::issue_line_style(&app.theme, open);
        return vec![Span::styled(text.to_string(), style)];
    }

    match highlighted {
        Some(spans) => spans
            .iter()
            .map(|(style, text)| Span::styled(text.clone(), *style))
            .collect(),
        None => vec![Span::styled(
            text.to_string(),
            Style::default().fg(app.theme.fg_secondary),
        )],
    }
}

/// Body rows of an open detail panel. Must stay in sync with
/// `App::detail_panel_height`.
fn detail_lines(app: &App, occurrence: &IssueOccurrence, gutter_width: usize) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let border = Span::styled(
        format!("{}│ ", " ".repeat(gutter_width + 2)),
        styles::detail_border_style(theme),
    );
    let mut lines = Vec::new();

    if !occurrence.missing_prefixes.is_empty() {
        let mut spans = vec![
            border.clone(),
            Span::styled("Missing vendor prefixes: ", styles::detail_label_style(theme)),
        ];
        for prefix in &occurrence.missing_prefixes {
            spans.push(Span::styled(format!("{prefix} "), styles::prefix_style(theme)));
        }
        lines.push(Line::from(spans));
    }

    if let Some(description) = &occurrence.compat.description {
        lines.push(Line::from(vec![
            border.clone(),
            Span::styled(description.clone(), styles::dim_style(theme)),
        ]));
    }

    lines.push(Line::from(vec![
        border.clone(),
        Span::styled("Source: ", styles::detail_label_style(theme)),
        Span::raw(occurrence.source.clone()),
    ]));

    lines.push(Line::from(vec![
        border.clone(),
        Span::styled("Position: ", styles::detail_label_style(theme)),
        Span::raw(position_label(&occurrence.span)),
    ]));

    if let Some(url) = &occurrence.compat.mdn_url {
        lines.push(Line::from(vec![
            border,
            Span::styled("Documentation: ", styles::detail_label_style(theme)),
            Span::styled(url.clone(), styles::link_style(theme)),
        ]));
    }

    lines
}

fn line_number_width(line_count: usize) -> usize {
    line_count.max(1).to_string().len().max(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_number_width_has_a_floor_of_three() {
        assert_eq!(line_number_width(0), 3);
        assert_eq!(line_number_width(99), 3);
        assert_eq!(line_number_width(1000), 4);
    }
}
