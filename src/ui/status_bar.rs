use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, InputMode, Message, MessageType};
use crate::theme::Theme;
use crate::ui::styles;

/// Status message rendered as a colored badge, right-aligned on the bar
fn message_badge(message: &Message, theme: &Theme) -> Span<'static> {
    let (fg, bg) = match message.message_type {
        MessageType::Info => (theme.message_info_fg, theme.message_info_bg),
        MessageType::Warning => (theme.message_warning_fg, theme.message_warning_bg),
        MessageType::Error => (theme.message_error_fg, theme.message_error_bg),
    };
    Span::styled(
        format!(" {} ", message.content),
        Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD),
    )
}

/// Lay out left-aligned spans and an optional right-aligned badge on one row
fn bar_line<'a>(left: Vec<Span<'a>>, right: Option<Span<'a>>, total_width: usize) -> Line<'a> {
    let used: usize = left
        .iter()
        .chain(right.iter())
        .map(|span| span.content.width())
        .sum();

    let mut spans = left;
    spans.push(Span::raw(" ".repeat(total_width.saturating_sub(used))));
    spans.extend(right);
    Line::from(spans)
}

pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let issue_total = app.report.issue_count(&app.browser, &app.version);

    let left = vec![
        Span::styled(
            " compatview - CSS Compatibility ",
            styles::header_style(theme),
        ),
        Span::styled(
            format!("[{} {}] ", app.browser, app.version),
            Style::default().fg(theme.fg_secondary),
        ),
        Span::styled(
            format!("{issue_total} issues "),
            if issue_total == 0 {
                styles::dim_style(theme)
            } else {
                styles::issue_count_style(theme)
            },
        ),
    ];

    let generated = app.report.generated_at.map(|at| {
        Span::styled(
            format!("generated {} ", at.format("%Y-%m-%d")),
            styles::dim_style(theme),
        )
    });

    let line = bar_line(left, generated, area.width as usize);
    let header = Paragraph::new(line).style(styles::status_bar_style(theme));
    frame.render_widget(header, area);
}

pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let mode_str = match app.input_mode {
        InputMode::Normal => " NORMAL ",
        InputMode::Help => " HELP ",
    };
    let hints = match app.input_mode {
        InputMode::Normal => {
            " j/k:move  Tab:panel  Enter:select/toggle  [/]:issue  b/v:browser/version  e:export  ?:help  q:quit "
        }
        InputMode::Help => " q/?/Esc:close ",
    };

    let left = vec![
        Span::styled(mode_str, styles::mode_style(theme)),
        Span::styled(hints, Style::default().fg(theme.fg_secondary)),
    ];
    let badge = app
        .message
        .as_ref()
        .map(|message| message_badge(message, theme));

    let line = bar_line(left, badge, area.width as usize);
    let status = Paragraph::new(line).style(styles::status_bar_style(theme));
    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn bar_line_pads_between_left_and_right() {
        let line = bar_line(vec![Span::raw("abc")], Some(Span::raw("xy")), 10);
        assert_eq!(rendered(&line), "abc     xy");
    }

    #[test]
    fn bar_line_without_badge_pads_to_full_width() {
        let line = bar_line(vec![Span::raw("abc")], None, 6);
        assert_eq!(rendered(&line), "abc   ");
    }

    #[test]
    fn bar_line_survives_overflowing_content() {
        let line = bar_line(vec![Span::raw("abcdef")], Some(Span::raw("xy")), 4);
        assert_eq!(rendered(&line), "abcdefxy");
    }

    #[test]
    fn message_badge_pads_the_content() {
        let message = Message {
            content: "saved".to_string(),
            message_type: MessageType::Info,
        };
        let badge = message_badge(&message, &Theme::dark());
        assert_eq!(badge.content, " saved ");
    }
}
