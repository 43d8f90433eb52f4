use ratatui::style::{Modifier, Style};

use crate::theme::Theme;

pub fn header_style(theme: &Theme) -> Style {
    Style::default()
        .bg(theme.panel_bg)
        .fg(theme.fg_primary)
        .add_modifier(Modifier::BOLD)
}

pub fn selected_style(theme: &Theme) -> Style {
    Style::default().bg(theme.bg_highlight).fg(theme.fg_primary)
}

pub fn dim_style(theme: &Theme) -> Style {
    Style::default().fg(theme.fg_dim)
}

pub fn border_style(theme: &Theme, focused: bool) -> Style {
    if focused {
        Style::default().fg(theme.border_focused)
    } else {
        Style::default().fg(theme.border_unfocused)
    }
}

pub fn status_bar_style(theme: &Theme) -> Style {
    Style::default()
        .bg(theme.status_bar_bg)
        .fg(theme.fg_primary)
}

pub fn mode_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.mode_fg)
        .bg(theme.mode_bg)
        .add_modifier(Modifier::BOLD)
}

pub fn line_number_style(theme: &Theme) -> Style {
    Style::default().fg(theme.line_number)
}

pub fn issue_line_style(theme: &Theme, open: bool) -> Style {
    let bg = if open {
        theme.issue_open_bg
    } else {
        theme.issue_line_bg
    };
    Style::default().fg(theme.issue_line_fg).bg(bg)
}

pub fn active_marker_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.active_marker)
        .add_modifier(Modifier::BOLD)
}

pub fn detail_border_style(theme: &Theme) -> Style {
    Style::default().fg(theme.detail_border)
}

pub fn detail_label_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.detail_label)
        .add_modifier(Modifier::BOLD)
}

pub fn prefix_style(theme: &Theme) -> Style {
    Style::default().fg(theme.prefix_code)
}

pub fn link_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.link)
        .add_modifier(Modifier::UNDERLINED)
}

pub fn issue_count_style(theme: &Theme) -> Style {
    Style::default().fg(theme.issue_count)
}

pub fn cursor_line_style(theme: &Theme) -> Style {
    Style::default().bg(theme.bg_highlight)
}

pub fn cursor_gutter_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.cursor_color)
        .add_modifier(Modifier::BOLD)
}
