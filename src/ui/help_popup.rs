use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::App;
use crate::ui::styles;

fn key_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {key:<10}"),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(description.to_string()),
    ])
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    ))
}

pub fn render_help(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 70, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help - Press ? or Esc to close ")
        .borders(Borders::ALL)
        .border_style(styles::border_style(&app.theme, true));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let help_text = vec![
        section("Navigation"),
        Line::from(""),
        key_line("j/k", "Move down/up"),
        key_line("Ctrl-d/u", "Half page down/up"),
        key_line("Ctrl-f/b", "Full page down/up"),
        key_line("g/G", "Go to top/bottom"),
        key_line("Tab", "Cycle panel focus"),
        key_line("h/l", "Focus sidebar / inspector"),
        Line::from(""),
        section("Inspecting"),
        Line::from(""),
        key_line("Enter", "Select stylesheet / jump to issue"),
        key_line("Space", "Expand or collapse line details"),
        key_line("[/]", "Previous/next issue occurrence"),
        key_line("b/B", "Next/previous browser"),
        key_line("v/V", "Next/previous version"),
        Line::from(""),
        section("Session"),
        Line::from(""),
        key_line("e", "Export issues as markdown and quit"),
        key_line("Esc", "Dismiss status message"),
        key_line("q", "Quit"),
    ];

    frame.render_widget(Paragraph::new(help_text), inner);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
