use crate::app::{App, FocusedPanel};
use crate::input::Action;
use crate::output::generate_export_content;

/// Export the selected browser/version's issues: stores the markdown and
/// quits so it can be printed once the terminal is restored.
fn handle_export(app: &mut App) {
    match generate_export_content(&app.report, &app.browser, &app.version) {
        Ok(content) => {
            app.pending_stdout_output = Some(content);
            app.should_quit = true;
        }
        Err(e) => app.set_warning(format!("{e}")),
    }
}

fn cycle_focus(app: &mut App) {
    app.focused_panel = match app.focused_panel {
        FocusedPanel::Stylesheets => FocusedPanel::Issues,
        FocusedPanel::Issues => FocusedPanel::Inspector,
        FocusedPanel::Inspector => FocusedPanel::Stylesheets,
    };
}

/// Actions that behave the same whichever panel is focused
fn handle_common_action(app: &mut App, action: &Action) -> bool {
    match action {
        Action::ToggleFocus => cycle_focus(app),
        Action::FocusSidebar => app.focused_panel = FocusedPanel::Stylesheets,
        Action::FocusInspector => app.focused_panel = FocusedPanel::Inspector,
        Action::NextBrowser => app.next_browser(),
        Action::PrevBrowser => app.prev_browser(),
        Action::NextVersion => app.next_version(),
        Action::PrevVersion => app.prev_version(),
        Action::NextIssue => app.next_issue(),
        Action::PrevIssue => app.prev_issue(),
        Action::Export => handle_export(app),
        Action::ToggleHelp => app.toggle_help(),
        Action::Quit => app.should_quit = true,
        Action::ExitMode => app.message = None,
        _ => return false,
    }
    true
}

/// Handle actions in Help mode (scrolling and closing only)
pub fn handle_help_action(app: &mut App, action: Action) {
    match action {
        Action::ToggleHelp => app.toggle_help(),
        Action::Quit => app.should_quit = true,
        _ => {}
    }
}

pub fn handle_stylesheet_list_action(app: &mut App, action: Action) {
    if handle_common_action(app, &action) {
        return;
    }
    match action {
        Action::CursorDown(n) => app.stylesheet_list_down(n),
        Action::CursorUp(n) => app.stylesheet_list_up(n),
        Action::GoToTop => app.stylesheet_cursor = 0,
        Action::GoToBottom => {
            app.stylesheet_cursor = app.report.stylesheet_names().len().saturating_sub(1);
        }
        Action::Select => app.select_stylesheet_at_cursor(),
        _ => {}
    }
}

pub fn handle_issue_list_action(app: &mut App, action: Action) {
    if handle_common_action(app, &action) {
        return;
    }
    match action {
        Action::CursorDown(n) => app.issue_list_down(n),
        Action::CursorUp(n) => app.issue_list_up(n),
        Action::GoToTop => app.issue_cursor = 0,
        Action::GoToBottom => app.issue_cursor = app.issue_entries.len().saturating_sub(1),
        Action::Select => {
            app.jump_to_issue(app.issue_cursor);
            app.focused_panel = FocusedPanel::Inspector;
        }
        _ => {}
    }
}

pub fn handle_inspector_action(app: &mut App, action: Action) {
    if handle_common_action(app, &action) {
        return;
    }
    let half_page = (app.inspector.viewport_height / 2).max(1);
    let full_page = app.inspector.viewport_height.max(1);
    match action {
        Action::CursorDown(n) => app.cursor_down(n),
        Action::CursorUp(n) => app.cursor_up(n),
        Action::HalfPageDown => app.scroll_down(half_page),
        Action::HalfPageUp => app.scroll_up(half_page),
        Action::PageDown => app.scroll_down(full_page),
        Action::PageUp => app.scroll_up(full_page),
        Action::GoToTop => app.go_to_top(),
        Action::GoToBottom => app.go_to_bottom(),
        Action::Select | Action::ToggleLine => app.toggle_line_at_cursor(),
        _ => {}
    }
}
