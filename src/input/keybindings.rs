use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::InputMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Navigation
    CursorDown(usize),
    CursorUp(usize),
    HalfPageDown,
    HalfPageUp,
    PageDown,
    PageUp,
    GoToTop,
    GoToBottom,

    // Panel focus
    ToggleFocus,
    FocusSidebar,
    FocusInspector,

    // Inspector actions
    Select,
    ToggleLine,
    NextIssue,
    PrevIssue,

    // Selection cycling
    NextBrowser,
    PrevBrowser,
    NextVersion,
    PrevVersion,

    // Session
    Export,
    Quit,

    // Mode changes
    ToggleHelp,
    ExitMode,

    // No-op
    None,
}

pub fn map_key_to_action(key: KeyEvent, mode: InputMode) -> Action {
    match mode {
        InputMode::Normal => map_normal_mode(key),
        InputMode::Help => map_help_mode(key),
    }
}

fn map_normal_mode(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        // Scrolling
        (KeyCode::Char('j') | KeyCode::Down, KeyModifiers::NONE) => Action::CursorDown(1),
        (KeyCode::Char('k') | KeyCode::Up, KeyModifiers::NONE) => Action::CursorUp(1),
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::HalfPageDown,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::HalfPageUp,
        (KeyCode::Char('f'), KeyModifiers::CONTROL) => Action::PageDown,
        (KeyCode::Char('b'), KeyModifiers::CONTROL) => Action::PageUp,
        (KeyCode::Char('g'), KeyModifiers::NONE) => Action::GoToTop,
        (KeyCode::Char('G'), _) => Action::GoToBottom,

        // Issue navigation (use _ for modifiers since shift is implicit in the character)
        (KeyCode::Char(']'), _) => Action::NextIssue,
        (KeyCode::Char('['), _) => Action::PrevIssue,

        // Panel focus
        (KeyCode::Tab, KeyModifiers::NONE) => Action::ToggleFocus,
        (KeyCode::Char('h') | KeyCode::Left, KeyModifiers::NONE) => Action::FocusSidebar,
        (KeyCode::Char('l') | KeyCode::Right, KeyModifiers::NONE) => Action::FocusInspector,
        (KeyCode::Enter, KeyModifiers::NONE) => Action::Select,
        (KeyCode::Char(' '), KeyModifiers::NONE) => Action::ToggleLine,

        // Browser/version cycling
        (KeyCode::Char('b'), KeyModifiers::NONE) => Action::NextBrowser,
        (KeyCode::Char('B'), _) => Action::PrevBrowser,
        (KeyCode::Char('v'), KeyModifiers::NONE) => Action::NextVersion,
        (KeyCode::Char('V'), _) => Action::PrevVersion,

        // Session
        (KeyCode::Char('e'), KeyModifiers::NONE) => Action::Export,
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,

        // Mode changes (use _ for shifted characters like ?)
        (KeyCode::Char('?'), _) => Action::ToggleHelp,
        (KeyCode::Esc, KeyModifiers::NONE) => Action::ExitMode,

        _ => Action::None,
    }
}

fn map_help_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Char('j') | KeyCode::Down => Action::CursorDown(1),
        KeyCode::Char('k') | KeyCode::Up => Action::CursorUp(1),
        _ => Action::None,
    }
}
