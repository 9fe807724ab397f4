//! Event handling utilities

use crossterm::event::{KeyCode, KeyModifiers};

/// Vim-style key mapping (basic, without modifiers)
pub fn key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::Down),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::Up),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::Top),
        KeyCode::Char('G') | KeyCode::End => Some(Action::Bottom),
        KeyCode::Tab => Some(Action::FocusNext),
        KeyCode::Enter => Some(Action::Select),
        KeyCode::Esc => Some(Action::Back),
        KeyCode::Char('c') => Some(Action::ToggleComplete),
        KeyCode::Char('d') => Some(Action::OpenDiagnostic),
        KeyCode::Char('e') => Some(Action::OpenExam),
        KeyCode::Char('s') => Some(Action::StartTimer),
        KeyCode::Char('i') => Some(Action::EditAnswer),
        KeyCode::Char('v') => Some(Action::ToggleSolutions),
        KeyCode::Char('r') => Some(Action::ResetSession),
        KeyCode::Char('?') => Some(Action::Help),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

/// Key mapping with modifiers (for Ctrl combinations)
pub fn key_with_modifier_to_action(key: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        match key {
            KeyCode::Char('d') => Some(Action::HalfPageDown),
            KeyCode::Char('u') => Some(Action::HalfPageUp),
            _ => None,
        }
    } else {
        key_to_action(key)
    }
}

/// Actions that can be taken in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    Up,
    Down,
    Top,
    Bottom,
    HalfPageUp,
    HalfPageDown,

    // Selection
    Select,
    Back,
    FocusNext,

    // Progress
    ToggleComplete,

    // Screens
    OpenDiagnostic,
    OpenExam,

    // Mock exam
    StartTimer,
    EditAnswer,
    ToggleSolutions,
    ResetSession,

    // Modes
    Help,
    Quit,
}
