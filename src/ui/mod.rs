//! UI rendering components

pub mod chapter_list;
pub mod content;
pub mod diagnostic_panel;
pub mod exam_panel;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::state::{AppState, Panel, Screen};
use crate::exam::MockExam;
use crate::progress::ProgressTracker;
use crate::theme::Theme;

/// Minimum width for the chapter list panel
const CHAPTER_LIST_MIN_WIDTH: u16 = 26;

/// Main draw function
pub fn draw(
    frame: &mut Frame,
    state: &mut AppState,
    progress: &ProgressTracker,
    exam: &MockExam,
    theme: &Theme,
) {
    match state.screen {
        Screen::Study | Screen::Diagnostic => {
            draw_study_screen(frame, state, progress, theme);
            if state.screen == Screen::Diagnostic {
                let area = frame.area();
                diagnostic_panel::draw(frame, area, state, theme);
            }
        }
        Screen::Exam => {
            exam_panel::draw(frame, state, exam, theme);
        }
    }

    if state.help_visible {
        draw_help_overlay(frame, state.screen, theme);
    }
}

/// Draw the study screen: chapter list, content, status line
fn draw_study_screen(
    frame: &mut Frame,
    state: &mut AppState,
    progress: &ProgressTracker,
    theme: &Theme,
) {
    let area = frame.area();

    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let main_area = vertical_chunks[0];
    let status_area = vertical_chunks[1];

    let list_width = (main_area.width / 4).max(CHAPTER_LIST_MIN_WIDTH);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(list_width), Constraint::Min(30)])
        .split(main_area);

    let chapters_focused = state.focused_panel == Panel::Chapters;
    let content_focused = state.focused_panel == Panel::Content;
    chapter_list::draw(frame, chunks[0], state, progress, theme, chapters_focused);
    content::draw(frame, chunks[1], state, progress, theme, content_focused);

    draw_status_line(frame, status_area, state, theme, STUDY_HINTS);
}

const STUDY_HINTS: &str = "[j/k] Navigate  [Enter] Open  [c] Complete  [d] Diagnostic  [e] Exam  [?] Help  [q] Quit";

/// Draw the one-line status footer: a status message when set, key hints otherwise
pub fn draw_status_line(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    theme: &Theme,
    hints: &str,
) {
    let (text, style) = match &state.status {
        Some(msg) => (msg.clone(), Style::default().fg(theme.info).bg(theme.bg_primary)),
        None => (hints.to_string(), Style::default().fg(theme.fg_muted).bg(theme.bg_primary)),
    };
    frame.render_widget(Paragraph::new(text).style(style), area);
}

/// Draw the help overlay
fn draw_help_overlay(frame: &mut Frame, screen: Screen, theme: &Theme) {
    let overlay = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let entries: &[(&str, &str)] = match screen {
        Screen::Exam => &[
            ("j/k", "Select problem"),
            ("s", "Start the countdown"),
            ("i / Enter", "Edit your answer (Esc to stop)"),
            ("v", "Show or hide solutions"),
            ("r", "Reset the session (asks first)"),
            ("Esc", "Back to the study screen"),
            ("q", "Quit"),
        ],
        _ => &[
            ("j/k", "Move selection / scroll"),
            ("Tab", "Switch panel"),
            ("Enter", "Open the selected chapter"),
            ("c", "Toggle chapter completion"),
            ("d", "Take the diagnostic quiz"),
            ("e", "Open the mock exam"),
            ("Ctrl-d/u", "Scroll content by half a page"),
            ("q", "Quit"),
        ],
    };

    let mut lines = vec![Line::from("")];
    for (keys, what) in entries {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {keys:>10}  "),
                Style::default().fg(theme.accent_primary),
            ),
            Span::styled((*what).to_string(), Style::default().fg(theme.fg_primary)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press any key to close",
        Style::default().fg(theme.fg_muted),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Create a centered rectangle with the given percentage of width and height
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_inside_parent() {
        let parent = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(70, 70, parent);

        assert!(rect.x > 0);
        assert!(rect.y > 0);
        assert!(rect.right() <= parent.right());
        assert!(rect.bottom() <= parent.bottom());
    }
}
