//! Mock exam screen
//!
//! Countdown header, problem list, and the answer workspace. Everything the
//! user types lands in the autosave store before the next frame, so the
//! screen is always showing persisted state.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::{centered_rect, draw_status_line};
use crate::app::state::{AnswerEditor, AppState};
use crate::exam::{MockExam, PROBLEMS, timer::TimerState};
use crate::theme::Theme;

const EXAM_HINTS: &str =
    "[j/k] Problem  [s] Start timer  [i] Edit answer  [v] Solutions  [r] Reset  [Esc] Back";

/// Seconds left at which the countdown turns amber
const LOW_TIME_SECONDS: u32 = 300;

/// Draw the full exam screen
pub fn draw(frame: &mut Frame, state: &AppState, exam: &MockExam, theme: &Theme) {
    let area = frame.area();

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)])
        .split(area);

    draw_timer_header(frame, vertical[0], exam, theme);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(40), Constraint::Min(30)])
        .split(vertical[1]);

    draw_problem_list(frame, main[0], state, exam, theme);
    draw_workspace(frame, main[1], state, exam, theme);

    draw_status_line(frame, vertical[2], state, theme, EXAM_HINTS);

    if state.exam_panel.confirm_reset {
        draw_reset_confirmation(frame, area, theme);
    }
}

/// Draw the countdown header
fn draw_timer_header(frame: &mut Frame, area: Rect, exam: &MockExam, theme: &Theme) {
    let block = Block::default()
        .title(" Timed Mock Exam ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let timer = &exam.timer;
    let (clock_color, label) = match timer.state() {
        TimerState::Idle => (theme.fg_muted, "press s to start the countdown"),
        TimerState::Running if timer.remaining_seconds() < LOW_TIME_SECONDS => {
            (theme.warning, "running")
        }
        TimerState::Running => (theme.info, "running"),
        TimerState::Expired => (theme.error, "time is up - answers stay editable"),
    };

    let line = Line::from(vec![
        Span::styled(
            format!("  {}  ", timer.display()),
            Style::default().fg(clock_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(label, Style::default().fg(theme.fg_muted)),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}

/// Draw the problem list with answered markers
fn draw_problem_list(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    exam: &MockExam,
    theme: &Theme,
) {
    let focused = !state.exam_panel.editing;
    let border_color = if focused { theme.border_focused } else { theme.border };

    let answered = exam.answers.answered_count();
    let block = Block::default()
        .title(format!(" Problems ({answered}/{} drafted) ", PROBLEMS.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    for (idx, problem) in PROBLEMS.iter().enumerate() {
        let has_draft = exam.answers.has_answer(problem.id);
        let marker = if has_draft { "\u{25CF}" } else { "\u{25CB}" }; // ● or ○
        let marker_style = if has_draft {
            Style::default().fg(theme.success)
        } else {
            Style::default().fg(theme.fg_muted)
        };

        let is_selected = idx == state.exam_panel.selected_problem;
        let title_style = if is_selected && focused {
            Style::default()
                .fg(theme.bg_primary)
                .bg(theme.accent_primary)
                .add_modifier(Modifier::BOLD)
        } else if is_selected {
            Style::default().fg(theme.accent_secondary).bg(theme.selection)
        } else {
            Style::default().fg(theme.fg_primary)
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {marker} "), marker_style),
            Span::styled(problem.title.to_string(), title_style),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Draw the prompt, answer area, and optional solution for the selected problem
fn draw_workspace(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    exam: &MockExam,
    theme: &Theme,
) {
    let problem = &PROBLEMS[state.exam_panel.selected_problem];
    let editing = state.exam_panel.editing;
    let border_color = if editing { theme.border_focused } else { theme.border };

    let block = Block::default()
        .title(format!(" {} ", problem.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width.saturating_sub(2).max(10) as usize;
    let mut lines: Vec<Line> = vec![Line::from("")];

    for wrapped in textwrap::wrap(problem.prompt, width) {
        lines.push(Line::from(Span::styled(
            format!(" {wrapped}"),
            Style::default().fg(theme.fg_primary),
        )));
    }
    lines.push(Line::from(""));

    let answer_label = if editing { " Your answer (Esc to stop editing):" } else { " Your answer:" };
    lines.push(Line::from(Span::styled(
        answer_label,
        Style::default().fg(theme.fg_secondary).add_modifier(Modifier::BOLD),
    )));

    if editing {
        lines.extend(editor_lines(&state.exam_panel.editor, theme));
    } else {
        let saved = exam.answers.get_answer(problem.id);
        if saved.is_empty() {
            lines.push(Line::from(Span::styled(
                "   (no draft yet - press i to answer)",
                Style::default().fg(theme.fg_muted),
            )));
        } else {
            for answer_line in saved.lines() {
                let mut spans = vec![Span::styled(
                    "   ".to_string(),
                    Style::default().bg(theme.bg_secondary),
                )];
                spans.extend(crate::syntax::highlight_line(answer_line, Some("sql"), theme));
                lines.push(Line::from(spans));
            }
        }
    }

    if exam.reset.solutions_visible() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " Reference solution:",
            Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD),
        )));
        for solution_line in problem.solution.lines() {
            let mut spans =
                vec![Span::styled("   ".to_string(), Style::default().bg(theme.bg_secondary))];
            spans.extend(crate::syntax::highlight_line(solution_line, Some("sql"), theme));
            lines.push(Line::from(spans));
        }
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

/// Render the editor buffer with a visible cursor
fn editor_lines(editor: &AnswerEditor, theme: &Theme) -> Vec<Line<'static>> {
    let text_style = Style::default().fg(theme.fg_primary).bg(theme.bg_secondary);
    let cursor_style = Style::default().fg(theme.bg_primary).bg(theme.cursor);

    let mut lines = Vec::new();
    let mut consumed = 0usize;
    let mut cursor_placed = false;

    for raw_line in editor.text.split('\n') {
        let line_chars: Vec<char> = raw_line.chars().collect();
        let mut spans = vec![Span::styled("   ".to_string(), text_style)];

        let cursor_here = !cursor_placed
            && editor.cursor >= consumed
            && editor.cursor <= consumed + line_chars.len();

        if cursor_here {
            let at = editor.cursor - consumed;
            let before: String = line_chars[..at].iter().collect();
            if !before.is_empty() {
                spans.push(Span::styled(before, text_style));
            }
            if at < line_chars.len() {
                spans.push(Span::styled(line_chars[at].to_string(), cursor_style));
                let after: String = line_chars[at + 1..].iter().collect();
                if !after.is_empty() {
                    spans.push(Span::styled(after, text_style));
                }
            } else {
                spans.push(Span::styled(" ".to_string(), cursor_style));
            }
            cursor_placed = true;
        } else {
            spans.push(Span::styled(raw_line.to_string(), text_style));
        }

        lines.push(Line::from(spans));
        consumed += line_chars.len() + 1; // account for the newline
    }

    lines
}

/// Draw the reset confirmation overlay
fn draw_reset_confirmation(frame: &mut Frame, area: Rect, theme: &Theme) {
    let overlay = centered_rect(50, 25, area);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .title(" Reset session? ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.error))
        .style(Style::default().bg(theme.bg_secondary));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  This clears every saved answer and returns",
            Style::default().fg(theme.fg_primary),
        )),
        Line::from(Span::styled(
            "  the timer to the start. There is no undo.",
            Style::default().fg(theme.fg_primary),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  [y] ", Style::default().fg(theme.error).add_modifier(Modifier::BOLD)),
            Span::styled("Reset    ", Style::default().fg(theme.fg_primary)),
            Span::styled("[n] ", Style::default().fg(theme.success).add_modifier(Modifier::BOLD)),
            Span::styled("Keep everything", Style::default().fg(theme.fg_primary)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editor_lines_place_cursor_mid_line() {
        let theme = Theme::default();
        let mut editor = AnswerEditor::default();
        editor.load("SELECT 1");
        editor.move_left();
        editor.move_left();

        let lines = editor_lines(&editor, &theme);
        assert_eq!(lines.len(), 1);

        let text: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "   SELECT 1");
    }

    #[test]
    fn editor_lines_append_cursor_block_at_end() {
        let theme = Theme::default();
        let mut editor = AnswerEditor::default();
        editor.load("SELECT 1");

        let lines = editor_lines(&editor, &theme);
        let text: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "   SELECT 1 ");
    }

    #[test]
    fn editor_lines_split_on_newlines() {
        let theme = Theme::default();
        let mut editor = AnswerEditor::default();
        editor.load("SELECT 1\nFROM t");

        let lines = editor_lines(&editor, &theme);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn empty_editor_still_shows_a_cursor() {
        let theme = Theme::default();
        let editor = AnswerEditor::default();

        let lines = editor_lines(&editor, &theme);
        assert_eq!(lines.len(), 1);
        let text: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "    ");
    }
}
