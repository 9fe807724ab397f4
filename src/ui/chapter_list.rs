//! Chapter list browser component

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::state::AppState;
use crate::curriculum::CHAPTERS;
use crate::progress::ProgressTracker;
use crate::theme::Theme;

/// Status indicators for chapters
const STATUS_NOT_STARTED: &str = "○";
const STATUS_COMPLETED: &str = "✓";

/// Draw the chapter list with completion markers and overall progress
pub fn draw(
    frame: &mut Frame,
    area: Rect,
    state: &mut AppState,
    progress: &ProgressTracker,
    theme: &Theme,
    focused: bool,
) {
    let border_color = if focused { theme.border_focused } else { theme.border };
    let percent = progress.progress_percent(CHAPTERS.len());

    let block = Block::default()
        .title(format!(" Chapters — {percent}% done "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme.bg_primary));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    state.chapter_list.visible_height = inner.height as usize;
    state.chapter_list.ensure_selection_visible();

    let mut lines: Vec<Line> = Vec::new();
    for (idx, chapter) in CHAPTERS.iter().enumerate() {
        let completed = progress.is_completed(chapter.id);
        let status = if completed { STATUS_COMPLETED } else { STATUS_NOT_STARTED };
        let is_selected = idx == state.chapter_list.selected;

        let status_style = if completed {
            Style::default().fg(theme.success)
        } else {
            Style::default().fg(theme.fg_muted)
        };
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
            Span::styled(format!(" {status} "), status_style),
            Span::styled(chapter.title.to_string(), title_style),
            Span::styled(
                format!("  {}", chapter.estimated_time),
                Style::default().fg(theme.fg_muted),
            ),
        ]));
    }

    let visible_height = inner.height as usize;
    let start = state.chapter_list.scroll_offset.min(lines.len());
    let end = (start + visible_height).min(lines.len());
    let visible_lines: Vec<Line> = lines.into_iter().skip(start).take(end - start).collect();

    frame.render_widget(Paragraph::new(visible_lines), inner);
}
