//! Chapter content panel
//!
//! Renders the selected chapter's blocks: prose wrapped to the panel width,
//! code listings through the syntax highlighter.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::state::AppState;
use crate::curriculum::{self, ContentBlock};
use crate::progress::ProgressTracker;
use crate::theme::Theme;

/// Draw the content panel for the selected chapter
pub fn draw(
    frame: &mut Frame,
    area: Rect,
    state: &mut AppState,
    progress: &ProgressTracker,
    theme: &Theme,
    focused: bool,
) {
    let chapter = state.selected_chapter();
    let border_color = if focused { theme.border_focused } else { theme.border };

    let completion = if progress.is_completed(chapter.id) { " ✓" } else { "" };
    let block = Block::default()
        .title(format!(" {}{} ", chapter.title, completion))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme.bg_primary));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width.saturating_sub(2).max(10) as usize;
    let lines = render_blocks(curriculum::body(chapter.id), width, theme);

    state.content.total_lines = lines.len();
    state.content.visible_height = inner.height as usize;
    state.content.clamp_scroll();

    let start = state.content.scroll_offset.min(lines.len());
    let end = (start + inner.height as usize).min(lines.len());
    let visible: Vec<Line> = lines.into_iter().skip(start).take(end - start).collect();

    frame.render_widget(Paragraph::new(visible), inner);
}

/// Turn content blocks into display lines at the given width
fn render_blocks(blocks: &[ContentBlock], width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = vec![Line::from("")];

    for block in blocks {
        match block {
            ContentBlock::Text(text) => {
                for wrapped in textwrap::wrap(text, width) {
                    lines.push(Line::from(Span::styled(
                        format!(" {wrapped}"),
                        Style::default().fg(theme.fg_primary),
                    )));
                }
            }
            ContentBlock::Code { language, source } => {
                let code_bg = Style::default().bg(theme.bg_secondary);
                lines.push(Line::from(Span::styled(
                    format!(" {language}"),
                    Style::default().fg(theme.fg_muted).add_modifier(Modifier::ITALIC),
                )));
                for code_line in source.lines() {
                    let mut spans = vec![Span::styled("   ".to_string(), code_bg)];
                    spans.extend(crate::syntax::highlight_line(code_line, Some(language), theme));
                    lines.push(Line::from(spans));
                }
            }
        }
        lines.push(Line::from(""));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_blocks_wrap_to_width() {
        let theme = Theme::default();
        let blocks = [ContentBlock::Text(
            "a fairly long paragraph that will certainly not fit on one narrow line of output",
        )];
        let lines = render_blocks(&blocks, 20, &theme);
        assert!(lines.len() > 3);
    }

    #[test]
    fn code_blocks_emit_one_line_per_source_line() {
        let theme = Theme::default();
        let blocks = [ContentBlock::Code { language: "sql", source: "SELECT 1\nFROM t" }];
        let lines = render_blocks(&blocks, 80, &theme);

        // Leading blank, language tag, two code lines, trailing blank
        assert_eq!(lines.len(), 5);
    }
}
