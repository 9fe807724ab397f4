//! Diagnostic quiz overlay component

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::centered_rect;
use crate::app::state::{AppState, DiagnosticState};
use crate::curriculum;
use crate::diagnostic::FeedbackTier;
use crate::theme::Theme;

/// Draw the diagnostic quiz as a centered overlay
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let Some(diag) = state.diagnostic.as_ref() else {
        return;
    };

    let overlay_area = centered_rect(70, 70, area);
    frame.render_widget(Clear, overlay_area);

    let title = if diag.show_results { " Diagnostic Results " } else { " Diagnostic Quiz " };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));

    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    if diag.show_results {
        draw_results(frame, inner, diag, theme);
    } else {
        draw_question(frame, inner, diag, theme);
    }
}

/// Draw the current question
fn draw_question(frame: &mut Frame, area: Rect, diag: &DiagnosticState, theme: &Theme) {
    let question = diag.question();
    let total = diag.scorer.questions().len();

    let mut lines = vec![];

    lines.push(Line::from(Span::styled(
        format!("Question {} of {}", diag.current_question + 1, total),
        Style::default().fg(theme.fg_muted),
    )));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        question.prompt,
        Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(""));

    for (i, option) in question.options.iter().enumerate() {
        let is_selected = i == diag.selected_option;
        let prefix = if is_selected { "\u{25CF}" } else { "\u{25CB}" }; // ● or ○
        let letter = (b'A' + i as u8) as char;

        let style = if is_selected {
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg_secondary)
        };

        lines.push(Line::from(Span::styled(
            format!("  {} {}) {}", prefix, letter, option.text),
            style,
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[j/k] Select    [Enter] Confirm    [Esc] Cancel",
        Style::default().fg(theme.fg_muted),
    )));

    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(para, area);
}

/// Draw the results screen: score, tier, and the gap topics to study
fn draw_results(frame: &mut Frame, area: Rect, diag: &DiagnosticState, theme: &Theme) {
    let score = diag.scorer.score();
    let total = diag.scorer.questions().len();
    let tier = diag.scorer.feedback_tier();

    let mut lines = vec![Line::from("")];

    lines.push(Line::from(Span::styled(
        format!("  {score}/{total} correct"),
        Style::default().fg(tier_color(tier, theme)).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  {}", tier.message()),
        Style::default().fg(theme.fg_primary),
    )));
    lines.push(Line::from(""));

    let gaps = diag.scorer.gap_topics();
    if gaps.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No gaps found.",
            Style::default().fg(theme.success),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "  Chapters to revisit:",
            Style::default().fg(theme.fg_secondary),
        )));
        lines.push(Line::from(""));
        for topic in gaps.iter().copied() {
            let title = curriculum::chapter_by_id(topic).map(|c| c.title).unwrap_or(topic);
            lines.push(Line::from(Span::styled(
                format!("    \u{2717} {title}"),
                Style::default().fg(theme.error),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  [Enter] Back to studying",
        Style::default().fg(theme.fg_muted),
    )));

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, area);
}

/// Semantic color for a feedback tier
fn tier_color(tier: FeedbackTier, theme: &Theme) -> Color {
    match tier {
        FeedbackTier::Perfect => theme.success,
        FeedbackTier::Good => theme.info,
        FeedbackTier::Warning => theme.warning,
        FeedbackTier::Critical => theme.error,
    }
}
