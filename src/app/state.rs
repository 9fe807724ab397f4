//! Application state definitions

use crate::curriculum::CHAPTERS;
use crate::diagnostic::{DiagnosticScorer, QuizQuestion};

/// Which screen is currently displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    /// Chapter list plus content
    #[default]
    Study,
    /// Diagnostic quiz overlay
    Diagnostic,
    /// Timed mock exam
    Exam,
}

/// Which study panel is focused
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Panel {
    #[default]
    Chapters,
    Content,
}

/// State for the chapter list browser
#[derive(Debug, Clone, Default)]
pub struct ChapterListState {
    /// Currently selected chapter index
    pub selected: usize,
    /// Scroll offset for short terminals
    pub scroll_offset: usize,
    /// Visible height in rows (updated on render)
    pub visible_height: usize,
}

impl ChapterListState {
    /// Ensure the selected row is visible by adjusting scroll offset
    pub fn ensure_selection_visible(&mut self) {
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        }
        let visible = self.visible_height.saturating_sub(1);
        if visible > 0 && self.selected >= self.scroll_offset + visible {
            self.scroll_offset = self.selected.saturating_sub(visible) + 1;
        }
    }
}

/// State for content rendering
#[derive(Debug, Clone, Default)]
pub struct ContentState {
    /// Current scroll position (lines from top)
    pub scroll_offset: usize,
    /// Total rendered lines (updated on render)
    pub total_lines: usize,
    /// Visible height in lines (updated on render)
    pub visible_height: usize,
}

impl ContentState {
    /// Get the maximum allowed scroll offset
    pub fn max_scroll(&self) -> usize {
        self.total_lines.saturating_sub(self.visible_height / 2)
    }

    /// Clamp scroll offset to valid range
    pub fn clamp_scroll(&mut self) {
        let max = self.max_scroll();
        if self.scroll_offset > max {
            self.scroll_offset = max;
        }
    }
}

/// Transient state for the diagnostic screen
///
/// Owns the scorer; created when the screen opens and dropped when it
/// closes, so every visit is a fresh pass through the bank.
pub struct DiagnosticState {
    pub scorer: DiagnosticScorer,
    /// Index into the question bank
    pub current_question: usize,
    /// Index into the current question's options
    pub selected_option: usize,
    /// Completed and showing results
    pub show_results: bool,
}

impl DiagnosticState {
    pub fn new() -> Self {
        Self {
            scorer: DiagnosticScorer::new(),
            current_question: 0,
            selected_option: 0,
            show_results: false,
        }
    }

    /// The question currently displayed
    pub fn question(&self) -> &'static QuizQuestion {
        &self.scorer.questions()[self.current_question]
    }

    /// Move the option selection down
    pub fn next_option(&mut self) {
        if self.selected_option + 1 < self.question().options.len() {
            self.selected_option += 1;
        }
    }

    /// Move the option selection up
    pub fn prev_option(&mut self) {
        self.selected_option = self.selected_option.saturating_sub(1);
    }

    /// Record the highlighted option and advance
    pub fn confirm_selection(&mut self) {
        let question = self.question();
        let option_id = question.options[self.selected_option].id;
        self.scorer.record_answer(question.id, option_id);

        if self.current_question + 1 < self.scorer.questions().len() {
            self.current_question += 1;
            self.selected_option = 0;
        } else if self.scorer.is_complete() {
            self.show_results = true;
        }
    }
}

impl Default for DiagnosticState {
    fn default() -> Self {
        Self::new()
    }
}

/// Cursor-addressed text buffer for exam answers
///
/// The cursor is a character index; all edits convert to byte positions at
/// the boundary so multibyte input cannot split a character.
#[derive(Debug, Clone, Default)]
pub struct AnswerEditor {
    /// Buffer contents, may span multiple lines
    pub text: String,
    /// Cursor position in characters
    pub cursor: usize,
}

impl AnswerEditor {
    /// Load text and put the cursor at the end
    pub fn load(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.char_count();
    }

    /// Convert character index to byte index
    fn char_to_byte_index(&self, char_idx: usize) -> usize {
        self.text.char_indices().nth(char_idx).map(|(i, _)| i).unwrap_or(self.text.len())
    }

    /// Get the number of characters in the buffer
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Insert a character at the cursor
    pub fn insert_char(&mut self, c: char) {
        let byte_idx = self.char_to_byte_index(self.cursor);
        self.text.insert(byte_idx, c);
        self.cursor += 1;
    }

    /// Insert a line break at the cursor
    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// Delete the character before the cursor
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_idx = self.char_to_byte_index(self.cursor);
            self.text.remove(byte_idx);
        }
    }

    /// Delete the character at the cursor
    pub fn delete_char_forward(&mut self) {
        if self.cursor < self.char_count() {
            let byte_idx = self.char_to_byte_index(self.cursor);
            self.text.remove(byte_idx);
        }
    }

    /// Move cursor left
    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move cursor right
    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Move cursor to start of buffer
    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end of buffer
    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }
}

/// State for the mock exam screen
#[derive(Debug, Clone, Default)]
pub struct ExamPanelState {
    /// Selected problem index
    pub selected_problem: usize,
    /// Whether keystrokes go to the answer editor
    pub editing: bool,
    /// The in-progress answer buffer
    pub editor: AnswerEditor,
    /// Reset confirmation overlay is showing
    pub confirm_reset: bool,
}

/// Full application state
#[derive(Default)]
pub struct AppState {
    /// Current screen
    pub screen: Screen,

    /// Currently focused study panel
    pub focused_panel: Panel,

    /// Chapter list browser state
    pub chapter_list: ChapterListState,

    /// Content rendering state
    pub content: ContentState,

    /// Diagnostic quiz state, present only while that screen is open
    pub diagnostic: Option<DiagnosticState>,

    /// Mock exam screen state
    pub exam_panel: ExamPanelState,

    /// One-line status message shown in the footer
    pub status: Option<String>,

    /// Help overlay visibility
    pub help_visible: bool,
}

impl AppState {
    /// The chapter currently selected in the list
    pub fn selected_chapter(&self) -> &'static crate::curriculum::Chapter {
        &CHAPTERS[self.chapter_list.selected.min(CHAPTERS.len() - 1)]
    }

    /// Set the footer status message
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::diagnostic::QUESTIONS;

    #[test]
    fn chapter_list_scrolls_to_keep_selection_visible() {
        let mut list = ChapterListState { selected: 8, visible_height: 5, ..Default::default() };
        list.ensure_selection_visible();
        assert!(list.scroll_offset > 0);
        assert!(list.selected >= list.scroll_offset);

        list.selected = 0;
        list.ensure_selection_visible();
        assert_eq!(list.scroll_offset, 0);
    }

    #[test]
    fn content_scroll_clamps_to_max() {
        let mut content = ContentState {
            scroll_offset: 500,
            total_lines: 40,
            visible_height: 20,
            ..Default::default()
        };
        content.clamp_scroll();
        assert_eq!(content.scroll_offset, content.max_scroll());
    }

    #[test]
    fn diagnostic_walks_the_bank_then_shows_results() {
        let mut diag = DiagnosticState::new();

        for i in 0..QUESTIONS.len() {
            assert_eq!(diag.current_question, i);
            assert!(!diag.show_results);
            diag.confirm_selection();
        }
        assert!(diag.show_results);
        assert!(diag.scorer.is_complete());
    }

    #[test]
    fn option_selection_clamps_at_both_ends() {
        let mut diag = DiagnosticState::new();
        diag.prev_option();
        assert_eq!(diag.selected_option, 0);

        let options = diag.question().options.len();
        for _ in 0..options + 3 {
            diag.next_option();
        }
        assert_eq!(diag.selected_option, options - 1);
    }

    #[test]
    fn editor_inserts_and_deletes_at_cursor() {
        let mut editor = AnswerEditor::default();
        for c in "SELECT".chars() {
            editor.insert_char(c);
        }
        assert_eq!(editor.text, "SELECT");

        editor.delete_char();
        assert_eq!(editor.text, "SELEC");

        editor.move_start();
        editor.delete_char_forward();
        assert_eq!(editor.text, "ELEC");
    }

    #[test]
    fn editor_handles_multibyte_input() {
        let mut editor = AnswerEditor::default();
        editor.insert_char('é');
        editor.insert_char('x');
        editor.move_left();
        editor.move_left();
        editor.insert_char('a');
        assert_eq!(editor.text, "aéx");
    }

    #[test]
    fn editor_newline_is_a_plain_character() {
        let mut editor = AnswerEditor::default();
        editor.load("SELECT 1");
        editor.insert_newline();
        assert_eq!(editor.text, "SELECT 1\n");
        assert_eq!(editor.cursor, editor.char_count());
    }
}
