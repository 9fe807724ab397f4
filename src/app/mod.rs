//! Application state and event handling

pub mod input;
pub mod state;

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::config::Config;
use crate::curriculum::CHAPTERS;
use crate::exam::{MockExam, PROBLEMS, timer::TimerState};
use crate::progress::ProgressTracker;
use crate::store::FileStore;
use crate::ui;
use input::{Action, key_with_modifier_to_action};
use state::{AppState, DiagnosticState, Panel, Screen};

/// The main application
pub struct App {
    /// Application configuration
    config: Config,

    /// Current application state
    state: AppState,

    /// Chapter completion tracking
    progress: ProgressTracker,

    /// The mock exam session (lives for the whole run)
    exam: MockExam,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl App {
    /// Create a new application instance with stores rooted at `data_dir`
    pub fn new(config: Config, data_dir: PathBuf) -> Result<Self> {
        let terminal = Self::setup_terminal()?;

        let mut progress = ProgressTracker::new(Box::new(FileStore::new(data_dir.clone())));
        progress.subscribe(Box::new(|chapter_id, completed| {
            tracing::info!(chapter = chapter_id, completed, "completion toggled");
        }));

        let exam = MockExam::new(
            Box::new(FileStore::new(data_dir)),
            config.exam_duration_seconds(),
        );

        Ok(Self { config, state: AppState::default(), progress, exam, terminal })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    pub fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        loop {
            // Draw UI
            let theme = self.config.active_theme();
            self.terminal.draw(|frame| {
                ui::draw(frame, &mut self.state, &self.progress, &self.exam, &theme);
            })?;

            // Handle events
            if event::poll(std::time::Duration::from_millis(200))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        match self.handle_key(key) {
                            Ok(true) => break, // Exit requested
                            Ok(false) => {}    // Continue
                            Err(e) => {
                                tracing::error!("Error handling key: {}", e);
                                self.state.set_status(format!("Error: {e}"));
                            }
                        }
                    }
                }
            }

            // Drive the exam countdown
            self.exam.timer.poll(Instant::now());
        }

        self.restore_terminal()?;
        Ok(())
    }

    /// Handle a key press, returns true if should exit
    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        self.state.status = None;

        if self.state.help_visible {
            self.state.help_visible = false;
            return Ok(false);
        }

        match self.state.screen {
            Screen::Study => self.handle_study_key(key),
            Screen::Diagnostic => self.handle_diagnostic_key(key),
            Screen::Exam => self.handle_exam_key(key),
        }
    }

    fn handle_study_key(&mut self, key: KeyEvent) -> Result<bool> {
        let Some(action) = key_with_modifier_to_action(key.code, key.modifiers) else {
            return Ok(false);
        };

        match action {
            Action::Quit => return Ok(true),
            Action::Help => self.state.help_visible = true,
            Action::FocusNext => {
                self.state.focused_panel = match self.state.focused_panel {
                    Panel::Chapters => Panel::Content,
                    Panel::Content => Panel::Chapters,
                };
            }
            Action::Down | Action::Up | Action::Top | Action::Bottom => {
                self.navigate(action);
            }
            Action::HalfPageDown => {
                let half = self.state.content.visible_height / 2;
                self.state.content.scroll_offset += half.max(1);
                self.state.content.clamp_scroll();
            }
            Action::HalfPageUp => {
                let half = self.state.content.visible_height / 2;
                self.state.content.scroll_offset =
                    self.state.content.scroll_offset.saturating_sub(half.max(1));
            }
            Action::Select => match self.state.selected_chapter().id {
                "diagnostic" => self.open_diagnostic(),
                "mock-test" => self.state.screen = Screen::Exam,
                _ => self.state.focused_panel = Panel::Content,
            },
            Action::ToggleComplete => {
                let chapter = self.state.selected_chapter();
                let now_completed = self.progress.toggle(chapter.id)?;
                let verb = if now_completed { "complete" } else { "not complete" };
                self.state.set_status(format!("Marked \"{}\" {}", chapter.title, verb));
            }
            Action::OpenDiagnostic => self.open_diagnostic(),
            Action::OpenExam => self.state.screen = Screen::Exam,
            Action::Back => self.state.focused_panel = Panel::Chapters,
            _ => {}
        }
        Ok(false)
    }

    /// Move selection or scroll, depending on the focused panel
    fn navigate(&mut self, action: Action) {
        match self.state.focused_panel {
            Panel::Chapters => {
                let before = self.state.chapter_list.selected;
                let last = CHAPTERS.len() - 1;
                self.state.chapter_list.selected = match action {
                    Action::Down => (before + 1).min(last),
                    Action::Up => before.saturating_sub(1),
                    Action::Top => 0,
                    Action::Bottom => last,
                    _ => before,
                };
                if self.state.chapter_list.selected != before {
                    self.state.content.scroll_offset = 0;
                }
                self.state.chapter_list.ensure_selection_visible();
            }
            Panel::Content => {
                let content = &mut self.state.content;
                content.scroll_offset = match action {
                    Action::Down => content.scroll_offset + 1,
                    Action::Up => content.scroll_offset.saturating_sub(1),
                    Action::Top => 0,
                    Action::Bottom => content.max_scroll(),
                    _ => content.scroll_offset,
                };
                content.clamp_scroll();
            }
        }
    }

    fn open_diagnostic(&mut self) {
        self.state.diagnostic = Some(DiagnosticState::new());
        self.state.screen = Screen::Diagnostic;
    }

    fn close_diagnostic(&mut self) {
        // Dropping the state discards the scorer; every visit is a fresh pass
        self.state.diagnostic = None;
        self.state.screen = Screen::Study;
    }

    fn handle_diagnostic_key(&mut self, key: KeyEvent) -> Result<bool> {
        let Some(diag) = self.state.diagnostic.as_mut() else {
            self.state.screen = Screen::Study;
            return Ok(false);
        };

        if diag.show_results {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => self.close_diagnostic(),
                KeyCode::Char('q') => return Ok(true),
                _ => {}
            }
            return Ok(false);
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => diag.next_option(),
            KeyCode::Char('k') | KeyCode::Up => diag.prev_option(),
            KeyCode::Enter => diag.confirm_selection(),
            KeyCode::Esc => self.close_diagnostic(),
            KeyCode::Char('q') => return Ok(true),
            _ => {}
        }
        Ok(false)
    }

    fn handle_exam_key(&mut self, key: KeyEvent) -> Result<bool> {
        if self.state.exam_panel.confirm_reset {
            return self.handle_reset_confirmation(key);
        }
        if self.state.exam_panel.editing {
            return self.handle_answer_editing(key);
        }

        let Some(action) = key_with_modifier_to_action(key.code, key.modifiers) else {
            return Ok(false);
        };

        match action {
            Action::Quit => return Ok(true),
            Action::Help => self.state.help_visible = true,
            Action::Back => self.state.screen = Screen::Study,
            Action::Down => {
                let last = PROBLEMS.len() - 1;
                self.state.exam_panel.selected_problem =
                    (self.state.exam_panel.selected_problem + 1).min(last);
            }
            Action::Up => {
                self.state.exam_panel.selected_problem =
                    self.state.exam_panel.selected_problem.saturating_sub(1);
            }
            Action::Top => self.state.exam_panel.selected_problem = 0,
            Action::Bottom => self.state.exam_panel.selected_problem = PROBLEMS.len() - 1,
            Action::StartTimer => {
                if !self.exam.timer.start(Instant::now()) {
                    let msg = match self.exam.timer.state() {
                        TimerState::Running => "Timer already running",
                        TimerState::Expired => "Time is up - reset the session to run again",
                        TimerState::Idle => unreachable!("start from Idle cannot fail"),
                    };
                    self.state.set_status(msg);
                }
            }
            Action::Select | Action::EditAnswer => {
                let problem_id = PROBLEMS[self.state.exam_panel.selected_problem].id;
                let existing = self.exam.answers.get_answer(problem_id).to_string();
                self.state.exam_panel.editor.load(&existing);
                self.state.exam_panel.editing = true;
            }
            Action::ToggleSolutions => self.exam.reset.toggle_solutions(),
            Action::ResetSession => self.state.exam_panel.confirm_reset = true,
            _ => {}
        }
        Ok(false)
    }

    /// Keys while the reset confirmation overlay is up
    ///
    /// Both paths go through the coordinator so the decline really is a
    /// no-op at the session level, not just at the UI level.
    fn handle_reset_confirmation(&mut self, key: KeyEvent) -> Result<bool> {
        let confirmed = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => true,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => false,
            _ => return Ok(false),
        };

        self.state.exam_panel.confirm_reset = false;
        let did_reset = self.exam.request_reset(&mut || confirmed)?;
        if did_reset {
            self.state.exam_panel.editor = Default::default();
            self.state.set_status("Session reset - answers cleared, timer back to start");
        }
        Ok(false)
    }

    /// Keys while the answer editor has focus
    ///
    /// Every mutation is synced to the autosave store before returning, so
    /// the persisted map always matches the screen.
    fn handle_answer_editing(&mut self, key: KeyEvent) -> Result<bool> {
        let editor = &mut self.state.exam_panel.editor;
        let mutated = match key.code {
            KeyCode::Esc => {
                self.state.exam_panel.editing = false;
                return Ok(false);
            }
            KeyCode::Enter => {
                editor.insert_newline();
                true
            }
            KeyCode::Backspace => {
                editor.delete_char();
                true
            }
            KeyCode::Delete => {
                editor.delete_char_forward();
                true
            }
            KeyCode::Left => {
                editor.move_left();
                false
            }
            KeyCode::Right => {
                editor.move_right();
                false
            }
            KeyCode::Home => {
                editor.move_start();
                false
            }
            KeyCode::End => {
                editor.move_end();
                false
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                editor.insert_char(c);
                true
            }
            _ => false,
        };

        if mutated {
            let problem_id = PROBLEMS[self.state.exam_panel.selected_problem].id;
            let text = self.state.exam_panel.editor.text.clone();
            self.exam.answers.set_answer(problem_id, text)?;
        }
        Ok(false)
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}
