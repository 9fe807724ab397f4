//! Session reset
//!
//! The only operation that touches more than one exam component. The
//! confirmation is an injected capability so the coordinator is testable
//! without a dialog; the TUI implements it from the overlay's captured
//! answer.

use anyhow::Result;

use super::answers::AnswerAutosaveStore;
use super::timer::TimerController;

/// A yes/no confirmation gate for destructive actions
pub trait ResetConfirmation {
    /// Ask once; true means proceed
    fn confirm_reset(&mut self) -> bool;
}

impl<F: FnMut() -> bool> ResetConfirmation for F {
    fn confirm_reset(&mut self) -> bool {
        self()
    }
}

/// Coordinates the all-or-nothing exam reset
#[derive(Debug, Default)]
pub struct ResetCoordinator {
    solutions_visible: bool,
}

impl ResetCoordinator {
    /// Whether problem solutions are currently shown
    pub fn solutions_visible(&self) -> bool {
        self.solutions_visible
    }

    /// Flip the solutions display
    pub fn toggle_solutions(&mut self) {
        self.solutions_visible = !self.solutions_visible;
    }

    /// Reset the session if the gate confirms
    ///
    /// Declined: a complete no-op, returns false. Confirmed: clear the
    /// saved answers (the one fallible step, run first so a failure leaves
    /// everything untouched), reset the timer, hide solutions.
    pub fn request_reset(
        &mut self,
        gate: &mut dyn ResetConfirmation,
        answers: &mut AnswerAutosaveStore,
        timer: &mut TimerController,
    ) -> Result<bool> {
        if !gate.confirm_reset() {
            return Ok(false);
        }

        answers.clear()?;
        timer.reset();
        self.solutions_visible = false;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::exam::answers::MOCK_TEST_ANSWERS_KEY;
    use crate::exam::timer::TimerState;
    use crate::store::{FileStore, MemoryStore, PersistenceStore};

    const IDS: &[&str] = &["1", "2", "3", "4", "5", "6", "7"];

    #[test]
    fn confirmed_reset_clears_answers_timer_and_solutions() {
        let dir = tempfile::tempdir().unwrap();
        let mut answers = AnswerAutosaveStore::new(Box::new(FileStore::new(dir.path())), IDS);
        let mut timer = TimerController::new(3600);
        let mut coordinator = ResetCoordinator::default();

        answers.set_answer("5", "SELECT 1").unwrap();
        timer.start(Instant::now());
        timer.on_tick();
        coordinator.toggle_solutions();

        let did_reset = coordinator
            .request_reset(&mut || true, &mut answers, &mut timer)
            .unwrap();

        assert!(did_reset);
        assert_eq!(answers.get_answer("5"), "");
        assert_eq!(FileStore::new(dir.path()).get(MOCK_TEST_ANSWERS_KEY).unwrap(), None);
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining_seconds(), 3600);
        assert!(!coordinator.solutions_visible());
    }

    #[test]
    fn declined_reset_changes_nothing() {
        let mut answers = AnswerAutosaveStore::new(Box::new(MemoryStore::new()), IDS);
        let mut timer = TimerController::new(3600);
        let mut coordinator = ResetCoordinator::default();

        answers.set_answer("5", "SELECT 1").unwrap();
        timer.start(Instant::now());
        timer.on_tick();
        coordinator.toggle_solutions();

        let did_reset = coordinator
            .request_reset(&mut || false, &mut answers, &mut timer)
            .unwrap();

        assert!(!did_reset);
        assert_eq!(answers.get_answer("5"), "SELECT 1");
        assert_eq!(timer.state(), TimerState::Running);
        assert_eq!(timer.remaining_seconds(), 3599);
        assert!(coordinator.solutions_visible());
    }

    #[test]
    fn gate_is_asked_exactly_once_per_request() {
        let mut asked = 0;
        let mut gate = || {
            asked += 1;
            false
        };
        let mut answers = AnswerAutosaveStore::new(Box::new(MemoryStore::new()), IDS);
        let mut timer = TimerController::new(60);
        let mut coordinator = ResetCoordinator::default();

        coordinator.request_reset(&mut gate, &mut answers, &mut timer).unwrap();
        assert_eq!(asked, 1);
    }
}
