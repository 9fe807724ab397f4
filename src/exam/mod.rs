//! The timed mock exam
//!
//! One session per program run: the countdown always starts from the full
//! duration, while drafted answers survive restarts through the autosave
//! store. Per-problem point values are display-only; the exam is not
//! auto-scored.

pub mod answers;
pub mod reset;
pub mod timer;

use anyhow::Result;

use crate::store::PersistenceStore;
use answers::AnswerAutosaveStore;
use reset::{ResetConfirmation, ResetCoordinator};
use timer::TimerController;

/// A mock exam problem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamProblem {
    /// Stable id, also the answer-map key
    pub id: &'static str,
    /// Title, carries the problem's point value
    pub title: &'static str,
    pub prompt: &'static str,
    /// Reference solution, shown behind the solutions toggle
    pub solution: &'static str,
}

/// The fixed problem set
pub const PROBLEMS: &[ExamProblem] = &[
    ExamProblem {
        id: "1",
        title: "Second-highest salary (10 points)",
        prompt: "Return the second-highest distinct salary from employees(id, name, salary). \
                 Return NULL if there is no second salary.",
        solution: "SELECT MAX(salary) AS second_highest\nFROM employees\nWHERE salary < (SELECT MAX(salary) FROM employees);",
    },
    ExamProblem {
        id: "2",
        title: "Duplicate emails (10 points)",
        prompt: "List every email address that appears more than once in \
                 contacts(id, email), with its occurrence count.",
        solution: "SELECT email, COUNT(*) AS occurrences\nFROM contacts\nGROUP BY email\nHAVING COUNT(*) > 1;",
    },
    ExamProblem {
        id: "3",
        title: "Customers without orders (10 points)",
        prompt: "Using customers(id, name) and orders(id, customer_id), return the names of \
                 customers who have never placed an order.",
        solution: "SELECT c.name\nFROM customers c\nWHERE NOT EXISTS (\n    SELECT 1 FROM orders o WHERE o.customer_id = c.id\n);",
    },
    ExamProblem {
        id: "4",
        title: "Top earner per department (15 points)",
        prompt: "For employees(id, name, department_id, salary), return each department's \
                 three highest-paid employees, ties broken by name.",
        solution: "WITH ranked AS (\n    SELECT e.*,\n           ROW_NUMBER() OVER (\n               PARTITION BY department_id\n               ORDER BY salary DESC, name\n           ) AS rn\n    FROM employees e\n)\nSELECT * FROM ranked WHERE rn <= 3;",
    },
    ExamProblem {
        id: "5",
        title: "Three consecutive login days (20 points)",
        prompt: "From logins(user_id, login_date), find users who logged in on at least three \
                 consecutive calendar days.",
        solution: "WITH grouped AS (\n    SELECT user_id,\n           login_date,\n           login_date - CAST(ROW_NUMBER() OVER (\n               PARTITION BY user_id ORDER BY login_date\n           ) AS integer) AS grp\n    FROM (SELECT DISTINCT user_id, login_date FROM logins) d\n)\nSELECT DISTINCT user_id\nFROM grouped\nGROUP BY user_id, grp\nHAVING COUNT(*) >= 3;",
    },
    ExamProblem {
        id: "6",
        title: "Running monthly revenue (15 points)",
        prompt: "From orders(id, placed_at, total_amount), produce one row per month with that \
                 month's revenue and the cumulative revenue to date.",
        solution: "SELECT DATE_TRUNC('month', placed_at) AS month,\n       SUM(total_amount) AS revenue,\n       SUM(SUM(total_amount)) OVER (\n           ORDER BY DATE_TRUNC('month', placed_at)\n       ) AS cumulative\nFROM orders\nGROUP BY DATE_TRUNC('month', placed_at)\nORDER BY month;",
    },
    ExamProblem {
        id: "7",
        title: "Reporting-chain depth (20 points)",
        prompt: "For employees(id, name, manager_id), return every employee with their depth \
                 in the reporting chain (the CEO, whose manager_id is NULL, has depth 1).",
        solution: "WITH RECURSIVE chain AS (\n    SELECT id, name, 1 AS depth\n    FROM employees\n    WHERE manager_id IS NULL\n  UNION ALL\n    SELECT e.id, e.name, chain.depth + 1\n    FROM employees e\n    JOIN chain ON e.manager_id = chain.id\n)\nSELECT * FROM chain;",
    },
];

/// Look up a problem by id
pub fn problem_by_id(id: &str) -> Option<&'static ExamProblem> {
    PROBLEMS.iter().find(|p| p.id == id)
}

/// The mock-exam session: countdown, autosaved answers, reset flow
pub struct MockExam {
    pub timer: TimerController,
    pub answers: AnswerAutosaveStore,
    pub reset: ResetCoordinator,
}

impl MockExam {
    /// Fresh session over the given store
    pub fn new(store: Box<dyn PersistenceStore>, duration_seconds: u32) -> Self {
        let ids: Vec<&str> = PROBLEMS.iter().map(|p| p.id).collect();
        Self {
            timer: TimerController::new(duration_seconds),
            answers: AnswerAutosaveStore::new(store, &ids),
            reset: ResetCoordinator::default(),
        }
    }

    /// Gate-checked reset of answers, timer, and solutions display
    pub fn request_reset(&mut self, gate: &mut dyn ResetConfirmation) -> Result<bool> {
        self.reset.request_reset(gate, &mut self.answers, &mut self.timer)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::time::Instant;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::exam::timer::TimerState;
    use crate::store::MemoryStore;

    #[test]
    fn problem_ids_are_the_stringified_sequence() {
        let ids: Vec<_> = PROBLEMS.iter().map(|p| p.id).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5", "6", "7"]);

        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), PROBLEMS.len());
    }

    #[test]
    fn every_problem_has_a_solution() {
        for p in PROBLEMS {
            assert!(!p.solution.trim().is_empty(), "problem {} lacks a solution", p.id);
            assert!(p.title.contains("points"), "problem {} title lacks points", p.id);
        }
    }

    #[test]
    fn session_restart_keeps_answers_but_restarts_the_clock() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = Box::new(crate::store::FileStore::new(dir.path()));
            let mut exam = MockExam::new(store, 3600);
            exam.answers.set_answer("5", "SELECT 1").unwrap();
            exam.timer.start(Instant::now());
            exam.timer.on_tick();
            assert_eq!(exam.timer.remaining_seconds(), 3599);
        }

        let store = Box::new(crate::store::FileStore::new(dir.path()));
        let exam = MockExam::new(store, 3600);
        assert_eq!(exam.answers.get_answer("5"), "SELECT 1");
        assert_eq!(exam.timer.state(), TimerState::Idle);
        assert_eq!(exam.timer.remaining_seconds(), 3600);
    }

    #[test]
    fn reset_flows_through_the_session() {
        let mut exam = MockExam::new(Box::new(MemoryStore::new()), 60);
        exam.answers.set_answer("1", "draft").unwrap();
        exam.timer.start(Instant::now());

        assert!(exam.request_reset(&mut || true).unwrap());
        assert_eq!(exam.answers.answered_count(), 0);
        assert_eq!(exam.timer.state(), TimerState::Idle);
    }
}
