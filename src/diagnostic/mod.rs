//! Diagnostic quiz scoring
//!
//! A fixed bank of questions, each tagged with the chapter it probes. The
//! scorer lives only while the diagnostic screen is open; nothing here is
//! persisted. Wrong (or missing) answers become study-gap topics.

mod bank;

use std::collections::{BTreeSet, HashMap};

pub use bank::QUESTIONS;

/// One selectable answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOption {
    pub id: u32,
    pub text: &'static str,
    pub correct: bool,
}

/// A quiz question with exactly one correct option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizQuestion {
    pub id: u32,
    pub prompt: &'static str,
    pub options: &'static [QuizOption],
    /// Shown with the results, next to the correct answer
    pub explanation: &'static str,
    /// Chapter id to revisit when this question is missed
    pub study_topic: &'static str,
}

impl QuizQuestion {
    /// The id of this question's correct option
    pub fn correct_option(&self) -> u32 {
        self.options.iter().find(|o| o.correct).map(|o| o.id).unwrap_or(0)
    }
}

/// Feedback tier for a diagnostic score
///
/// Thresholds are fractions of the bank size, scaled from the original
/// 7-question tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackTier {
    Perfect,
    Good,
    Warning,
    Critical,
}

const GOOD_FRACTION: f64 = 5.0 / 7.0;
const WARNING_FRACTION: f64 = 3.0 / 7.0;

impl FeedbackTier {
    /// Tier for a score out of `total` questions
    pub fn for_score(score: usize, total: usize) -> Self {
        if total == 0 {
            return FeedbackTier::Critical;
        }
        if score == total {
            return FeedbackTier::Perfect;
        }
        let fraction = score as f64 / total as f64;
        if fraction >= GOOD_FRACTION {
            FeedbackTier::Good
        } else if fraction >= WARNING_FRACTION {
            FeedbackTier::Warning
        } else {
            FeedbackTier::Critical
        }
    }

    /// One-line study advice for the tier
    pub fn message(&self) -> &'static str {
        match self {
            FeedbackTier::Perfect => "Interview-ready. Run the mock exam to confirm under time.",
            FeedbackTier::Good => "Solid base. Target the gap chapters, then the mock exam.",
            FeedbackTier::Warning => "Work the gap chapters in order before attempting the exam.",
            FeedbackTier::Critical => "Start from the beginning and work every chapter through.",
        }
    }
}

/// Scores a single pass through the question bank
pub struct DiagnosticScorer {
    questions: &'static [QuizQuestion],
    answers: HashMap<u32, u32>,
}

impl DiagnosticScorer {
    /// Scorer over the built-in bank
    pub fn new() -> Self {
        Self::with_questions(QUESTIONS)
    }

    /// Scorer over an explicit bank
    pub fn with_questions(questions: &'static [QuizQuestion]) -> Self {
        Self { questions, answers: HashMap::new() }
    }

    /// The bank being scored
    pub fn questions(&self) -> &'static [QuizQuestion] {
        self.questions
    }

    /// Record (or overwrite) an answer
    ///
    /// Returns false without recording when the option does not exist on
    /// that question.
    pub fn record_answer(&mut self, question_id: u32, option_id: u32) -> bool {
        let valid = self
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .is_some_and(|q| q.options.iter().any(|o| o.id == option_id));
        if valid {
            self.answers.insert(question_id, option_id);
        }
        valid
    }

    /// The recorded option for a question, if any
    pub fn answer(&self, question_id: u32) -> Option<u32> {
        self.answers.get(&question_id).copied()
    }

    /// Whether every question has a recorded answer
    pub fn is_complete(&self) -> bool {
        self.questions.iter().all(|q| self.answers.contains_key(&q.id))
    }

    /// Count of correctly answered questions
    pub fn score(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| self.answer(q.id) == Some(q.correct_option()))
            .count()
    }

    /// Study topics of every question answered incorrectly
    ///
    /// An unanswered question counts as incorrect; the UI only requests
    /// scoring once `is_complete` holds, but a gap is a gap either way.
    pub fn gap_topics(&self) -> BTreeSet<&'static str> {
        self.questions
            .iter()
            .filter(|q| self.answer(q.id) != Some(q.correct_option()))
            .map(|q| q.study_topic)
            .collect()
    }

    /// Feedback tier for the current score
    pub fn feedback_tier(&self) -> FeedbackTier {
        FeedbackTier::for_score(self.score(), self.questions.len())
    }
}

impl Default for DiagnosticScorer {
    fn default() -> Self {
        Self::new()
    }
}
