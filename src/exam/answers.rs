//! Per-problem answer autosave
//!
//! Every mutation rewrites the whole persisted map before returning, so a
//! crash mid-exam loses nothing. One write per keystroke is deliberate; the
//! blob is tiny and the store is local.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use tracing::warn;

use crate::store::PersistenceStore;

/// Storage key for the exam answer map
pub const MOCK_TEST_ANSWERS_KEY: &str = "mockTestAnswers";

/// Write-through store of problem id → draft answer text
///
/// An empty string is a real entry (the user cleared their answer), distinct
/// from a problem never touched.
pub struct AnswerAutosaveStore {
    store: Box<dyn PersistenceStore>,
    answers: BTreeMap<String, String>,
}

impl AnswerAutosaveStore {
    /// Hydrate from the store, keeping only answers for known problem ids
    ///
    /// Absent, unreadable, or malformed blobs hydrate as empty.
    pub fn new(store: Box<dyn PersistenceStore>, valid_ids: &[&str]) -> Self {
        let mut answers = match store.get(MOCK_TEST_ANSWERS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
                Ok(map) => map,
                Err(e) => {
                    warn!("ignoring malformed answer map: {e}");
                    BTreeMap::new()
                }
            },
            Ok(None) => BTreeMap::new(),
            Err(e) => {
                warn!("could not read answer map: {e}");
                BTreeMap::new()
            }
        };
        answers.retain(|id, _| valid_ids.contains(&id.as_str()));

        Self { store, answers }
    }

    /// Overwrite a problem's answer and persist the whole map
    pub fn set_answer(&mut self, problem_id: &str, text: impl Into<String>) -> Result<()> {
        self.answers.insert(problem_id.to_string(), text.into());
        self.persist()
    }

    /// Stored answer text, empty string when the problem has no entry
    pub fn get_answer(&self, problem_id: &str) -> &str {
        self.answers.get(problem_id).map(String::as_str).unwrap_or("")
    }

    /// Whether the problem has an entry (even an empty one)
    pub fn has_answer(&self, problem_id: &str) -> bool {
        self.answers.contains_key(problem_id)
    }

    /// Number of stored entries
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Drop everything: remove the persisted key, then empty the map
    ///
    /// Removal runs first so a failure leaves both layers untouched.
    pub fn clear(&mut self) -> Result<()> {
        self.store
            .remove(MOCK_TEST_ANSWERS_KEY)
            .context("failed to remove persisted answers")?;
        self.answers.clear();
        Ok(())
    }

    fn persist(&mut self) -> Result<()> {
        let blob =
            serde_json::to_string(&self.answers).context("failed to serialize answer map")?;
        self.store
            .set(MOCK_TEST_ANSWERS_KEY, &blob)
            .context("failed to persist answer map")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::store::{FileStore, MemoryStore, PersistenceStore};

    const IDS: &[&str] = &["1", "2", "3", "4", "5", "6", "7"];

    fn empty() -> AnswerAutosaveStore {
        AnswerAutosaveStore::new(Box::new(MemoryStore::new()), IDS)
    }

    #[test]
    fn absent_answer_reads_as_empty_string() {
        let answers = empty();
        assert_eq!(answers.get_answer("3"), "");
        assert!(!answers.has_answer("3"));
    }

    #[test]
    fn set_then_get_roundtrips() {
        let mut answers = empty();
        answers.set_answer("5", "SELECT 1").unwrap();
        assert_eq!(answers.get_answer("5"), "SELECT 1");
    }

    #[test]
    fn empty_answer_is_distinct_from_no_entry() {
        let mut answers = empty();
        answers.set_answer("2", "").unwrap();

        assert_eq!(answers.get_answer("2"), "");
        assert!(answers.has_answer("2"));
        assert_eq!(answers.answered_count(), 1);
    }

    #[test]
    fn every_mutation_writes_the_whole_map_through() {
        let dir = tempfile::tempdir().unwrap();
        let mut answers = AnswerAutosaveStore::new(Box::new(FileStore::new(dir.path())), IDS);

        answers.set_answer("5", "SELECT 1").unwrap();
        let raw = FileStore::new(dir.path()).get(MOCK_TEST_ANSWERS_KEY).unwrap().unwrap();
        assert_eq!(raw, r#"{"5":"SELECT 1"}"#);

        answers.set_answer("1", "WITH x AS (SELECT 1) SELECT * FROM x").unwrap();
        let raw = FileStore::new(dir.path()).get(MOCK_TEST_ANSWERS_KEY).unwrap().unwrap();
        assert_eq!(raw, r#"{"1":"WITH x AS (SELECT 1) SELECT * FROM x","5":"SELECT 1"}"#);
    }

    #[test]
    fn hydrates_persisted_answers() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut answers =
                AnswerAutosaveStore::new(Box::new(FileStore::new(dir.path())), IDS);
            answers.set_answer("5", "SELECT 1").unwrap();
        }

        let answers = AnswerAutosaveStore::new(Box::new(FileStore::new(dir.path())), IDS);
        assert_eq!(answers.get_answer("5"), "SELECT 1");
    }

    #[test]
    fn hydration_drops_unknown_problem_ids() {
        let store = MemoryStore::with_entries([(
            MOCK_TEST_ANSWERS_KEY.to_string(),
            r#"{"5":"SELECT 1","99":"stale"}"#.to_string(),
        )]);
        let answers = AnswerAutosaveStore::new(Box::new(store), IDS);

        assert_eq!(answers.get_answer("5"), "SELECT 1");
        assert!(!answers.has_answer("99"));
        assert_eq!(answers.answered_count(), 1);
    }

    #[test]
    fn malformed_blob_hydrates_empty() {
        let store = MemoryStore::with_entries([(
            MOCK_TEST_ANSWERS_KEY.to_string(),
            "not json at all".to_string(),
        )]);
        let answers = AnswerAutosaveStore::new(Box::new(store), IDS);
        assert_eq!(answers.answered_count(), 0);
    }

    #[test]
    fn clear_removes_the_persisted_key_entirely() {
        let dir = tempfile::tempdir().unwrap();
        let mut answers = AnswerAutosaveStore::new(Box::new(FileStore::new(dir.path())), IDS);

        answers.set_answer("5", "SELECT 1").unwrap();
        answers.clear().unwrap();

        assert_eq!(answers.get_answer("5"), "");
        assert_eq!(answers.answered_count(), 0);
        assert_eq!(FileStore::new(dir.path()).get(MOCK_TEST_ANSWERS_KEY).unwrap(), None);
    }
}
