//! Chapter completion tracking
//!
//! The completion set is the one piece of cross-chapter state in the app.
//! It is hydrated once at startup and written through on every toggle, so a
//! crash can never lose more than nothing.

use anyhow::{Context, Result};
use tracing::warn;

use crate::store::PersistenceStore;

/// Storage key for the completion set
pub const COMPLETED_CHAPTERS_KEY: &str = "completedChapters";

/// Listener invoked with `(chapter_id, now_completed)` after each toggle
pub type CompletionListener = Box<dyn FnMut(&str, bool)>;

/// Tracks which chapters the learner has marked done
///
/// Membership is an ordered set: insertion order is preserved, duplicates
/// are impossible, and `toggle` is its own inverse.
pub struct ProgressTracker {
    store: Box<dyn PersistenceStore>,
    completed: Vec<String>,
    listeners: Vec<CompletionListener>,
}

impl ProgressTracker {
    /// Create a tracker, hydrating the completion set from the store
    ///
    /// A missing, unreadable, or malformed blob falls back to the empty set.
    pub fn new(store: Box<dyn PersistenceStore>) -> Self {
        let completed = match store.get(COMPLETED_CHAPTERS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(ids) => dedup_preserving_order(ids),
                Err(e) => {
                    warn!("ignoring malformed completion set: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("could not read completion set: {e}");
                Vec::new()
            }
        };

        Self { store, completed, listeners: Vec::new() }
    }

    /// Flip a chapter's completion, persist, and notify listeners
    ///
    /// Returns the chapter's new membership.
    pub fn toggle(&mut self, chapter_id: &str) -> Result<bool> {
        let now_completed = if let Some(pos) = self.completed.iter().position(|c| c == chapter_id)
        {
            self.completed.remove(pos);
            false
        } else {
            self.completed.push(chapter_id.to_string());
            true
        };

        self.persist()?;

        for listener in &mut self.listeners {
            listener(chapter_id, now_completed);
        }

        Ok(now_completed)
    }

    /// Whether a chapter is marked complete
    pub fn is_completed(&self, chapter_id: &str) -> bool {
        self.completed.iter().any(|c| c == chapter_id)
    }

    /// Completed chapter ids in the order they were marked
    pub fn completed(&self) -> &[String] {
        &self.completed
    }

    /// Overall progress as a rounded percentage, 0 when there are no chapters
    pub fn progress_percent(&self, total_chapters: usize) -> u8 {
        if total_chapters == 0 {
            return 0;
        }
        (100.0 * self.completed.len() as f64 / total_chapters as f64).round() as u8
    }

    /// Register a listener for completion changes
    pub fn subscribe(&mut self, listener: CompletionListener) {
        self.listeners.push(listener);
    }

    fn persist(&mut self) -> Result<()> {
        let blob = serde_json::to_string(&self.completed)
            .context("failed to serialize completion set")?;
        self.store
            .set(COMPLETED_CHAPTERS_KEY, &blob)
            .context("failed to persist completion set")?;
        Ok(())
    }
}

fn dedup_preserving_order(ids: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(ids.len());
    for id in ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::store::MemoryStore;

    fn tracker() -> ProgressTracker {
        ProgressTracker::new(Box::new(MemoryStore::new()))
    }

    #[test]
    fn starts_empty_without_stored_state() {
        let tracker = tracker();
        assert!(tracker.completed().is_empty());
        assert!(!tracker.is_completed("joins"));
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut tracker = tracker();

        assert!(tracker.toggle("joins").unwrap());
        assert!(tracker.is_completed("joins"));

        assert!(!tracker.toggle("joins").unwrap());
        assert!(!tracker.is_completed("joins"));
    }

    #[test]
    fn toggle_preserves_insertion_order() {
        let mut tracker = tracker();
        tracker.toggle("diagnostic").unwrap();
        tracker.toggle("plan").unwrap();
        tracker.toggle("joins").unwrap();

        assert_eq!(tracker.completed(), ["diagnostic", "plan", "joins"]);
    }

    #[test]
    fn toggle_writes_through_as_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracker =
            ProgressTracker::new(Box::new(crate::store::FileStore::new(dir.path())));
        tracker.toggle("diagnostic").unwrap();
        tracker.toggle("plan").unwrap();

        let raw = crate::store::FileStore::new(dir.path())
            .get(COMPLETED_CHAPTERS_KEY)
            .unwrap()
            .unwrap();
        assert_eq!(raw, r#"["diagnostic","plan"]"#);

        let reloaded = ProgressTracker::new(Box::new(crate::store::FileStore::new(dir.path())));
        assert_eq!(reloaded.completed(), ["diagnostic", "plan"]);
    }

    #[test]
    fn malformed_blob_hydrates_empty() {
        let store = MemoryStore::with_entries([(
            COMPLETED_CHAPTERS_KEY.to_string(),
            "{not json".to_string(),
        )]);
        let tracker = ProgressTracker::new(Box::new(store));
        assert!(tracker.completed().is_empty());
    }

    #[test]
    fn duplicate_ids_in_blob_are_dropped() {
        let store = MemoryStore::with_entries([(
            COMPLETED_CHAPTERS_KEY.to_string(),
            r#"["joins","plan","joins"]"#.to_string(),
        )]);
        let tracker = ProgressTracker::new(Box::new(store));
        assert_eq!(tracker.completed(), ["joins", "plan"]);
    }

    #[test]
    fn progress_percent_rounds() {
        let mut tracker = tracker();
        tracker.toggle("diagnostic").unwrap();

        // 1 of 11 chapters: round(100/11) == 9
        assert_eq!(tracker.progress_percent(11), 9);
    }

    #[test]
    fn progress_percent_guards_zero_total() {
        let tracker = tracker();
        assert_eq!(tracker.progress_percent(0), 0);
    }

    #[test]
    fn listeners_observe_toggles() {
        let seen: Rc<RefCell<Vec<(String, bool)>>> = Rc::default();
        let sink = Rc::clone(&seen);

        let mut tracker = tracker();
        tracker.subscribe(Box::new(move |id, done| {
            sink.borrow_mut().push((id.to_string(), done));
        }));

        tracker.toggle("joins").unwrap();
        tracker.toggle("joins").unwrap();

        assert_eq!(
            *seen.borrow(),
            [("joins".to_string(), true), ("joins".to_string(), false)]
        );
    }

    proptest! {
        #[test]
        fn toggle_twice_restores_membership(
            seed in proptest::collection::vec("[a-z]{1,10}", 0..8),
            target in "[a-z]{1,10}",
        ) {
            let mut tracker = tracker();
            for id in &seed {
                tracker.toggle(id).unwrap();
            }
            let before: Vec<String> = tracker.completed().to_vec();

            tracker.toggle(&target).unwrap();
            tracker.toggle(&target).unwrap();

            // Double toggle restores the original membership set
            let after: Vec<String> = tracker.completed().to_vec();
            prop_assert_eq!(
                before.iter().any(|c| c == &target),
                after.iter().any(|c| c == &target)
            );
            prop_assert_eq!(before.len(), after.len());
        }
    }
}
