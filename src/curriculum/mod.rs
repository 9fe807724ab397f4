//! The study curriculum
//!
//! The chapter catalog is fixed at build time; only completion membership is
//! ever persisted. Study-topic tags on diagnostic questions are chapter ids,
//! so quiz gaps point straight back at chapters to revisit.

mod content;

pub use content::body;

/// A chapter of study material
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chapter {
    /// Stable identifier, used in the completion set and as a study topic
    pub id: &'static str,
    /// Display title
    pub title: &'static str,
    /// Rough time to work through, for display
    pub estimated_time: &'static str,
}

/// All chapters, in study order
pub const CHAPTERS: &[Chapter] = &[
    Chapter { id: "diagnostic", title: "Diagnostic Quiz", estimated_time: "20 min" },
    Chapter { id: "plan", title: "Study Plan", estimated_time: "10 min" },
    Chapter { id: "foundations", title: "SELECT Foundations", estimated_time: "45 min" },
    Chapter { id: "joins", title: "Joins", estimated_time: "60 min" },
    Chapter { id: "aggregation", title: "Aggregation & GROUP BY", estimated_time: "50 min" },
    Chapter { id: "subqueries", title: "Subqueries", estimated_time: "45 min" },
    Chapter { id: "window-functions", title: "Window Functions", estimated_time: "75 min" },
    Chapter { id: "ctes", title: "CTEs & Recursion", estimated_time: "40 min" },
    Chapter { id: "null-handling", title: "NULL Semantics", estimated_time: "30 min" },
    Chapter { id: "indexing", title: "Indexes & Query Plans", estimated_time: "60 min" },
    Chapter { id: "mock-test", title: "Timed Mock Exam", estimated_time: "60 min" },
];

/// A block of chapter content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentBlock {
    /// Prose, wrapped to the panel width at render time
    Text(&'static str),
    /// A code listing rendered through the syntax highlighter
    Code { language: &'static str, source: &'static str },
}

/// Look up a chapter by id
pub fn chapter_by_id(id: &str) -> Option<&'static Chapter> {
    CHAPTERS.iter().find(|c| c.id == id)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn catalog_has_eleven_chapters() {
        assert_eq!(CHAPTERS.len(), 11);
    }

    #[test]
    fn chapter_ids_are_unique() {
        let ids: HashSet<_> = CHAPTERS.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), CHAPTERS.len());
    }

    #[test]
    fn every_chapter_has_a_body() {
        for chapter in CHAPTERS {
            assert!(!body(chapter.id).is_empty(), "no body for {}", chapter.id);
        }
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(chapter_by_id("joins").map(|c| c.title), Some("Joins"));
        assert!(chapter_by_id("nonexistent").is_none());
    }
}
