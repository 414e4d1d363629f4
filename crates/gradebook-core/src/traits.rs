//! Read-only accessor traits the grading engine consumes.
//!
//! Storage layers implement these for whatever backs a course. The engine
//! never caches what they return: every call reads a fresh snapshot, and the
//! caller is responsible for scoping the accessors to a single course.

use std::collections::{BTreeMap, HashMap};

use crate::model::{Assignment, Student};

/// Scores keyed by assignment title (one student's view) or by student id
/// (one assignment's view).
pub type ScoreMap = BTreeMap<String, f64>;

// ---------------------------------------------------------------------------
// Assignment lookup
// ---------------------------------------------------------------------------

/// Resolves an assignment title to its weight and max score.
pub trait AssignmentLookup {
    /// Look up an assignment by title. `None` if it no longer exists.
    fn assignment(&self, title: &str) -> Option<Assignment>;
}

impl AssignmentLookup for HashMap<String, Assignment> {
    fn assignment(&self, title: &str) -> Option<Assignment> {
        self.get(title).cloned()
    }
}

impl AssignmentLookup for BTreeMap<String, Assignment> {
    fn assignment(&self, title: &str) -> Option<Assignment> {
        self.get(title).cloned()
    }
}

impl AssignmentLookup for [Assignment] {
    fn assignment(&self, title: &str) -> Option<Assignment> {
        self.iter().find(|a| a.title == title).cloned()
    }
}

impl AssignmentLookup for Vec<Assignment> {
    fn assignment(&self, title: &str) -> Option<Assignment> {
        self.as_slice().assignment(title)
    }
}

// ---------------------------------------------------------------------------
// Score provider
// ---------------------------------------------------------------------------

/// Supplies recorded scores.
pub trait ScoreProvider {
    /// All scores recorded for one student, keyed by assignment title.
    fn student_scores(&self, student_id: &str) -> ScoreMap;

    /// All scores recorded for one assignment, keyed by student id.
    fn assignment_scores(&self, title: &str) -> ScoreMap;
}

// ---------------------------------------------------------------------------
// Full course source
// ---------------------------------------------------------------------------

/// Everything the engine needs to read about one course.
pub trait GradebookSource: AssignmentLookup + ScoreProvider {
    /// The course roster, in enrollment order.
    fn students(&self) -> Vec<Student>;

    /// The course assignments, in definition order.
    fn assignments(&self) -> Vec<Assignment>;
}
