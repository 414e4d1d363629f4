//! In-memory gradebook snapshot for one course.
//!
//! A [`Gradebook`] is assembled once and never mutated. It indexes score
//! records both by student and by assignment so the engine's accessors are
//! plain map lookups.

use std::collections::{BTreeMap, HashSet};

use crate::error::SnapshotError;
use crate::model::{Assignment, Course, ScoreRecord, Student};
use crate::traits::{AssignmentLookup, GradebookSource, ScoreMap, ScoreProvider};

/// An immutable snapshot of one course's roster, assignments, and scores.
#[derive(Debug, Clone)]
pub struct Gradebook {
    course: Course,
    students: Vec<Student>,
    assignments: Vec<Assignment>,
    records: Vec<ScoreRecord>,
    by_student: BTreeMap<String, ScoreMap>,
    by_assignment: BTreeMap<String, ScoreMap>,
}

impl Gradebook {
    /// Assemble a snapshot.
    ///
    /// A later record for the same (student, assignment) pair replaces an
    /// earlier one. NaN and infinite scores are rejected. Records are not checked against the roster or the
    /// assignment list; see [`crate::parser::validate_gradebook`].
    pub fn new(
        course: Course,
        students: Vec<Student>,
        assignments: Vec<Assignment>,
        records: Vec<ScoreRecord>,
    ) -> Result<Self, SnapshotError> {
        let mut seen_ids = HashSet::new();
        for student in &students {
            if !seen_ids.insert(student.id.as_str()) {
                return Err(SnapshotError::DuplicateStudent(student.id.clone()));
            }
        }

        let mut seen_titles = HashSet::new();
        for assignment in &assignments {
            if !seen_titles.insert(assignment.title.as_str()) {
                return Err(SnapshotError::DuplicateAssignment(assignment.title.clone()));
            }
            if assignment.max_score.is_nan() || assignment.max_score <= 0.0 {
                return Err(SnapshotError::InvalidMaxScore {
                    title: assignment.title.clone(),
                    max_score: assignment.max_score,
                });
            }
        }

        if let Some(record) = records.iter().find(|r| !r.score.is_finite()) {
            return Err(SnapshotError::NonFiniteScore {
                student_id: record.student_id.clone(),
                assignment: record.assignment.clone(),
                score: record.score,
            });
        }

        let mut by_student: BTreeMap<String, ScoreMap> = BTreeMap::new();
        let mut by_assignment: BTreeMap<String, ScoreMap> = BTreeMap::new();
        for record in &records {
            by_student
                .entry(record.student_id.clone())
                .or_default()
                .insert(record.assignment.clone(), record.score);
            by_assignment
                .entry(record.assignment.clone())
                .or_default()
                .insert(record.student_id.clone(), record.score);
        }

        Ok(Self {
            course,
            students,
            assignments,
            records,
            by_student,
            by_assignment,
        })
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    /// Roster in enrollment order.
    pub fn roster(&self) -> &[Student] {
        &self.students
    }

    /// Assignments in definition order.
    pub fn assignment_list(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Score records as supplied, including any that were later replaced.
    pub fn score_records(&self) -> &[ScoreRecord] {
        &self.records
    }

    /// Look up a student by id.
    pub fn student(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    /// Display name for a student id, falling back to the id itself.
    pub fn student_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.student(id).map(|s| s.name.as_str()).unwrap_or(id)
    }
}

impl AssignmentLookup for Gradebook {
    fn assignment(&self, title: &str) -> Option<Assignment> {
        self.assignments.as_slice().assignment(title)
    }
}

impl ScoreProvider for Gradebook {
    fn student_scores(&self, student_id: &str) -> ScoreMap {
        self.by_student.get(student_id).cloned().unwrap_or_default()
    }

    fn assignment_scores(&self, title: &str) -> ScoreMap {
        self.by_assignment.get(title).cloned().unwrap_or_default()
    }
}

impl GradebookSource for Gradebook {
    fn students(&self) -> Vec<Student> {
        self.students.clone()
    }

    fn assignments(&self) -> Vec<Assignment> {
        self.assignments.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::rank_course;
    use crate::detector::{detect_course, DetectorConfig};
    use crate::model::{LetterGrade, OutlierReason};
    use crate::statistics::{assignment_stats, course_stats};

    fn course() -> Course {
        Course {
            code: "CS101".into(),
            name: "Intro to Programming".into(),
            semester: "Fall 2026".into(),
        }
    }

    fn student(id: &str, name: &str) -> Student {
        Student {
            id: id.into(),
            name: name.into(),
            email: String::new(),
        }
    }

    fn assignment(title: &str, weight: f64, max_score: f64) -> Assignment {
        Assignment {
            title: title.into(),
            weight,
            max_score,
        }
    }

    fn record(student_id: &str, assignment: &str, score: f64) -> ScoreRecord {
        ScoreRecord {
            student_id: student_id.into(),
            assignment: assignment.into(),
            score,
        }
    }

    fn sample() -> Gradebook {
        Gradebook::new(
            course(),
            vec![
                student("S1", "Ada"),
                student("S2", "Grace"),
                student("S3", "Linus"),
            ],
            vec![
                assignment("Homework", 0.4, 50.0),
                assignment("Exam", 0.6, 100.0),
            ],
            vec![
                record("S1", "Homework", 45.0),
                record("S1", "Exam", 92.0),
                record("S2", "Homework", 30.0),
                record("S2", "Exam", 70.0),
                record("S3", "Homework", 40.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn rejects_duplicate_student() {
        let err = Gradebook::new(
            course(),
            vec![student("S1", "Ada"), student("S1", "Other")],
            vec![],
            vec![],
        )
        .unwrap_err();
        assert_eq!(err, SnapshotError::DuplicateStudent("S1".into()));
    }

    #[test]
    fn rejects_duplicate_assignment() {
        let err = Gradebook::new(
            course(),
            vec![],
            vec![assignment("Exam", 0.5, 100.0), assignment("Exam", 0.5, 100.0)],
            vec![],
        )
        .unwrap_err();
        assert_eq!(err.subject(), "Exam");
    }

    #[test]
    fn rejects_non_positive_max_score() {
        for bad in [0.0, -10.0, f64::NAN] {
            let err = Gradebook::new(course(), vec![], vec![assignment("Quiz", 0.1, bad)], vec![])
                .unwrap_err();
            assert!(matches!(err, SnapshotError::InvalidMaxScore { .. }));
        }
    }

    #[test]
    fn rejects_non_finite_score() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = Gradebook::new(
                course(),
                vec![student("S1", "Ada")],
                vec![assignment("Quiz", 1.0, 10.0)],
                vec![record("S1", "Quiz", 7.0), record("S1", "Quiz", bad)],
            )
            .unwrap_err();
            assert!(matches!(err, SnapshotError::NonFiniteScore { .. }));
            assert_eq!(err.subject(), "S1");
        }
    }

    #[test]
    fn later_record_replaces_earlier() {
        let book = Gradebook::new(
            course(),
            vec![student("S1", "Ada")],
            vec![assignment("Quiz", 1.0, 10.0)],
            vec![record("S1", "Quiz", 4.0), record("S1", "Quiz", 9.0)],
        )
        .unwrap();

        assert_eq!(book.student_scores("S1").get("Quiz"), Some(&9.0));
        assert_eq!(book.assignment_scores("Quiz").get("S1"), Some(&9.0));
        assert_eq!(book.score_records().len(), 2);
    }

    #[test]
    fn accessors_for_unknown_keys_are_empty() {
        let book = sample();
        assert!(book.student_scores("nobody").is_empty());
        assert!(book.assignment_scores("Project").is_empty());
        assert!(AssignmentLookup::assignment(&book, "Project").is_none());
        assert_eq!(book.student_name("nobody"), "nobody");
        assert_eq!(book.student_name("S2"), "Grace");
    }

    #[test]
    fn ranks_course() {
        let ranked = rank_course(&sample());
        let ids: Vec<&str> = ranked.iter().map(|g| g.student_id.as_str()).collect();
        // S1: 90*0.4 + 92*0.6 = 91.2; S3: 80 rescaled; S2: 60*0.4 + 70*0.6 = 66
        assert_eq!(ids, vec!["S1", "S3", "S2"]);
        assert!((ranked[0].weighted_total - 91.2).abs() < 1e-9);
        assert_eq!(ranked[0].letter_grade, LetterGrade::A);
        assert!((ranked[1].weighted_total - 80.0).abs() < 1e-9);
        assert_eq!(ranked[2].letter_grade, LetterGrade::D);
    }

    #[test]
    fn detects_missing_exam() {
        let outliers = detect_course(&sample(), &DetectorConfig::default());
        assert_eq!(outliers.len(), 1);
        assert_eq!(outliers[0].student_id, "S3");
        assert_eq!(outliers[0].assignment, "Exam");
        assert_eq!(outliers[0].reason, OutlierReason::MissingGrade);
    }

    #[test]
    fn unenrolled_zero_is_not_flagged() {
        let book = Gradebook::new(
            course(),
            vec![
                student("S1", "Ada"),
                student("S2", "Grace"),
                student("S3", "Linus"),
            ],
            vec![assignment("Lab", 1.0, 100.0)],
            vec![
                record("S1", "Lab", 80.0),
                record("S2", "Lab", 82.0),
                record("S3", "Lab", 81.0),
                record("GONE", "Lab", 0.0),
            ],
        )
        .unwrap();

        let outliers = detect_course(&book, &DetectorConfig::default());
        assert!(outliers.is_empty());
        assert_eq!(assignment_stats("Lab", &book).unwrap().count, 4);
    }

    #[test]
    fn course_statistics() {
        let stats = course_stats(&sample());
        assert_eq!(stats.total_students, 3);
        assert_eq!(stats.total_assignments, 2);
        assert_eq!(stats.graded_students, 3);
        assert!((stats.highest_grade - 91.2).abs() < 1e-9);
        assert!((stats.lowest_grade - 66.0).abs() < 1e-9);
        assert!((stats.average_grade - (91.2 + 80.0 + 66.0) / 3.0).abs() < 1e-9);
        assert_eq!(stats.grade_distribution[&LetterGrade::A], 1);
        assert_eq!(stats.grade_distribution[&LetterGrade::B], 1);
        assert_eq!(stats.grade_distribution[&LetterGrade::C], 0);
        assert_eq!(stats.grade_distribution[&LetterGrade::D], 1);
        assert_eq!(stats.grade_distribution[&LetterGrade::F], 0);
        assert!((stats.letter_percentage(LetterGrade::A) - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn course_statistics_without_grades() {
        let book = Gradebook::new(
            course(),
            vec![student("S1", "Ada")],
            vec![assignment("Quiz", 1.0, 10.0)],
            vec![],
        )
        .unwrap();
        let stats = course_stats(&book);
        assert_eq!(stats.graded_students, 0);
        assert_eq!(stats.average_grade, 0.0);
        assert_eq!(stats.highest_grade, 0.0);
        assert_eq!(stats.lowest_grade, 0.0);
        assert_eq!(stats.letter_percentage(LetterGrade::F), 0.0);
        assert_eq!(stats.grade_distribution.len(), 5);
    }

    #[test]
    fn assignment_statistics() {
        let book = sample();
        let stats = assignment_stats("Homework", &book).unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.median, 40.0);
        assert_eq!(stats.min, 30.0);
        assert_eq!(stats.max, 45.0);
        assert!(assignment_stats("Project", &book).is_none());
    }
}
