//! Core data model types for the gradebook.
//!
//! These are the fundamental types the engine works with: the course roster,
//! assignment definitions, recorded scores, and the derived final grades and
//! outlier flags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A course that a gradebook snapshot is scoped to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Course code (e.g. "CS101").
    pub code: String,
    /// Human-readable course name.
    pub name: String,
    /// Semester label (e.g. "Fall 2026").
    #[serde(default)]
    pub semester: String,
}

/// A student enrolled in a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Opaque student identifier.
    pub id: String,
    /// Display name. Used only for reporting.
    pub name: String,
    /// Contact address, if known.
    #[serde(default)]
    pub email: String,
}

/// A graded assignment within a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Title, unique within the course.
    pub title: String,
    /// Fractional contribution to the final grade, intended in (0, 1].
    pub weight: f64,
    /// Maximum attainable score. Must be positive.
    #[serde(default = "default_max_score")]
    pub max_score: f64,
}

pub(crate) fn default_max_score() -> f64 {
    100.0
}

/// One recorded score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// The student the score belongs to.
    pub student_id: String,
    /// Title of the assignment that was graded.
    pub assignment: String,
    /// Raw score, expected in `[0, max_score]`.
    pub score: f64,
}

/// Letter grade derived from a weighted total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    /// Every letter, best first.
    pub const ALL: [LetterGrade; 5] = [
        LetterGrade::A,
        LetterGrade::B,
        LetterGrade::C,
        LetterGrade::D,
        LetterGrade::F,
    ];

    /// Map a weighted total onto a letter.
    ///
    /// | Range  | Grade |
    /// |--------|-------|
    /// | >= 90  | A     |
    /// | >= 80  | B     |
    /// | >= 70  | C     |
    /// | >= 60  | D     |
    /// | < 60   | F     |
    ///
    /// Totals are not clamped, so anything above 100 is still an `A` and
    /// anything negative (or NaN) is an `F`.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => LetterGrade::A,
            s if s >= 80.0 => LetterGrade::B,
            s if s >= 70.0 => LetterGrade::C,
            s if s >= 60.0 => LetterGrade::D,
            _ => LetterGrade::F,
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            LetterGrade::A => "A",
            LetterGrade::B => "B",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        };
        f.write_str(letter)
    }
}

impl FromStr for LetterGrade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(LetterGrade::A),
            "B" => Ok(LetterGrade::B),
            "C" => Ok(LetterGrade::C),
            "D" => Ok(LetterGrade::D),
            "F" => Ok(LetterGrade::F),
            other => Err(format!("unknown letter grade: {other}")),
        }
    }
}

/// A student's computed final grade. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalGrade {
    pub student_id: String,
    /// Weighted total after partial-credit rescaling.
    pub weighted_total: f64,
    pub letter_grade: LetterGrade,
}

/// Why a score (or the lack of one) was flagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutlierReason {
    /// No score is recorded for the pair.
    MissingGrade,
    /// The score lies more than the threshold number of standard deviations
    /// from the assignment mean.
    UnusualScore { z_score: f64 },
    /// The score is exactly zero.
    ZeroScore,
    /// Full marks on an assignment whose class average is low.
    PerfectScoreLowAverage,
}

impl fmt::Display for OutlierReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutlierReason::MissingGrade => write!(f, "Missing grade"),
            OutlierReason::UnusualScore { z_score } => {
                write!(f, "Unusual score (z-score: {z_score:.2})")
            }
            OutlierReason::ZeroScore => write!(f, "Zero score - possible issue"),
            OutlierReason::PerfectScoreLowAverage => {
                write!(f, "Perfect score while class average is low")
            }
        }
    }
}

/// A flagged (student, assignment) pair that needs instructor review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outlier {
    pub student_id: String,
    pub assignment: String,
    /// Observed score; `None` marks a missing grade.
    pub score: Option<f64>,
    pub max_score: f64,
    pub reason: OutlierReason,
}

impl Outlier {
    /// Whether this flag marks a missing grade rather than an observed score.
    pub fn is_missing(&self) -> bool {
        self.score.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_grade_boundaries() {
        assert_eq!(LetterGrade::from_score(100.0), LetterGrade::A);
        assert_eq!(LetterGrade::from_score(90.0), LetterGrade::A);
        assert_eq!(LetterGrade::from_score(89.999), LetterGrade::B);
        assert_eq!(LetterGrade::from_score(80.0), LetterGrade::B);
        assert_eq!(LetterGrade::from_score(79.99), LetterGrade::C);
        assert_eq!(LetterGrade::from_score(70.0), LetterGrade::C);
        assert_eq!(LetterGrade::from_score(69.99), LetterGrade::D);
        assert_eq!(LetterGrade::from_score(60.0), LetterGrade::D);
        assert_eq!(LetterGrade::from_score(59.999), LetterGrade::F);
        assert_eq!(LetterGrade::from_score(0.0), LetterGrade::F);
    }

    #[test]
    fn letter_grade_is_not_clamped() {
        assert_eq!(LetterGrade::from_score(140.0), LetterGrade::A);
        assert_eq!(LetterGrade::from_score(-5.0), LetterGrade::F);
        assert_eq!(LetterGrade::from_score(f64::NAN), LetterGrade::F);
    }

    #[test]
    fn letter_grade_display_and_parse() {
        assert_eq!(LetterGrade::B.to_string(), "B");
        assert_eq!("a".parse::<LetterGrade>().unwrap(), LetterGrade::A);
        assert_eq!(" f ".parse::<LetterGrade>().unwrap(), LetterGrade::F);
        assert!("E".parse::<LetterGrade>().is_err());
    }

    #[test]
    fn outlier_reason_messages() {
        assert_eq!(OutlierReason::MissingGrade.to_string(), "Missing grade");
        assert_eq!(
            OutlierReason::UnusualScore { z_score: 1.78885 }.to_string(),
            "Unusual score (z-score: 1.79)"
        );
        assert_eq!(
            OutlierReason::ZeroScore.to_string(),
            "Zero score - possible issue"
        );
        assert_eq!(
            OutlierReason::PerfectScoreLowAverage.to_string(),
            "Perfect score while class average is low"
        );
    }

    #[test]
    fn assignment_max_score_defaults_to_100() {
        let a: Assignment = serde_json::from_str(r#"{"title":"Quiz 1","weight":0.1}"#).unwrap();
        assert_eq!(a.max_score, 100.0);
    }

    #[test]
    fn outlier_serializes_missing_score_as_null() {
        let outlier = Outlier {
            student_id: "S1".into(),
            assignment: "Essay".into(),
            score: None,
            max_score: 50.0,
            reason: OutlierReason::MissingGrade,
        };
        let json = serde_json::to_value(&outlier).unwrap();
        assert!(json["score"].is_null());
        assert_eq!(json["reason"]["kind"], "missing_grade");
        assert!(outlier.is_missing());
    }
}
