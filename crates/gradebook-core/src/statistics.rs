//! Descriptive statistics over recorded scores and final grades.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::aggregator::rank_course;
use crate::model::{Assignment, LetterGrade};
use crate::traits::GradebookSource;

/// Tolerance used when checking that assignment weights sum to 1.0.
pub const WEIGHT_TOLERANCE: f64 = 0.01;

/// Arithmetic mean. `None` for an empty sample.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation with Bessel's correction (divides by n - 1).
///
/// `None` when fewer than two values are available.
pub fn sample_stdev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Median of a sample; the mean of the two middle values for even sizes.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Summary of the scores recorded for one assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentStats {
    pub assignment: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation, present from two scores upward.
    pub stdev: Option<f64>,
}

impl AssignmentStats {
    /// Summarise a sample of scores. `None` for an empty sample.
    pub fn from_scores(assignment: &str, scores: &[f64]) -> Option<Self> {
        let mean = mean(scores)?;
        let median = median(scores)?;
        let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            assignment: assignment.to_string(),
            count: scores.len(),
            mean,
            median,
            min,
            max,
            stdev: sample_stdev(scores),
        })
    }
}

/// Statistics for one assignment of a course, or `None` if nothing is graded.
pub fn assignment_stats<S>(title: &str, source: &S) -> Option<AssignmentStats>
where
    S: GradebookSource + ?Sized,
{
    let scores: Vec<f64> = source.assignment_scores(title).into_values().collect();
    AssignmentStats::from_scores(title, &scores)
}

/// Course-wide figures derived from the ranked final grades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseStats {
    pub total_students: usize,
    pub total_assignments: usize,
    /// Number of students with a final grade.
    pub graded_students: usize,
    pub average_grade: f64,
    pub highest_grade: f64,
    pub lowest_grade: f64,
    /// Count of students per letter. Every letter is present.
    pub grade_distribution: BTreeMap<LetterGrade, usize>,
}

impl CourseStats {
    /// Share of graded students holding `letter`, as a percentage.
    pub fn letter_percentage(&self, letter: LetterGrade) -> f64 {
        if self.graded_students == 0 {
            return 0.0;
        }
        let count = self.grade_distribution.get(&letter).copied().unwrap_or(0);
        count as f64 / self.graded_students as f64 * 100.0
    }
}

/// Compute course statistics. Averages are 0.0 when nobody is graded.
pub fn course_stats<S>(source: &S) -> CourseStats
where
    S: GradebookSource + ?Sized,
{
    let ranked = rank_course(source);
    let totals: Vec<f64> = ranked.iter().map(|g| g.weighted_total).collect();

    let mut grade_distribution: BTreeMap<LetterGrade, usize> =
        LetterGrade::ALL.iter().map(|&l| (l, 0)).collect();
    for grade in &ranked {
        *grade_distribution.entry(grade.letter_grade).or_default() += 1;
    }

    let (highest_grade, lowest_grade) = if totals.is_empty() {
        (0.0, 0.0)
    } else {
        (
            totals.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            totals.iter().copied().fold(f64::INFINITY, f64::min),
        )
    };

    CourseStats {
        total_students: source.students().len(),
        total_assignments: source.assignments().len(),
        graded_students: ranked.len(),
        average_grade: mean(&totals).unwrap_or(0.0),
        highest_grade,
        lowest_grade,
        grade_distribution,
    }
}

/// Sum of all assignment weights.
pub fn total_weight(assignments: &[Assignment]) -> f64 {
    assignments.iter().map(|a| a.weight).sum()
}

/// Whether the weights sum to 1.0 within [`WEIGHT_TOLERANCE`].
///
/// Advisory only: grade aggregation never consults this.
pub fn weights_balanced(assignments: &[Assignment]) -> bool {
    (total_weight(assignments) - 1.0).abs() < WEIGHT_TOLERANCE
}
