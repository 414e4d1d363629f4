//! Outlier detection over a course's recorded scores.
//!
//! Two passes, always in this order:
//!
//! 1. every (student, assignment) pair without a score is flagged as missing;
//! 2. each assignment with a large enough sample is scanned for z-score
//!    anomalies, zero scores, and perfect scores amid a low class average.
//!
//! Every recorded score counts toward an assignment's mean and standard
//! deviation, but only students on the roster are flagged. Within one
//! assignment, flags follow student id order.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::{Assignment, Outlier, OutlierReason, Student};
use crate::statistics::{mean, sample_stdev};
use crate::traits::{GradebookSource, ScoreProvider};

/// Thresholds used by the detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Flag scores whose z-score is strictly above this.
    pub z_threshold: f64,
    /// Assignments with fewer recorded scores skip the statistical scan.
    pub min_sample: usize,
    /// Perfect scores are only suspicious above this many recorded scores.
    pub perfect_score_min_sample: usize,
    /// Class average percentage below which a perfect score is suspicious.
    pub low_average_pct: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            z_threshold: 2.0,
            min_sample: 3,
            perfect_score_min_sample: 5,
            low_average_pct: 75.0,
        }
    }
}

/// Detect outliers with the default thresholds.
pub fn detect<P>(students: &[Student], assignments: &[Assignment], scores: &P) -> Vec<Outlier>
where
    P: ScoreProvider + ?Sized,
{
    detect_with(students, assignments, scores, &DetectorConfig::default())
}

/// Detect outliers with explicit thresholds.
pub fn detect_with<P>(
    students: &[Student],
    assignments: &[Assignment],
    scores: &P,
    config: &DetectorConfig,
) -> Vec<Outlier>
where
    P: ScoreProvider + ?Sized,
{
    let mut outliers = missing_grades(students, assignments, scores);
    let missing = outliers.len();

    let roster: HashSet<&str> = students.iter().map(|s| s.id.as_str()).collect();
    for assignment in assignments {
        scan_assignment(assignment, scores, &roster, config, &mut outliers);
    }

    tracing::debug!(
        "detected {} outliers ({missing} missing) across {} students and {} assignments",
        outliers.len(),
        students.len(),
        assignments.len()
    );

    outliers
}

/// Detect outliers for every student and assignment of a course source.
pub fn detect_course<S>(source: &S, config: &DetectorConfig) -> Vec<Outlier>
where
    S: GradebookSource + ?Sized,
{
    detect_with(&source.students(), &source.assignments(), source, config)
}

fn missing_grades<P>(students: &[Student], assignments: &[Assignment], scores: &P) -> Vec<Outlier>
where
    P: ScoreProvider + ?Sized,
{
    let mut outliers = Vec::new();
    for student in students {
        let recorded = scores.student_scores(&student.id);
        for assignment in assignments {
            if !recorded.contains_key(&assignment.title) {
                outliers.push(Outlier {
                    student_id: student.id.clone(),
                    assignment: assignment.title.clone(),
                    score: None,
                    max_score: assignment.max_score,
                    reason: OutlierReason::MissingGrade,
                });
            }
        }
    }
    outliers
}

fn scan_assignment<P>(
    assignment: &Assignment,
    scores: &P,
    roster: &HashSet<&str>,
    config: &DetectorConfig,
    outliers: &mut Vec<Outlier>,
) where
    P: ScoreProvider + ?Sized,
{
    let recorded = scores.assignment_scores(&assignment.title);
    if recorded.len() < config.min_sample {
        return;
    }

    let values: Vec<f64> = recorded.values().copied().collect();
    let Some(mean_score) = mean(&values) else {
        return;
    };
    let stdev = sample_stdev(&values).unwrap_or(0.0);

    let flag = |student_id: &str, score: f64, reason: OutlierReason| Outlier {
        student_id: student_id.to_string(),
        assignment: assignment.title.clone(),
        score: Some(score),
        max_score: assignment.max_score,
        reason,
    };

    let enrolled: Vec<(&str, f64)> = recorded
        .iter()
        .map(|(student_id, &score)| (student_id.as_str(), score))
        .filter(|(student_id, _)| roster.contains(student_id))
        .collect();

    // stdev of zero (all scores identical) means every z-score is zero
    if stdev > 0.0 {
        for &(student_id, score) in &enrolled {
            let z_score = ((score - mean_score) / stdev).abs();
            if z_score > config.z_threshold {
                outliers.push(flag(student_id, score, OutlierReason::UnusualScore { z_score }));
            }
        }
    }

    let class_average_pct = mean_score / assignment.max_score * 100.0;
    let perfect_is_suspicious = recorded.len() > config.perfect_score_min_sample
        && class_average_pct < config.low_average_pct;

    for &(student_id, score) in &enrolled {
        if score == 0.0 {
            outliers.push(flag(student_id, score, OutlierReason::ZeroScore));
        } else if score == assignment.max_score && perfect_is_suspicious {
            outliers.push(flag(student_id, score, OutlierReason::PerfectScoreLowAverage));
        }
    }
}
