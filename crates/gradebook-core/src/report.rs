//! Course report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregator::rank_course;
use crate::detector::{detect_course, DetectorConfig};
use crate::model::{Course, LetterGrade, Outlier};
use crate::snapshot::Gradebook;
use crate::statistics::{
    assignment_stats, course_stats, total_weight, weights_balanced, AssignmentStats, CourseStats,
};

/// Everything derived from one gradebook snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseReport {
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    pub course: Course,
    /// Sum of assignment weights.
    pub total_weight: f64,
    /// Whether the weights sum to 1.0 within tolerance.
    pub weights_balanced: bool,
    /// Final grades, highest first.
    pub rankings: Vec<RankedStudent>,
    /// Flagged issues in detection order.
    pub outliers: Vec<FlaggedOutlier>,
    /// Statistics for every assignment that has at least one score.
    pub assignments: Vec<AssignmentStats>,
    pub stats: CourseStats,
}

/// A ranked final grade with the student's display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedStudent {
    /// 1-based position in the ranking.
    pub rank: usize,
    pub student_id: String,
    pub name: String,
    pub weighted_total: f64,
    pub letter_grade: LetterGrade,
}

/// An outlier with the student's display name and a rendered message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlaggedOutlier {
    pub student_name: String,
    pub message: String,
    pub outlier: Outlier,
}

impl CourseReport {
    /// Build a report from a snapshot.
    pub fn build(book: &Gradebook, config: &DetectorConfig) -> Self {
        let rankings = rank_course(book)
            .into_iter()
            .enumerate()
            .map(|(i, g)| RankedStudent {
                rank: i + 1,
                name: book.student_name(&g.student_id).to_string(),
                student_id: g.student_id,
                weighted_total: g.weighted_total,
                letter_grade: g.letter_grade,
            })
            .collect();

        let outliers = detect_course(book, config)
            .into_iter()
            .map(|o| FlaggedOutlier {
                student_name: book.student_name(&o.student_id).to_string(),
                message: o.reason.to_string(),
                outlier: o,
            })
            .collect();

        let assignments = book
            .assignment_list()
            .iter()
            .filter_map(|a| assignment_stats(&a.title, book))
            .collect();

        Self {
            created_at: Utc::now(),
            course: book.course().clone(),
            total_weight: total_weight(book.assignment_list()),
            weights_balanced: weights_balanced(book.assignment_list()),
            rankings,
            outliers,
            assignments,
            stats: course_stats(book),
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: CourseReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Outliers that are not missing grades.
    pub fn score_flags(&self) -> impl Iterator<Item = &FlaggedOutlier> {
        self.outliers.iter().filter(|f| !f.outlier.is_missing())
    }
}
