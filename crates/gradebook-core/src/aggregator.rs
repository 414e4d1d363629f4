//! Weighted final-grade aggregation and class ranking.
//!
//! Each recorded score is normalised to a percentage of its assignment's max
//! score and weighted. The weighted sum is then finalised with the
//! partial-credit policy in [`finalize_weighted_total`].

use crate::model::{FinalGrade, LetterGrade, Student};
use crate::traits::{AssignmentLookup, GradebookSource, ScoreMap, ScoreProvider};

/// Compute one student's final grade from their recorded scores.
///
/// Returns `None` when the student has no scores at all. Scores for
/// assignments the lookup can no longer resolve are skipped.
pub fn compute_final<L>(student_id: &str, scores: &ScoreMap, lookup: &L) -> Option<FinalGrade>
where
    L: AssignmentLookup + ?Sized,
{
    if scores.is_empty() {
        return None;
    }

    let mut weighted_sum = 0.0f64;
    let mut total_weight = 0.0f64;

    for (title, &score) in scores {
        let Some(assignment) = lookup.assignment(title) else {
            tracing::debug!("skipping score for unknown assignment '{title}' ({student_id})");
            continue;
        };
        let percentage = (score / assignment.max_score) * 100.0;
        weighted_sum += percentage * assignment.weight;
        total_weight += assignment.weight;
    }

    let weighted_total = finalize_weighted_total(weighted_sum, total_weight);

    Some(FinalGrade {
        student_id: student_id.to_string(),
        weighted_total,
        letter_grade: LetterGrade::from_score(weighted_total),
    })
}

/// Turn an accumulated weighted sum into a final total.
///
/// - no weight seen: `0.0`
/// - total weight below 1.0: rescaled as if the ungraded share did not exist
/// - total weight of 1.0 or more: the weighted sum unchanged
///
/// The last two branches are deliberately asymmetric: an overshooting weight
/// total is never divided back down.
pub fn finalize_weighted_total(weighted_sum: f64, total_weight: f64) -> f64 {
    if total_weight == 0.0 {
        0.0
    } else if total_weight < 1.0 {
        weighted_sum / total_weight
    } else {
        weighted_sum
    }
}

/// Compute and rank final grades for every student with at least one score.
///
/// Sorted by weighted total, highest first. The sort is stable, so students
/// with equal totals keep their roster order. Ordering uses
/// [`f64::total_cmp`], so a NaN total (only reachable through a provider that
/// hands out NaN scores; [`Gradebook`](crate::snapshot::Gradebook) rejects
/// them) ranks ahead of every real grade.
pub fn rank_all<P, L>(students: &[Student], scores: &P, lookup: &L) -> Vec<FinalGrade>
where
    P: ScoreProvider + ?Sized,
    L: AssignmentLookup + ?Sized,
{
    let mut grades: Vec<FinalGrade> = students
        .iter()
        .filter_map(|s| compute_final(&s.id, &scores.student_scores(&s.id), lookup))
        .collect();

    grades.sort_by(|a, b| b.weighted_total.total_cmp(&a.weighted_total));

    tracing::debug!(
        "ranked {} of {} students",
        grades.len(),
        students.len()
    );

    grades
}

/// Rank every student of a course source.
pub fn rank_course<S>(source: &S) -> Vec<FinalGrade>
where
    S: GradebookSource + ?Sized,
{
    rank_all(&source.students(), source, source)
}
