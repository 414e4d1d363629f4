//! TOML gradebook snapshot parser.
//!
//! Loads course snapshots from TOML files and directories, and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{default_max_score, Assignment, Course, ScoreRecord, Student};
use crate::snapshot::Gradebook;
use crate::statistics::{total_weight, weights_balanced};

/// Intermediate TOML structure for parsing gradebook files.
#[derive(Debug, Deserialize)]
struct TomlGradebookFile {
    course: TomlCourse,
    #[serde(default)]
    students: Vec<TomlStudent>,
    #[serde(default)]
    assignments: Vec<TomlAssignment>,
    #[serde(default)]
    scores: Vec<TomlScore>,
}

#[derive(Debug, Deserialize)]
struct TomlCourse {
    code: String,
    name: String,
    #[serde(default)]
    semester: String,
}

#[derive(Debug, Deserialize)]
struct TomlStudent {
    id: String,
    name: String,
    #[serde(default)]
    email: String,
}

#[derive(Debug, Deserialize)]
struct TomlAssignment {
    title: String,
    weight: f64,
    #[serde(default = "default_max_score")]
    max_score: f64,
}

#[derive(Debug, Deserialize)]
struct TomlScore {
    student_id: String,
    assignment: String,
    score: f64,
}

/// Student ids are matched case-insensitively by storing them upper-cased.
fn normalize_student_id(id: &str) -> String {
    id.trim().to_uppercase()
}

/// Parse a single TOML file into a `Gradebook`.
pub fn parse_gradebook(path: &Path) -> Result<Gradebook> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read gradebook file: {}", path.display()))?;

    parse_gradebook_str(&content, path)
}

/// Parse a TOML string into a `Gradebook` (useful for testing).
pub fn parse_gradebook_str(content: &str, source_path: &Path) -> Result<Gradebook> {
    let parsed: TomlGradebookFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let course = Course {
        code: parsed.course.code.trim().to_string(),
        name: parsed.course.name,
        semester: parsed.course.semester,
    };

    let students = parsed
        .students
        .into_iter()
        .map(|s| Student {
            id: normalize_student_id(&s.id),
            name: s.name.trim().to_string(),
            email: s.email.trim().to_string(),
        })
        .collect();

    let assignments = parsed
        .assignments
        .into_iter()
        .map(|a| Assignment {
            title: a.title.trim().to_string(),
            weight: a.weight,
            max_score: a.max_score,
        })
        .collect();

    let records = parsed
        .scores
        .into_iter()
        .map(|r| ScoreRecord {
            student_id: normalize_student_id(&r.student_id),
            assignment: r.assignment.trim().to_string(),
            score: r.score,
        })
        .collect();

    let gradebook = Gradebook::new(course, students, assignments, records)
        .with_context(|| format!("invalid gradebook: {}", source_path.display()))?;

    Ok(gradebook)
}

/// Recursively load all `.toml` gradebook files from a directory.
pub fn load_gradebook_directory(dir: &Path) -> Result<Vec<Gradebook>> {
    let mut books = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            books.extend(load_gradebook_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_gradebook(&path) {
                Ok(book) => books.push(book),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(books)
}

/// A warning from gradebook validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The assignment title or student id concerned (if applicable).
    pub subject: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a gradebook for common issues.
///
/// Everything reported here is advisory: grading tolerates all of it.
pub fn validate_gradebook(book: &Gradebook) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let assignments = book.assignment_list();

    // Check that weights add up
    if !assignments.is_empty() && !weights_balanced(assignments) {
        warnings.push(ValidationWarning {
            subject: None,
            message: format!(
                "assignment weights sum to {:.2}, expected 1.00",
                total_weight(assignments)
            ),
        });
    }

    // Check individual weights
    for a in assignments {
        if a.weight.is_nan() || a.weight <= 0.0 || a.weight > 1.0 {
            warnings.push(ValidationWarning {
                subject: Some(a.title.clone()),
                message: format!("weight {} is outside (0, 1]", a.weight),
            });
        }
    }

    // Check score records against the roster and assignments
    let roster: HashSet<&str> = book.roster().iter().map(|s| s.id.as_str()).collect();
    for record in book.score_records() {
        if !roster.contains(record.student_id.as_str()) {
            warnings.push(ValidationWarning {
                subject: Some(record.student_id.clone()),
                message: format!(
                    "score for '{}' belongs to a student not on the roster",
                    record.assignment
                ),
            });
        }

        match assignments.iter().find(|a| a.title == record.assignment) {
            None => warnings.push(ValidationWarning {
                subject: Some(record.student_id.clone()),
                message: format!("score references unknown assignment '{}'", record.assignment),
            }),
            Some(a) if record.score < 0.0 || record.score > a.max_score => {
                warnings.push(ValidationWarning {
                    subject: Some(record.student_id.clone()),
                    message: format!(
                        "score {} on '{}' is outside [0, {}]",
                        record.score, a.title, a.max_score
                    ),
                })
            }
            Some(_) => {}
        }
    }

    warnings
}
