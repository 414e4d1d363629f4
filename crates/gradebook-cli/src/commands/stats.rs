//! The `gradebook stats` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use gradebook_core::model::LetterGrade;
use gradebook_core::snapshot::Gradebook;
use gradebook_core::statistics::{
    assignment_stats, course_stats, total_weight, weights_balanced, AssignmentStats,
};

use super::Session;
use crate::config::OutputFormat;

pub fn execute(
    gradebook_path: PathBuf,
    assignment: Option<String>,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let session = Session::open(&gradebook_path, config_path.as_deref())?;
    let format = session.format(format.as_deref())?;

    match assignment {
        Some(title) => print_assignment(&session.book, &title, format),
        None => print_course(&session.book, format),
    }
}

fn print_assignment(book: &Gradebook, title: &str, format: OutputFormat) -> Result<()> {
    let Some(assignment) = book.assignment_list().iter().find(|a| a.title == title) else {
        anyhow::bail!("unknown assignment: {title}");
    };
    let stats = assignment_stats(title, book);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Text => match stats {
            Some(stats) => print_assignment_table(&stats, assignment.max_score),
            None => println!("No scores recorded for '{title}'."),
        },
    }

    Ok(())
}

fn print_assignment_table(stats: &AssignmentStats, max_score: f64) {
    let mut table = Table::new();
    table.set_header(vec!["Assignment", "Count", "Mean", "Median", "Min", "Max", "Std Dev"]);
    table.add_row(vec![
        Cell::new(&stats.assignment),
        Cell::new(stats.count),
        Cell::new(format!("{:.2}", stats.mean)),
        Cell::new(format!("{:.2}", stats.median)),
        Cell::new(format!("{}", stats.min)),
        Cell::new(format!("{}", stats.max)),
        Cell::new(
            stats
                .stdev
                .map(|s| format!("{s:.2}"))
                .unwrap_or_else(|| "-".to_string()),
        ),
    ]);
    println!("{table}");
    println!(
        "Class average: {:.1}% of {max_score}",
        stats.mean / max_score * 100.0
    );
}

fn print_course(book: &Gradebook, format: OutputFormat) -> Result<()> {
    let stats = course_stats(book);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Text => {
            let course = book.course();
            println!("Course: {} ({})", course.name, course.code);
            if !course.semester.is_empty() {
                println!("Semester: {}", course.semester);
            }
            println!(
                "Students: {} ({} graded)",
                stats.total_students, stats.graded_students
            );
            println!("Assignments: {}", stats.total_assignments);

            let weight = total_weight(book.assignment_list());
            if weights_balanced(book.assignment_list()) {
                println!("Total weight: {weight:.2}");
            } else {
                println!("Total weight: {weight:.2} (WARNING: expected 1.00)");
            }

            println!("Average grade: {:.2}", stats.average_grade);
            println!("Highest grade: {:.2}", stats.highest_grade);
            println!("Lowest grade: {:.2}", stats.lowest_grade);

            let mut table = Table::new();
            table.set_header(vec!["Grade", "Students", "Share"]);
            for letter in LetterGrade::ALL {
                let count = stats.grade_distribution.get(&letter).copied().unwrap_or(0);
                table.add_row(vec![
                    Cell::new(letter),
                    Cell::new(count),
                    Cell::new(format!("{:.1}%", stats.letter_percentage(letter))),
                ]);
            }
            println!("{table}");
        }
    }

    Ok(())
}
