//! The `gradebook rank` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use gradebook_core::aggregator::rank_course;

use super::Session;
use crate::config::OutputFormat;

pub fn execute(
    gradebook_path: PathBuf,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let session = Session::open(&gradebook_path, config_path.as_deref())?;
    let format = session.format(format.as_deref())?;
    let book = &session.book;
    let ranked = rank_course(book);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&ranked)?);
        }
        OutputFormat::Text => {
            let course = book.course();
            println!("Course: {} ({})", course.name, course.code);

            if ranked.is_empty() {
                println!("No graded students.");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_header(vec!["Rank", "Student ID", "Name", "Total", "Grade"]);
            for (i, grade) in ranked.iter().enumerate() {
                table.add_row(vec![
                    Cell::new(i + 1),
                    Cell::new(&grade.student_id),
                    Cell::new(book.student_name(&grade.student_id)),
                    Cell::new(format!("{:.2}", grade.weighted_total)),
                    Cell::new(grade.letter_grade),
                ]);
            }
            println!("{table}");

            let ungraded = book.roster().len().saturating_sub(ranked.len());
            if ungraded > 0 {
                println!("{ungraded} student(s) without any recorded score.");
            }
        }
    }

    Ok(())
}
