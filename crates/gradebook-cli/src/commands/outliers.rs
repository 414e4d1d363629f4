//! The `gradebook outliers` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use gradebook_core::detector::detect_course;

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
    let outliers = detect_course(book, &session.config.detector);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&outliers)?);
        }
        OutputFormat::Text => {
            if outliers.is_empty() {
                println!("No outliers detected.");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_header(vec!["Student ID", "Name", "Assignment", "Score", "Reason"]);
            for outlier in &outliers {
                let score = match outlier.score {
                    Some(score) => format!("{score}/{}", outlier.max_score),
                    None => "MISSING".to_string(),
                };
                table.add_row(vec![
                    Cell::new(&outlier.student_id),
                    Cell::new(book.student_name(&outlier.student_id)),
                    Cell::new(&outlier.assignment),
                    Cell::new(score),
                    Cell::new(&outlier.reason),
                ]);
            }
            println!("{table}");

            let missing = outliers.iter().filter(|o| o.is_missing()).count();
            println!(
                "\n{} outlier(s) flagged ({} missing, {} suspicious)",
                outliers.len(),
                missing,
                outliers.len() - missing
            );
        }
    }

    Ok(())
}
