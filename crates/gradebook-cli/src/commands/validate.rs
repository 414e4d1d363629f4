//! The `gradebook validate` command.

use std::path::PathBuf;

use anyhow::Result;

use gradebook_core::parser::{load_gradebook_directory, parse_gradebook, validate_gradebook};

pub fn execute(gradebook_path: PathBuf) -> Result<()> {
    let books = if gradebook_path.is_dir() {
        load_gradebook_directory(&gradebook_path)?
    } else {
        vec![parse_gradebook(&gradebook_path)?]
    };

    let mut total_warnings = 0;

    for book in &books {
        let course = book.course();
        println!(
            "Gradebook: {} [{}] ({} students, {} assignments, {} scores)",
            course.name,
            course.code,
            book.roster().len(),
            book.assignment_list().len(),
            book.score_records().len()
        );

        let warnings = validate_gradebook(book);
        for w in &warnings {
            let prefix = w
                .subject
                .as_ref()
                .map(|s| format!("  [{s}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All gradebooks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
