//! The `gradebook report` command.

use std::path::PathBuf;

use anyhow::Result;

use gradebook_core::report::CourseReport;

use super::Session;

pub fn execute(
    gradebook_path: PathBuf,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let session = Session::open(&gradebook_path, config_path.as_deref())?;
    let report = CourseReport::build(&session.book, &session.config.detector);

    tracing::info!(
        "built report for {}: {} ranked, {} flagged",
        report.course.code,
        report.rankings.len(),
        report.outliers.len()
    );

    match output {
        Some(path) => {
            report.save_json(&path)?;
            eprintln!("Report saved to: {}", path.display());
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
