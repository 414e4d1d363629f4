//! Subcommand implementations.

use std::path::Path;

use anyhow::Result;

use gradebook_core::parser::parse_gradebook;
use gradebook_core::snapshot::Gradebook;

use crate::config::{load_config_from, GradebookConfig, OutputFormat};

pub mod init;
pub mod outliers;
pub mod rank;
pub mod report;
pub mod stats;
pub mod validate;

/// A parsed gradebook together with the loaded configuration.
pub struct Session {
    pub book: Gradebook,
    pub config: GradebookConfig,
}

impl Session {
    pub fn open(gradebook_path: &Path, config_path: Option<&Path>) -> Result<Self> {
        let config = load_config_from(config_path)?;
        let book = parse_gradebook(gradebook_path)?;

        tracing::debug!(
            "loaded {} ({} students, {} assignments)",
            book.course().code,
            book.roster().len(),
            book.assignment_list().len()
        );

        Ok(Self { book, config })
    }

    /// Output format for commands that render text or JSON.
    pub fn format(&self, requested: Option<&str>) -> Result<OutputFormat> {
        self.config.output_format(requested)
    }
}
