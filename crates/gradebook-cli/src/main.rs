//! gradebook CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

#[derive(Parser)]
#[command(
    name = "gradebook",
    version,
    about = "Grade aggregator and outlier detector"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank students by weighted final grade
    Rank {
        /// Path to a .toml gradebook
        #[arg(long)]
        gradebook: PathBuf,

        /// Output format: text, json
        #[arg(long)]
        format: Option<String>,
    },

    /// Flag missing grades and suspicious scores
    Outliers {
        /// Path to a .toml gradebook
        #[arg(long)]
        gradebook: PathBuf,

        /// Output format: text, json
        #[arg(long)]
        format: Option<String>,
    },

    /// Show course or assignment statistics
    Stats {
        /// Path to a .toml gradebook
        #[arg(long)]
        gradebook: PathBuf,

        /// Restrict to a single assignment
        #[arg(long)]
        assignment: Option<String>,

        /// Output format: text, json
        #[arg(long)]
        format: Option<String>,
    },

    /// Build a full JSON course report
    Report {
        /// Path to a .toml gradebook
        #[arg(long)]
        gradebook: PathBuf,

        /// Write the report here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate gradebook TOML files
    Validate {
        /// Path to gradebook file or directory
        #[arg(long)]
        gradebook: PathBuf,
    },

    /// Create starter config and example gradebook
    Init,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("gradebook=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config;

    let result = match cli.command {
        Commands::Rank { gradebook, format } => {
            commands::rank::execute(gradebook, format, config_path)
        }
        Commands::Outliers { gradebook, format } => {
            commands::outliers::execute(gradebook, format, config_path)
        }
        Commands::Stats {
            gradebook,
            assignment,
            format,
        } => commands::stats::execute(gradebook, assignment, format, config_path),
        Commands::Report { gradebook, output } => {
            commands::report::execute(gradebook, output, config_path)
        }
        Commands::Validate { gradebook } => commands::validate::execute(gradebook),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
