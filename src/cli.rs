//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// Smallest chart diameter that still leaves room for the ring and its label.
pub const MIN_CHART_SIZE: u32 = 24;

/// Feedback Board - student feedback dashboards
///
/// Reduce a feedback snapshot into the admin view (global averages,
/// per-course counts, user roster) or a teacher view (rating
/// distributions as ring charts, individual responses).
///
/// Examples:
///   feedback-board --data feedback.json
///   feedback-board --data feedback.json --view teacher --user teacher --format html -o alice.html
///   feedback-board --data feedback.json --view teacher --instructor "Dr. Banerjee" --format json
///   feedback-board --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// JSON snapshot with `users` and `feedback`
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "FEEDBACK_BOARD_DATA",
        required_unless_present = "init_config"
    )]
    pub data: Option<PathBuf>,

    /// Dashboard to render
    #[arg(long, default_value = "admin", value_name = "VIEW")]
    pub view: View,

    /// Instructor name to report on (teacher view)
    #[arg(long, value_name = "NAME", conflicts_with = "user")]
    pub instructor: Option<String>,

    /// Teacher username whose instructor name is used (teacher view)
    #[arg(short, long, value_name = "USERNAME")]
    pub user: Option<String>,

    /// Output file path for the report
    ///
    /// Defaults to the configured output, feedback_report.<md|json|html> otherwise
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json, html)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Ring chart diameter in pixels
    #[arg(long, value_name = "PX")]
    pub chart_size: Option<u32>,

    /// Leave the user roster out of the admin view
    #[arg(long)]
    pub no_roster: bool,

    /// Leave individual responses out of the teacher view
    #[arg(long)]
    pub no_responses: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .feedback-board.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .feedback-board.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Which dashboard to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum View {
    /// Global averages, course counts, and roster
    #[default]
    Admin,
    /// Rating distributions for one instructor
    Teacher,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
    /// Self-contained HTML page with SVG charts
    Html,
}

impl OutputFormat {
    /// File extension for reports in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
            OutputFormat::Html => "html",
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(size) = self.chart_size {
            if size < MIN_CHART_SIZE {
                return Err(format!("Chart size must be at least {}", MIN_CHART_SIZE));
            }
        }

        if self.view == View::Teacher && self.instructor.is_none() && self.user.is_none() {
            return Err("Teacher view needs --instructor or --user".to_string());
        }

        if let Some(ref data) = self.data {
            if !data.exists() {
                return Err(format!("Data file does not exist: {}", data.display()));
            }
            if !data.is_file() {
                return Err(format!("Data path is not a file: {}", data.display()));
            }
        }

        Ok(())
    }
}
