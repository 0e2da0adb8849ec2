//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.feedback-board.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::chart::DEFAULT_PALETTE;
use crate::cli::{Args, OutputFormat, MIN_CHART_SIZE};

/// Report file name used when no output path is configured; the extension
/// follows the output format.
const DEFAULT_OUTPUT_STEM: &str = "feedback_report";

/// File name looked up in the current directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = ".feedback-board.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Ring chart settings.
    #[serde(default)]
    pub chart: ChartConfig,

    /// Course catalog used by the admin view.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Output file path. When unset, `feedback_report.<ext>` for the format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Ring chart settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Chart diameter in pixels.
    #[serde(default = "default_chart_size")]
    pub size: u32,

    /// Caption under the total in the middle of the ring.
    #[serde(default = "default_caption")]
    pub caption: String,

    /// Segment colors. Ignored when shorter than the number of buckets.
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            size: default_chart_size(),
            caption: default_caption(),
            palette: default_palette(),
        }
    }
}

fn default_chart_size() -> u32 {
    160
}

fn default_caption() -> String {
    "responses".to_string()
}

fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()
}

/// One course of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseEntry {
    /// Course name, matched exactly against feedback records.
    pub name: String,
    /// Owning department code.
    #[serde(default)]
    pub department: String,
    /// Instructor students are pointed to by default.
    #[serde(default)]
    pub instructor: String,
}

impl CourseEntry {
    fn new(name: &str, department: &str, instructor: &str) -> Self {
        Self {
            name: name.to_string(),
            department: department.to_string(),
            instructor: instructor.to_string(),
        }
    }
}

/// Course catalog settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Courses listed in the admin view, in display order.
    #[serde(default = "default_courses")]
    pub courses: Vec<CourseEntry>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            courses: default_courses(),
        }
    }
}

fn default_courses() -> Vec<CourseEntry> {
    vec![
        CourseEntry::new("Introduction to Computer Science", "CSE", "Prof. Alice"),
        CourseEntry::new("Data Structures", "CSE", "Prof. Alice"),
        CourseEntry::new("Operating Systems", "CSE", "Dr. Banerjee"),
        CourseEntry::new("Calculus I", "ME", "Dr. Kumar"),
        CourseEntry::new("Physics I", "ME", "Dr. Mehta"),
        CourseEntry::new("Chemistry", "BT", "Dr. Rao"),
        CourseEntry::new("Biology", "BT", "Dr. Sharma"),
        CourseEntry::new("Signals and Systems", "ECE", "Dr. Iyer"),
        CourseEntry::new("Thermodynamics", "ME", "Dr. Singh"),
        CourseEntry::new("Structural Analysis", "CE", "Dr. Gupta"),
        CourseEntry::new("Concrete Technology", "CE", "Dr. Verma"),
        CourseEntry::new("Surveying", "CE", "Dr. Reddy"),
    ]
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Include the user roster in the admin view.
    #[serde(default = "default_true")]
    pub include_roster: bool,

    /// Include the individual responses in the teacher view.
    #[serde(default = "default_true")]
    pub include_responses: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_roster: true,
            include_responses: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load the default configuration file from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(DEFAULT_CONFIG_FILE);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were given explicitly.
    pub fn merge_with_args(&mut self, args: &Args) {
        if let Some(ref output) = args.output {
            self.general.output = Some(output.display().to_string());
        }

        if let Some(size) = args.chart_size {
            self.chart.size = size;
        }

        if args.no_roster {
            self.report.include_roster = false;
        }
        if args.no_responses {
            self.report.include_responses = false;
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Check settings that the file may carry but the CLI would have rejected.
    pub fn validate(&self) -> Result<(), String> {
        if self.chart.size < MIN_CHART_SIZE {
            return Err(format!(
                "Chart size must be at least {} (got {})",
                MIN_CHART_SIZE, self.chart.size
            ));
        }

        Ok(())
    }

    /// Path the report is written to.
    pub fn output_path(&self, format: OutputFormat) -> PathBuf {
        match self.general.output {
            Some(ref output) => PathBuf::from(output),
            None => PathBuf::from(format!("{}.{}", DEFAULT_OUTPUT_STEM, format.extension())),
        }
    }

    /// Returns the log level: ERROR when quiet, DEBUG when verbose.
    pub fn log_level(&self, quiet: bool) -> tracing::Level {
        if quiet {
            tracing::Level::ERROR
        } else if self.general.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.output, None);
        assert_eq!(config.chart.size, 160);
        assert_eq!(config.chart.caption, "responses");
        assert_eq!(config.chart.palette.len(), 5);
        assert_eq!(config.catalog.courses.len(), 12);
        assert_eq!(config.catalog.courses[1].name, "Data Structures");
        assert_eq!(config.catalog.courses[1].instructor, "Prof. Alice");
        assert!(config.report.include_roster);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r##"
[general]
output = "admin.html"
verbose = true

[chart]
size = 200
palette = ["#000000", "#111111", "#222222", "#333333", "#444444"]

[[catalog.courses]]
name = "Compilers"
department = "CSE"

[report]
include_roster = false
"##;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.output.as_deref(), Some("admin.html"));
        assert!(config.general.verbose);
        assert_eq!(config.chart.size, 200);
        assert_eq!(config.chart.caption, "responses");
        assert_eq!(config.chart.palette[4], "#444444");
        assert_eq!(config.catalog.courses.len(), 1);
        assert_eq!(config.catalog.courses[0].instructor, "");
        assert!(!config.report.include_roster);
        assert!(config.report.include_responses);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[chart]"));
        assert!(toml_str.contains("[[catalog.courses]]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.catalog.courses, Config::default().catalog.courses);
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from_dir(dir.path()).unwrap().is_none());

        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "[chart]\ncaption = \"votes\"\n",
        )
        .unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap().unwrap();
        assert_eq!(config.chart.caption, "votes");
    }

    #[test]
    fn test_load_rejects_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[chart\nsize = ").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    fn make_args() -> Args {
        Args {
            data: None,
            view: crate::cli::View::Admin,
            instructor: None,
            user: None,
            output: None,
            format: OutputFormat::Markdown,
            chart_size: None,
            no_roster: false,
            no_responses: false,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_verbose_from_file_raises_log_level() {
        let config: Config = toml::from_str("[general]\nverbose = true\n").unwrap();
        assert_eq!(config.log_level(false), tracing::Level::DEBUG);
        assert_eq!(config.log_level(true), tracing::Level::ERROR);
        assert_eq!(Config::default().log_level(false), tracing::Level::INFO);
    }

    #[test]
    fn test_verbose_flag_merges_into_config() {
        let mut config = Config::default();
        let mut args = make_args();
        args.verbose = true;

        config.merge_with_args(&args);
        assert_eq!(config.log_level(args.quiet), tracing::Level::DEBUG);
    }

    #[test]
    fn test_default_output_follows_format() {
        let config = Config::default();
        assert_eq!(
            config.output_path(OutputFormat::Markdown),
            PathBuf::from("feedback_report.md")
        );
        assert_eq!(
            config.output_path(OutputFormat::Json),
            PathBuf::from("feedback_report.json")
        );
        assert_eq!(
            config.output_path(OutputFormat::Html),
            PathBuf::from("feedback_report.html")
        );
    }

    #[test]
    fn test_explicit_output_wins_over_format() {
        let mut config: Config = toml::from_str("[general]\noutput = \"board.txt\"\n").unwrap();
        assert_eq!(
            config.output_path(OutputFormat::Html),
            PathBuf::from("board.txt")
        );

        let mut args = make_args();
        args.output = Some(PathBuf::from("out/alice.html"));
        config.merge_with_args(&args);
        assert_eq!(
            config.output_path(OutputFormat::Json),
            PathBuf::from("out/alice.html")
        );
    }

    #[test]
    fn test_validate_chart_size_from_file() {
        let config: Config = toml::from_str("[chart]\nsize = 4\n").unwrap();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.chart.size = MIN_CHART_SIZE;
        assert!(config.validate().is_ok());
    }
}
