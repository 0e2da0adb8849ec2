//! Feedback Board - student feedback dashboards
//!
//! A CLI tool that reduces a student feedback snapshot into role-scoped
//! dashboards and renders rating distributions as SVG ring charts.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (invalid arguments, unreadable data or config, unknown user, etc.)

mod analysis;
mod chart;
mod cli;
mod config;
mod error;
mod models;
mod report;
mod state;

use anyhow::{Context, Result};
use cli::{Args, OutputFormat, View};
use config::{Config, DEFAULT_CONFIG_FILE};
use models::Dashboard;
use state::AppState;
use std::path::Path;
use tracing::{debug, error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Load configuration before logging so the file can raise verbosity
    let config = match load_config(&args) {
        Ok(mut config) => {
            config.merge_with_args(&args);
            config
        }
        Err(e) => {
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Initialize logging
    init_logging(config.log_level(args.quiet));

    info!("Feedback Board v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    debug!("Config: {:?}", config);

    if let Err(e) = run(&args, &config) {
        error!("Report failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .feedback-board.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", DEFAULT_CONFIG_FILE);
    println!("   Edit it to customize the chart, course catalog, and report sections.");
    Ok(())
}

/// Initialize logging at the given level.
fn init_logging(level: Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: failed to set tracing subscriber: {}", e);
    }
}

/// Load the data, build the requested dashboard, and write the report.
fn run(args: &Args, config: &Config) -> Result<()> {
    let data_path = args
        .data
        .as_deref()
        .context("No data file given (use --data)")?;
    let state = AppState::load(data_path)?;

    if state.feedback.is_empty() {
        warn!("No feedback records in {}", data_path.display());
    }

    let dashboard = build_dashboard(args, &state, config)?;

    let output = match args.format {
        OutputFormat::Markdown => report::generate_markdown_report(&dashboard),
        OutputFormat::Json => report::generate_json_report(&dashboard)?,
        OutputFormat::Html => report::generate_html_report(&dashboard, &config.chart.caption),
    };

    let output_path = config.output_path(args.format);
    report::write_report(&output, &output_path)?;

    if !args.quiet {
        print_summary(&dashboard);
        println!("\n✅ Report saved to: {}", output_path.display());
    }

    Ok(())
}

/// Build the dashboard for the requested view.
fn build_dashboard(args: &Args, state: &AppState, config: &Config) -> Result<Dashboard> {
    match args.view {
        View::Admin => Ok(Dashboard::Admin(analysis::admin_dashboard(state, config))),
        View::Teacher => {
            let identity = match (&args.instructor, &args.user) {
                (Some(name), _) => name.clone(),
                (None, Some(username)) => state.teacher_identity(username)?.to_string(),
                (None, None) => anyhow::bail!("Teacher view needs --instructor or --user"),
            };
            info!("Building teacher dashboard for '{}'", identity);
            Ok(Dashboard::Teacher(analysis::teacher_dashboard(
                state, &identity, config,
            )))
        }
    }
}

/// Print a short console summary of the dashboard.
fn print_summary(dashboard: &Dashboard) {
    match dashboard {
        Dashboard::Admin(admin) => {
            println!("\n📊 Admin Summary:");
            println!("   Total feedback: {}", admin.total_feedback);
            for avg in &admin.averages {
                println!("   - {}: {:.2}", avg.label, avg.average);
            }
        }
        Dashboard::Teacher(teacher) => {
            println!("\n📊 Feedback for {}:", teacher.instructor);
            println!("   Total responses: {}", teacher.total_responses);
            for distribution in &teacher.distributions {
                println!(
                    "   - {}: {:?} ({} rated)",
                    distribution.label,
                    distribution.histogram.counts(),
                    distribution.histogram.total()
                );
            }
        }
    }
}

/// Load configuration from file or use defaults.
///
/// Runs before logging is set up, so problems with the default file are
/// reported on stderr.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok(config),
        Ok(None) => Ok(Config::default()),
        Err(e) => {
            eprintln!("⚠️  Ignoring {}: {:#}", DEFAULT_CONFIG_FILE, e);
            Ok(Config::default())
        }
    }
}
