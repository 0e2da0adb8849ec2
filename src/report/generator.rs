//! Markdown and JSON report generation.
//!
//! This module renders a role-scoped dashboard as a Markdown document or
//! as pretty-printed JSON.

use crate::models::{
    AdminDashboard, Dashboard, FeedbackRecord, Question, QuestionDistribution, TeacherDashboard,
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::Path;

/// Format a stored rating for tables: "—" when unanswered.
pub fn format_rating(value: f64) -> String {
    if value == 0.0 {
        "—".to_string()
    } else {
        value.to_string()
    }
}

/// Format a timestamp for report tables.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Make free text safe inside a Markdown table cell.
fn table_cell(text: &str) -> String {
    if text.is_empty() {
        return "—".to_string();
    }
    text.replace('|', "\\|").replace('\n', " ")
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(dashboard: &Dashboard) -> String {
    let mut output = match dashboard {
        Dashboard::Admin(admin) => generate_admin_markdown(admin),
        Dashboard::Teacher(teacher) => generate_teacher_markdown(teacher),
    };

    output.push_str(&generate_footer());
    output
}

fn generate_admin_markdown(dashboard: &AdminDashboard) -> String {
    let mut output = String::new();

    output.push_str("# Feedback Report: Admin Dashboard\n\n");

    output.push_str("## Metadata\n\n");
    output.push_str(&format!(
        "- **Generated:** {}\n",
        dashboard.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!(
        "- **Total Feedback:** {}\n\n",
        dashboard.total_feedback
    ));

    output.push_str("## Average Ratings\n\n");
    output.push_str("| Question | Average |\n");
    output.push_str("|:---|:---:|\n");
    for avg in &dashboard.averages {
        output.push_str(&format!("| {} | {:.2} |\n", avg.label, avg.average));
    }
    output.push('\n');

    output.push_str("## Feedback by Course\n\n");
    output.push_str("| Course | Department | Instructor | Responses |\n");
    output.push_str("|:---|:---:|:---|:---:|\n");
    for course in &dashboard.courses {
        output.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            table_cell(&course.course),
            table_cell(&course.department),
            table_cell(&course.instructor),
            course.responses
        ));
    }
    output.push('\n');

    if !dashboard.roster.is_empty() {
        output.push_str("## Registered Users\n\n");
        output.push_str("| Username | Full Name | Role | Student ID / Instructor Name / Department |\n");
        output.push_str("|:---|:---|:---:|:---|\n");
        for user in &dashboard.roster {
            output.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                table_cell(&user.username),
                table_cell(&user.full_name),
                user.role,
                table_cell(&user.details())
            ));
        }
        output.push('\n');
    }

    output
}

fn generate_teacher_markdown(dashboard: &TeacherDashboard) -> String {
    let mut output = String::new();

    output.push_str("# Feedback Report: Teacher Dashboard\n\n");

    output.push_str("## Metadata\n\n");
    output.push_str(&format!("- **Instructor:** {}\n", dashboard.instructor));
    output.push_str(&format!(
        "- **Generated:** {}\n",
        dashboard.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!(
        "- **Total Responses:** {}\n\n",
        dashboard.total_responses
    ));

    if dashboard.total_responses == 0 {
        output.push_str("No feedback for this instructor yet.\n\n");
        return output;
    }

    output.push_str("## Rating Distributions\n\n");
    for distribution in &dashboard.distributions {
        output.push_str(&generate_distribution_block(distribution));
    }

    if !dashboard.responses.is_empty() {
        output.push_str(&generate_responses_section(&dashboard.responses));
    }

    output
}

/// Histogram table for one question, with legend percentages.
fn generate_distribution_block(distribution: &QuestionDistribution) -> String {
    let mut block = String::new();

    block.push_str(&format!("### {}\n\n", distribution.label));
    block.push_str("| Rating | Count | Share |\n");
    block.push_str("|:---:|:---:|:---:|\n");
    for entry in &distribution.chart.legend {
        block.push_str(&format!(
            "| {} | {} | {}% |\n",
            entry.label, entry.value, entry.percent
        ));
    }
    block.push_str(&format!(
        "\n*{} rated responses*\n\n",
        distribution.chart.total
    ));

    block
}

fn generate_responses_section(responses: &[FeedbackRecord]) -> String {
    let mut section = String::new();

    section.push_str("## Responses\n\n");

    section.push_str("| Date | Student | Course |");
    for question in Question::ALL {
        section.push_str(&format!(" {} |", question.label()));
    }
    section.push_str(" Comments |\n");

    section.push_str("|:---|:---|:---|");
    for _ in Question::ALL {
        section.push_str(":---:|");
    }
    section.push_str(":---|\n");

    for record in responses {
        section.push_str(&format!(
            "| {} | {} | {} |",
            format_timestamp(&record.submitted_at),
            table_cell(record.respondent()),
            table_cell(&record.course)
        ));
        for question in Question::ALL {
            section.push_str(&format!(" {} |", format_rating(record.ratings.get(question))));
        }
        section.push_str(&format!(" {} |\n", table_cell(&record.comments)));
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    "---\n\n*Report generated by feedback-board*\n".to_string()
}

/// Generate a JSON report.
pub fn generate_json_report(dashboard: &Dashboard) -> Result<String> {
    serde_json::to_string_pretty(dashboard).map_err(Into::into)
}

/// Write report content to a file, creating parent directories.
pub fn write_report(content: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write report to {}", path.display()))
}
