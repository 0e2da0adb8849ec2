//! Role-scoped dashboards.
//!
//! Builds the admin and teacher views from a snapshot of the application
//! state. The state is only read.

use chrono::Utc;
use tracing::debug;

use super::aggregator::{build_histogram, count_by_course, filter_by_instructor, question_averages};
use crate::chart::RingChart;
use crate::config::Config;
use crate::models::{
    AdminDashboard, CourseCount, Question, QuestionDistribution, TeacherDashboard,
};
use crate::state::AppState;

/// Legend labels for the five rating buckets.
const RATING_LABELS: [&str; 5] = ["1", "2", "3", "4", "5"];

/// Global aggregates: averages, per-course counts, and the roster.
pub fn admin_dashboard(state: &AppState, config: &Config) -> AdminDashboard {
    let records = state.feedback.records();

    let courses = config
        .catalog
        .courses
        .iter()
        .map(|entry| CourseCount {
            course: entry.name.clone(),
            department: entry.department.clone(),
            instructor: entry.instructor.clone(),
            responses: count_by_course(records, &entry.name),
        })
        .collect();

    let roster = if config.report.include_roster {
        state.users.clone()
    } else {
        Vec::new()
    };

    AdminDashboard {
        generated_at: Utc::now(),
        total_feedback: records.len(),
        averages: question_averages(records),
        courses,
        roster,
    }
}

/// Rating distributions and responses for one instructor identity.
pub fn teacher_dashboard(state: &AppState, instructor: &str, config: &Config) -> TeacherDashboard {
    let records = filter_by_instructor(state.feedback.records(), instructor);
    debug!("{} records match instructor '{}'", records.len(), instructor);

    let labels: Vec<String> = RATING_LABELS.iter().map(|l| l.to_string()).collect();

    let distributions = Question::ALL
        .into_iter()
        .map(|question| {
            let histogram = build_histogram(records.iter().copied(), question);
            let chart = RingChart::compute(
                histogram.counts(),
                &labels,
                config.chart.size,
                Some(config.chart.palette.as_slice()),
            );
            QuestionDistribution {
                question,
                label: question.label().to_string(),
                histogram,
                chart,
            }
        })
        .collect();

    let responses = if config.report.include_responses {
        records.iter().map(|&r| r.clone()).collect()
    } else {
        Vec::new()
    };

    TeacherDashboard {
        generated_at: Utc::now(),
        instructor: instructor.to_string(),
        total_responses: records.len(),
        distributions,
        responses,
    }
}
