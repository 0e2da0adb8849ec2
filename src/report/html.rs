//! HTML report generator.
//!
//! Produces a self-contained HTML page with the CSS and the ring charts
//! inlined.

use super::generator::{format_rating, format_timestamp};
use crate::chart::{escape, render_legend, render_svg};
use crate::models::{AdminDashboard, Dashboard, Question, TeacherDashboard};

/// Generate an HTML report. `caption` is printed under the total in each ring.
pub fn generate_html_report(dashboard: &Dashboard, caption: &str) -> String {
    let title = match dashboard {
        Dashboard::Admin(_) => "Admin Dashboard".to_string(),
        Dashboard::Teacher(t) => format!("Teacher Dashboard: {}", t.instructor),
    };

    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>Feedback report: {}</title>\n", escape(&title)));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str(&format!("<header>\n<h1>{}</h1>\n", escape(&title)));

    match dashboard {
        Dashboard::Admin(admin) => html.push_str(&admin_body(admin)),
        Dashboard::Teacher(teacher) => html.push_str(&teacher_body(teacher, caption)),
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn admin_body(dashboard: &AdminDashboard) -> String {
    let mut html = String::new();

    html.push_str(&format!(
        "<p class=\"meta\">Total feedback: <strong>{}</strong> | {}</p>\n</header>\n",
        dashboard.total_feedback,
        dashboard.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    html.push_str("<section class=\"stats\">\n<h2>Average Ratings</h2>\n");
    for avg in &dashboard.averages {
        html.push_str(&format!(
            "<p>Average {}: <strong>{:.2}</strong></p>\n",
            escape(&avg.label),
            avg.average
        ));
    }
    html.push_str("</section>\n");

    html.push_str("<section>\n<h2>Feedback by Course</h2>\n<table>\n");
    html.push_str("<thead><tr><th>Course</th><th>Department</th><th>Instructor</th><th>Responses</th></tr></thead>\n<tbody>\n");
    for course in &dashboard.courses {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&course.course),
            escape(&course.department),
            escape(&course.instructor),
            course.responses
        ));
    }
    html.push_str("</tbody></table>\n</section>\n");

    if !dashboard.roster.is_empty() {
        html.push_str("<section>\n<h2>Registered Users</h2>\n<table>\n");
        html.push_str("<thead><tr><th>Username</th><th>Full Name</th><th>Role</th><th>Student ID / Instructor Name / Department</th></tr></thead>\n<tbody>\n");
        for user in &dashboard.roster {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(&user.username),
                escape(&user.full_name),
                user.role,
                escape(&user.details())
            ));
        }
        html.push_str("</tbody></table>\n</section>\n");
    }

    html
}

fn teacher_body(dashboard: &TeacherDashboard, caption: &str) -> String {
    let mut html = String::new();

    html.push_str(&format!(
        "<p class=\"meta\">Total responses: <strong>{}</strong> | {}</p>\n</header>\n",
        dashboard.total_responses,
        dashboard.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    if dashboard.total_responses == 0 {
        html.push_str("<p>No feedback for this instructor yet.</p>\n");
        return html;
    }

    html.push_str("<section class=\"charts\">\n");
    for distribution in &dashboard.distributions {
        html.push_str("<div class=\"chart-card\">\n");
        html.push_str(&format!(
            "<div class=\"chart-title\">{}</div>\n",
            escape(&distribution.label)
        ));
        html.push_str("<div class=\"chart-body\">\n");
        html.push_str(&render_svg(&distribution.chart, caption));
        html.push_str(&render_legend(&distribution.chart));
        html.push_str("</div>\n</div>\n");
    }
    html.push_str("</section>\n");

    if !dashboard.responses.is_empty() {
        html.push_str("<section>\n<h2>Responses</h2>\n<table>\n<thead><tr><th>Date</th><th>Student</th><th>Course</th>");
        for question in Question::ALL {
            html.push_str(&format!("<th>{}</th>", escape(question.label())));
        }
        html.push_str("<th>Comments</th></tr></thead>\n<tbody>\n");

        for record in &dashboard.responses {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td>",
                format_timestamp(&record.submitted_at),
                escape(record.respondent()),
                escape(&record.course)
            ));
            for question in Question::ALL {
                html.push_str(&format!(
                    "<td>{}</td>",
                    format_rating(record.ratings.get(question))
                ));
            }
            let comments = if record.comments.is_empty() {
                "—".to_string()
            } else {
                escape(&record.comments)
            };
            html.push_str(&format!("<td>{}</td></tr>\n", comments));
        }
        html.push_str("</tbody></table>\n</section>\n");
    }

    html
}

const CSS: &str = r#"
:root { --bg: #f8fafc; --fg: #0f172a; --muted: #6b7280; --border: #e5e7eb; --card: #fff; }
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 1.5rem; }
.meta { color: var(--muted); }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; background: var(--card); }
th, td { border: 1px solid var(--border); padding: 0.5rem 0.75rem; text-align: left; font-size: 0.9rem; }
th { background: #eef2ff; }
.charts { display: grid; grid-template-columns: repeat(auto-fit, minmax(320px, 1fr)); gap: 16px; }
.chart-card { background: var(--card); padding: 12px; border-radius: 10px; box-shadow: 0 6px 16px rgba(15, 23, 42, 0.04); }
.chart-title { font-weight: 700; margin-bottom: 10px; }
.chart-body { display: flex; gap: 12px; align-items: center; flex-wrap: wrap; }
.legend { list-style: none; margin: 0; padding: 0; min-width: 120px; }
.legend li { display: flex; align-items: center; gap: 8px; margin-bottom: 6px; font-size: 13px; }
.legend .swatch { width: 14px; height: 14px; display: inline-block; border-radius: 3px; }
.legend .value { margin-left: auto; color: #374151; }
"#;
