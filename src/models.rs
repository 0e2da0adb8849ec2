//! Data models for the feedback board.
//!
//! This module contains the core data structures used throughout
//! the application: questions, ratings, feedback records, users,
//! and the role-scoped dashboards built from them.

use crate::chart::RingChart;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// A rating question. The set is closed and its order is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Question {
    TeachingQuality,
    CourseContent,
    Presentation,
    Assessment,
    PracticalRelevance,
    SupportServices,
}

impl Question {
    /// Every question, in display order.
    pub const ALL: [Question; 6] = [
        Question::TeachingQuality,
        Question::CourseContent,
        Question::Presentation,
        Question::Assessment,
        Question::PracticalRelevance,
        Question::SupportServices,
    ];

    /// Wire identifier, as stored on feedback records.
    pub fn id(&self) -> &'static str {
        match self {
            Question::TeachingQuality => "teachingQuality",
            Question::CourseContent => "courseContent",
            Question::Presentation => "presentation",
            Question::Assessment => "assessment",
            Question::PracticalRelevance => "practicalRelevance",
            Question::SupportServices => "supportServices",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Question::TeachingQuality => "Teaching Quality",
            Question::CourseContent => "Course Content",
            Question::Presentation => "Presentation / Clarity",
            Question::Assessment => "Assessment Fairness",
            Question::PracticalRelevance => "Practical Relevance",
            Question::SupportServices => "Support Services",
        }
    }

    /// Look a question up by its wire identifier (exact match).
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.id() == id)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Coerce a raw form value into a numeric rating.
///
/// Numbers pass through and numeric strings are parsed after trimming;
/// `true` counts as 1. Anything else (empty or non-numeric strings, `null`,
/// `false`, arrays, objects, non-finite values) becomes 0, which downstream
/// aggregation treats as "unanswered".
pub fn coerce_rating(raw: &Value) -> f64 {
    let value = match raw {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };

    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Numeric ratings for every question of one record.
///
/// Unanswered questions hold 0. Values are stored as coerced, so an
/// out-of-range answer such as 6 is kept and left for the aggregation
/// functions to interpret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Value>", into = "BTreeMap<String, f64>")]
pub struct Ratings([f64; 6]);

impl Ratings {
    /// Rating for a question (0 when unanswered).
    pub fn get(&self, question: Question) -> f64 {
        self.0[question.index()]
    }

    /// Set the rating for a question.
    pub fn set(&mut self, question: Question, value: f64) {
        self.0[question.index()] = if value.is_finite() { value } else { 0.0 };
    }
}

impl From<BTreeMap<String, Value>> for Ratings {
    fn from(raw: BTreeMap<String, Value>) -> Self {
        let mut ratings = Ratings::default();
        for (key, value) in &raw {
            if let Some(question) = Question::from_id(key) {
                ratings.set(question, coerce_rating(value));
            }
        }
        ratings
    }
}

impl From<Ratings> for BTreeMap<String, f64> {
    fn from(ratings: Ratings) -> Self {
        Question::ALL
            .into_iter()
            .map(|q| (q.id().to_string(), ratings.get(q)))
            .collect()
    }
}

fn anonymous() -> String {
    "anonymous".to_string()
}

/// One student's submitted feedback for a course and instructor.
///
/// Records are immutable once they enter the [`crate::state::FeedbackLog`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    /// Student display name (informational only).
    #[serde(default)]
    pub student_name: String,
    /// Student identifier (informational only).
    #[serde(default)]
    pub student_id: String,
    /// Course name. Must be non-empty.
    #[serde(default)]
    pub course: String,
    /// Instructor display name; the join key to a teacher account.
    #[serde(default)]
    pub instructor: String,
    /// Ratings per question, flattened onto the record on the wire.
    #[serde(flatten)]
    pub ratings: Ratings,
    /// Free-text comments.
    #[serde(default)]
    pub comments: String,
    /// Username of the submitter, or "anonymous".
    #[serde(rename = "_submittedBy", alias = "submittedBy", default = "anonymous")]
    pub submitted_by: String,
    /// Creation timestamp.
    #[serde(rename = "_submittedAt", alias = "submittedAt")]
    pub submitted_at: DateTime<Utc>,
}

impl FeedbackRecord {
    /// Name shown for the respondent: student name, else student id, else submitter.
    pub fn respondent(&self) -> &str {
        [&self.student_name, &self.student_id, &self.submitted_by]
            .into_iter()
            .find(|s| !s.is_empty())
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Role of a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Teacher => write!(f, "teacher"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// A roster entry. Credentials are not modeled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Login name.
    pub username: String,
    /// Display name.
    #[serde(default)]
    pub full_name: String,
    /// Role of the account.
    pub role: Role,
    /// Student identifier (students only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    /// Name students select when submitting feedback (teachers only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor_name: Option<String>,
    /// Department code (students only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl UserProfile {
    /// The string feedback records must carry in `instructor` to belong to this user.
    pub fn instructor_identity(&self) -> &str {
        self.instructor_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| Some(self.full_name.as_str()).filter(|s| !s.is_empty()))
            .unwrap_or(self.username.as_str())
    }

    /// Student id or instructor name, with the department appended when known.
    pub fn details(&self) -> String {
        let primary = self
            .student_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.instructor_name.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or("—");

        match self.department.as_deref().filter(|s| !s.is_empty()) {
            Some(dept) => format!("{} | {}", primary, dept),
            None => primary.to_string(),
        }
    }
}

/// Counts of ratings 1 through 5 for one question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingHistogram(pub [u32; 5]);

impl RatingHistogram {
    /// Count one rating. Only integers 1..=5 land in a bucket.
    pub fn record(&mut self, rating: f64) {
        if rating.fract() == 0.0 && (1.0..=5.0).contains(&rating) {
            self.0[rating as usize - 1] += 1;
        }
    }

    /// Bucket counts, index *i* holding rating *i + 1*.
    pub fn counts(&self) -> &[u32; 5] {
        &self.0
    }

    /// Number of counted ratings.
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }
}

/// Global mean for one question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionAverage {
    pub question: Question,
    pub label: String,
    /// Mean rating, rounded to 2 decimals.
    pub average: f64,
}

/// Number of submissions for one catalog course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseCount {
    pub course: String,
    pub department: String,
    pub instructor: String,
    pub responses: usize,
}

/// Global aggregates shown to admins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminDashboard {
    pub generated_at: DateTime<Utc>,
    pub total_feedback: usize,
    pub averages: Vec<QuestionAverage>,
    pub courses: Vec<CourseCount>,
    /// Empty when the roster is excluded by configuration.
    pub roster: Vec<UserProfile>,
}

/// Rating distribution of one question, with its chart geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionDistribution {
    pub question: Question,
    pub label: String,
    pub histogram: RatingHistogram,
    pub chart: RingChart,
}

/// Per-instructor view shown to teachers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherDashboard {
    pub generated_at: DateTime<Utc>,
    pub instructor: String,
    pub total_responses: usize,
    pub distributions: Vec<QuestionDistribution>,
    /// Empty when responses are excluded by configuration.
    pub responses: Vec<FeedbackRecord>,
}

/// A role-scoped dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum Dashboard {
    Admin(AdminDashboard),
    Teacher(TeacherDashboard),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_question_ids_round_trip() {
        for q in Question::ALL {
            assert_eq!(Question::from_id(q.id()), Some(q));
        }
        assert_eq!(Question::from_id("TeachingQuality"), None);
    }

    #[test]
    fn test_question_serde_uses_wire_id() {
        let json = serde_json::to_string(&Question::PracticalRelevance).unwrap();
        assert_eq!(json, "\"practicalRelevance\"");
    }

    #[test]
    fn test_coerce_rating() {
        assert_eq!(coerce_rating(&json!(4)), 4.0);
        assert_eq!(coerce_rating(&json!("3")), 3.0);
        assert_eq!(coerce_rating(&json!(" 5 ")), 5.0);
        assert_eq!(coerce_rating(&json!(4.5)), 4.5);
        assert_eq!(coerce_rating(&json!(true)), 1.0);
        assert_eq!(coerce_rating(&json!("")), 0.0);
        assert_eq!(coerce_rating(&json!("great")), 0.0);
        assert_eq!(coerce_rating(&json!(null)), 0.0);
        assert_eq!(coerce_rating(&json!(false)), 0.0);
        assert_eq!(coerce_rating(&json!([5])), 0.0);
        assert_eq!(coerce_rating(&json!("inf")), 0.0);
    }

    #[test]
    fn test_record_deserializes_flat_ratings() {
        let record: FeedbackRecord = serde_json::from_value(json!({
            "studentName": "Demo Student",
            "studentId": "S100",
            "course": "Data Structures",
            "instructor": "Prof. Alice",
            "teachingQuality": "5",
            "courseContent": 4,
            "presentation": "",
            "unknownQuestion": 3,
            "comments": "Good pace",
            "_submittedBy": "student",
            "_submittedAt": "2024-03-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(record.ratings.get(Question::TeachingQuality), 5.0);
        assert_eq!(record.ratings.get(Question::CourseContent), 4.0);
        assert_eq!(record.ratings.get(Question::Presentation), 0.0);
        assert_eq!(record.ratings.get(Question::SupportServices), 0.0);
        assert_eq!(record.submitted_by, "student");
    }

    #[test]
    fn test_record_defaults_and_aliases() {
        let record: FeedbackRecord = serde_json::from_value(json!({
            "course": "Biology",
            "instructor": "Dr. Sharma",
            "submittedAt": "2024-03-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(record.submitted_by, "anonymous");
        assert_eq!(record.respondent(), "anonymous");
        assert!(record.comments.is_empty());
    }

    #[test]
    fn test_record_serializes_every_question() {
        let record: FeedbackRecord = serde_json::from_value(json!({
            "course": "Biology",
            "instructor": "Dr. Sharma",
            "assessment": 2,
            "_submittedAt": "2024-03-01T10:00:00Z"
        }))
        .unwrap();

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["assessment"], json!(2.0));
        assert_eq!(value["supportServices"], json!(0.0));
        assert_eq!(value["_submittedBy"], json!("anonymous"));
    }

    #[test]
    fn test_instructor_identity_fallbacks() {
        let mut user = UserProfile {
            username: "teacher".to_string(),
            full_name: "Alice Smith".to_string(),
            role: Role::Teacher,
            student_id: None,
            instructor_name: Some("Prof. Alice".to_string()),
            department: None,
        };
        assert_eq!(user.instructor_identity(), "Prof. Alice");

        user.instructor_name = Some(String::new());
        assert_eq!(user.instructor_identity(), "Alice Smith");

        user.full_name.clear();
        assert_eq!(user.instructor_identity(), "teacher");
    }

    #[test]
    fn test_user_details() {
        let student = UserProfile {
            username: "student".to_string(),
            full_name: "Demo Student".to_string(),
            role: Role::Student,
            student_id: Some("S100".to_string()),
            instructor_name: None,
            department: Some("CSE".to_string()),
        };
        assert_eq!(student.details(), "S100 | CSE");

        let admin = UserProfile {
            username: "admin".to_string(),
            full_name: "Administrator".to_string(),
            role: Role::Admin,
            student_id: None,
            instructor_name: None,
            department: None,
        };
        assert_eq!(admin.details(), "—");
    }

    #[test]
    fn test_histogram_record_drops_out_of_range() {
        let mut histogram = RatingHistogram::default();
        for rating in [5.0, 0.0, 6.0, 3.0, 4.5, -1.0, 1.0] {
            histogram.record(rating);
        }
        assert_eq!(histogram.counts(), &[1, 0, 1, 0, 1]);
        assert_eq!(histogram.total(), 3);
    }

    #[test]
    fn test_dashboard_tagged_by_view() {
        let dashboard = Dashboard::Admin(AdminDashboard {
            generated_at: Utc::now(),
            total_feedback: 0,
            averages: Vec::new(),
            courses: Vec::new(),
            roster: Vec::new(),
        });
        let value = serde_json::to_value(&dashboard).unwrap();
        assert_eq!(value["view"], json!("admin"));
    }
}
