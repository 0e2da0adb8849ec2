//! Application state: the user roster and the feedback log.
//!
//! The state is loaded from a JSON snapshot and handed by reference to the
//! aggregation functions, which never mutate it.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

use crate::error::FeedbackError;
use crate::models::{FeedbackRecord, Role, UserProfile};

/// Append-only collection of submitted feedback.
#[derive(Debug, Clone, Default)]
pub struct FeedbackLog {
    records: Vec<FeedbackRecord>,
}

impl FeedbackLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. Course and instructor must be non-empty.
    pub fn append(&mut self, record: FeedbackRecord) -> Result<(), FeedbackError> {
        if record.course.is_empty() {
            return Err(FeedbackError::MissingCourse);
        }
        if record.instructor.is_empty() {
            return Err(FeedbackError::MissingInstructor);
        }

        debug!(
            "Appending feedback for {} / {}",
            record.course, record.instructor
        );
        self.records.push(record);
        Ok(())
    }

    /// All records in submission order.
    pub fn records(&self) -> &[FeedbackRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// On-disk snapshot shape.
#[derive(Debug, Deserialize)]
struct Snapshot {
    #[serde(default)]
    users: Vec<UserProfile>,
    #[serde(default, alias = "feedbacks")]
    feedback: Vec<Value>,
}

/// Everything the dashboards read.
#[derive(Debug, Clone)]
pub struct AppState {
    pub users: Vec<UserProfile>,
    pub feedback: FeedbackLog,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            users: demo_users(),
            feedback: FeedbackLog::new(),
        }
    }
}

impl AppState {
    /// Load a snapshot file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read data file: {}", path.display()))?;

        let state = Self::from_json(&content)
            .with_context(|| format!("Failed to load data file: {}", path.display()))?;

        info!(
            "Loaded {} users and {} feedback records from {}",
            state.users.len(),
            state.feedback.len(),
            path.display()
        );
        Ok(state)
    }

    /// Build the state from snapshot JSON.
    ///
    /// Records are decoded one by one and go through [`FeedbackLog::append`],
    /// so a bad record is reported with its position. `_submittedAt` is
    /// required on every record. An empty roster is replaced by the demo
    /// accounts.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(json).context("Invalid snapshot JSON")?;

        let mut feedback = FeedbackLog::new();
        for (index, raw) in snapshot.feedback.into_iter().enumerate() {
            serde_json::from_value::<FeedbackRecord>(raw)
                .map_err(FeedbackError::from)
                .and_then(|record| feedback.append(record))
                .map_err(|e| FeedbackError::InvalidRecord {
                    index,
                    source: Box::new(e),
                })?;
        }

        let users = if snapshot.users.is_empty() {
            debug!("Snapshot has no users, using demo roster");
            demo_users()
        } else {
            snapshot.users
        };

        Ok(Self { users, feedback })
    }

    /// Look a user up by username (exact match).
    pub fn find_user(&self, username: &str) -> Option<&UserProfile> {
        self.users.iter().find(|u| u.username == username)
    }

    /// Resolve a teacher account to the identity its feedback is filed under.
    pub fn teacher_identity(&self, username: &str) -> Result<&str, FeedbackError> {
        let user = self
            .find_user(username)
            .ok_or_else(|| FeedbackError::UnknownUser(username.to_string()))?;

        if user.role != Role::Teacher {
            return Err(FeedbackError::NotATeacher {
                username: username.to_string(),
                role: user.role.to_string(),
            });
        }

        Ok(user.instructor_identity())
    }
}

/// Accounts available when no roster is supplied.
pub fn demo_users() -> Vec<UserProfile> {
    vec![
        UserProfile {
            username: "admin".to_string(),
            full_name: "Administrator".to_string(),
            role: Role::Admin,
            student_id: None,
            instructor_name: None,
            department: None,
        },
        UserProfile {
            username: "student".to_string(),
            full_name: "Demo Student".to_string(),
            role: Role::Student,
            student_id: Some("S100".to_string()),
            instructor_name: None,
            department: Some("CSE".to_string()),
        },
        UserProfile {
            username: "teacher".to_string(),
            full_name: "Prof. Alice".to_string(),
            role: Role::Teacher,
            student_id: None,
            instructor_name: Some("Prof. Alice".to_string()),
            department: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Question, Ratings};
    use chrono::Utc;

    const FIXTURE: &str = include_str!("../fixtures/feedback.json");

    fn create_test_record(course: &str, instructor: &str) -> FeedbackRecord {
        FeedbackRecord {
            student_name: String::new(),
            student_id: String::new(),
            course: course.to_string(),
            instructor: instructor.to_string(),
            ratings: {
                let mut ratings = Ratings::default();
                ratings.set(Question::Assessment, 4.0);
                ratings
            },
            comments: String::new(),
            submitted_by: "anonymous".to_string(),
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn test_append_requires_course_and_instructor() {
        let mut log = FeedbackLog::new();

        assert!(matches!(
            log.append(create_test_record("", "Dr. Rao")),
            Err(FeedbackError::MissingCourse)
        ));
        assert!(matches!(
            log.append(create_test_record("Chemistry", "")),
            Err(FeedbackError::MissingInstructor)
        ));
        assert!(log.is_empty());

        log.append(create_test_record("Chemistry", "Dr. Rao")).unwrap();
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_append_preserves_order() {
        let mut log = FeedbackLog::new();
        log.append(create_test_record("Chemistry", "Dr. Rao")).unwrap();
        log.append(create_test_record("Biology", "Dr. Sharma")).unwrap();

        let courses: Vec<&str> = log.records().iter().map(|r| r.course.as_str()).collect();
        assert_eq!(courses, vec!["Chemistry", "Biology"]);
    }

    #[test]
    fn test_from_json_fixture() {
        let state = AppState::from_json(FIXTURE).unwrap();

        assert_eq!(state.users.len(), 4);
        assert_eq!(state.feedback.len(), 5);

        let first = &state.feedback.records()[0];
        assert_eq!(first.ratings.get(Question::TeachingQuality), 5.0);
        assert_eq!(first.ratings.get(Question::SupportServices), 0.0);
    }

    #[test]
    fn test_from_json_rejects_record_without_instructor() {
        let json = r#"{
            "feedback": [
                {"course": "Biology", "instructor": "Dr. Sharma", "_submittedAt": "2024-03-01T10:00:00Z"},
                {"course": "Biology", "instructor": "", "_submittedAt": "2024-03-01T10:00:00Z"}
            ]
        }"#;

        let err = AppState::from_json(json).unwrap_err();
        let feedback_err = err.downcast_ref::<FeedbackError>().unwrap();
        assert!(matches!(
            feedback_err,
            FeedbackError::InvalidRecord { index: 1, .. }
        ));
    }

    #[test]
    fn test_from_json_requires_submission_time() {
        let json = r#"{
            "feedback": [
                {"course": "Biology", "instructor": "Dr. Sharma", "_submittedAt": "2024-03-01T10:00:00Z"},
                {"course": "Chemistry", "instructor": "Dr. Rao", "_submittedAt": "2024-03-01T10:00:00Z"},
                {"course": "Biology", "instructor": "Dr. Sharma", "teachingQuality": 4}
            ]
        }"#;

        let err = AppState::from_json(json).unwrap_err();
        match err.downcast_ref::<FeedbackError>().unwrap() {
            FeedbackError::InvalidRecord { index, source } => {
                assert_eq!(*index, 2);
                assert!(matches!(**source, FeedbackError::Malformed(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(format!("{:#}", err).contains("#2"));
    }

    #[test]
    fn test_from_json_accepts_plain_submitted_at() {
        let json = r#"{
            "feedback": [
                {"course": "Biology", "instructor": "Dr. Sharma", "submittedAt": "2024-03-01T10:00:00Z"}
            ]
        }"#;

        let state = AppState::from_json(json).unwrap();
        assert_eq!(state.feedback.records()[0].submitted_by, "anonymous");
    }

    #[test]
    fn test_from_json_accepts_feedbacks_alias_and_demo_roster() {
        let state = AppState::from_json(r#"{"feedbacks": []}"#).unwrap();
        assert!(state.feedback.is_empty());
        assert_eq!(state.users, demo_users());
    }

    #[test]
    fn test_from_json_ignores_passwords() {
        let json = r#"{
            "users": [{"username": "t2", "password": "secret", "role": "teacher", "fullName": "Dr. Who"}]
        }"#;
        let state = AppState::from_json(json).unwrap();
        assert_eq!(state.users[0].full_name, "Dr. Who");
    }

    #[test]
    fn test_teacher_identity() {
        let state = AppState::default();

        assert_eq!(state.teacher_identity("teacher").unwrap(), "Prof. Alice");
        assert!(matches!(
            state.teacher_identity("student"),
            Err(FeedbackError::NotATeacher { .. })
        ));
        assert!(matches!(
            state.teacher_identity("nobody"),
            Err(FeedbackError::UnknownUser(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppState::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read data file"));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, FIXTURE).unwrap();

        let state = AppState::load(&path).unwrap();
        assert_eq!(state.feedback.len(), 5);
    }
}
