//! Domain error types.
//!
//! The aggregation and chart code never fails; these errors only surface
//! where data enters the application state or a user is resolved.

use thiserror::Error;

/// Errors raised while building or querying the application state.
#[derive(Error, Debug)]
pub enum FeedbackError {
    /// A feedback record was submitted without a course.
    #[error("feedback record has no course")]
    MissingCourse,

    /// A feedback record was submitted without an instructor.
    #[error("feedback record has no instructor")]
    MissingInstructor,

    /// A snapshot record could not be read as feedback (bad type, missing
    /// `_submittedAt`, unparseable timestamp).
    #[error("malformed feedback record: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A record in a loaded snapshot was rejected.
    #[error("feedback record #{index} rejected: {source}")]
    InvalidRecord {
        /// Zero-based position of the record in the snapshot.
        index: usize,
        /// Why the record was rejected.
        #[source]
        source: Box<FeedbackError>,
    },

    /// No user with this username exists in the roster.
    #[error("unknown user '{0}'")]
    UnknownUser(String),

    /// The user exists but cannot own feedback.
    #[error("user '{username}' has role {role}, not teacher")]
    NotATeacher {
        /// The username that was looked up.
        username: String,
        /// The user's actual role.
        role: String,
    },
}
