//! Feedback aggregation and statistics.
//!
//! Stateless reductions over a slice of feedback records. None of these
//! functions fail: empty input yields 0, an empty list, or an all-zero
//! histogram.

use crate::models::{FeedbackRecord, Question, QuestionAverage, RatingHistogram};

/// Round to 2 decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Mean rating for `question`, rounded to 2 decimals.
///
/// Unanswered questions are stored as 0 and still count in the
/// denominator, so they pull the mean down. [`build_histogram`] drops them
/// instead; the two are intentionally different.
pub fn average_of<'a>(
    records: impl IntoIterator<Item = &'a FeedbackRecord>,
    question: Question,
) -> f64 {
    let (sum, count) = records
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), r| {
            (sum + r.ratings.get(question), count + 1)
        });

    if count == 0 {
        return 0.0;
    }

    round2(sum / count as f64)
}

/// Means for every question, in display order.
pub fn question_averages(records: &[FeedbackRecord]) -> Vec<QuestionAverage> {
    Question::ALL
        .into_iter()
        .map(|question| QuestionAverage {
            question,
            label: question.label().to_string(),
            average: average_of(records, question),
        })
        .collect()
}

/// Number of records for exactly this course name (case-sensitive).
pub fn count_by_course(records: &[FeedbackRecord], course: &str) -> usize {
    records.iter().filter(|r| r.course == course).count()
}

/// Records whose instructor is exactly `identity` (case-sensitive, untrimmed).
pub fn filter_by_instructor<'a>(
    records: &'a [FeedbackRecord],
    identity: &str,
) -> Vec<&'a FeedbackRecord> {
    records
        .iter()
        .filter(|r| !r.instructor.is_empty() && r.instructor == identity)
        .collect()
}

/// Distribution of ratings 1..=5 for `question`.
///
/// Ratings that are not integers in 1..=5 (including 0 for unanswered)
/// are skipped.
pub fn build_histogram<'a>(
    records: impl IntoIterator<Item = &'a FeedbackRecord>,
    question: Question,
) -> RatingHistogram {
    let mut histogram = RatingHistogram::default();

    for record in records {
        histogram.record(record.ratings.get(question));
    }

    histogram
}
