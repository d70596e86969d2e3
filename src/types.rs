//! Common Types and Constants
//!
//! Shared data structures used across all scheduling modules.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==================== Constants ====================

/// Floor for the ease factor; a card never grows slower than this
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Ease factor assigned to freshly created cards
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Interval after the first successful review (days)
pub const FIRST_INTERVAL_DAYS: i64 = 1;

/// Interval after the second consecutive success (days)
pub const SECOND_INTERVAL_DAYS: i64 = 6;

/// Scores at or above this count as a successful recall
pub const PASSING_SCORE: i32 = 3;

/// Lower bound of the nominal score domain
pub const MIN_SCORE: i32 = 0;

/// Upper bound of the nominal score domain
pub const MAX_SCORE: i32 = 5;

/// Lowest card difficulty
pub const MIN_DIFFICULTY: i32 = 1;

/// Highest card difficulty
pub const MAX_DIFFICULTY: i32 = 5;

// ==================== Scheduling State ====================

/// Per-card scheduling state, the only fields the scheduler reads or writes.
///
/// Invariants: `ease_factor >= 1.3`, `interval_days >= 1`,
/// `next_review_date` strictly after the review that produced it, and
/// `review_count` equal to the number of review records for the card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingState {
    pub ease_factor: f64,
    pub interval_days: i64,
    pub repetitions: i32,
    pub next_review_date: NaiveDate,
    pub review_count: i64,
}

impl SchedulingState {
    /// State for a card that has never been reviewed; due immediately.
    pub fn new(created_on: NaiveDate) -> Self {
        Self {
            ease_factor: DEFAULT_EASE_FACTOR,
            interval_days: FIRST_INTERVAL_DAYS,
            repetitions: 0,
            next_review_date: created_on,
            review_count: 0,
        }
    }

    pub fn is_new(&self) -> bool {
        self.review_count == 0
    }
}

// ==================== Flashcard ====================

/// A learner-owned flashcard. Question and answer text are opaque to the
/// scheduling core; only `difficulty`, `created_at` and the embedded
/// scheduling state participate in any computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: String,
    pub user_id: String,
    pub question: String,
    pub answer: String,
    pub difficulty: i32,
    pub created_at: DateTime<Utc>,
    pub last_review_date: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub scheduling: SchedulingState,
}

impl Flashcard {
    /// Card as first saved by a learner: default scheduling state, due on
    /// its creation day. Difficulty outside 1-5 is clamped.
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
        difficulty: i32,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            question: question.into(),
            answer: answer.into(),
            difficulty: difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY),
            created_at,
            last_review_date: None,
            scheduling: SchedulingState::new(created_at.date_naive()),
        }
    }
}

// ==================== Review Records ====================

/// Scored fields produced by one `apply_review` call. Identifiers and the
/// card/learner references are stamped when the record is appended to the
/// store; the scheduler itself stays deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewOutcome {
    /// Score actually used by the update rule, clamped to 0-5
    pub success_score: i32,
    pub review_date: DateTime<Utc>,
}

/// Input for appending one review record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub card_id: String,
    pub user_id: String,
    pub success_score: i32,
    pub response_time: Option<f64>,
    pub review_date: DateTime<Utc>,
}

/// One stored review. Immutable and append-only; exactly one record exists
/// per applied review.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSession {
    pub id: String,
    pub card_id: String,
    pub user_id: String,
    pub success_score: i32,
    pub response_time: Option<f64>,
    pub review_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn new_card_is_due_on_creation_day() {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let card = Flashcard::new("c1", "u1", "q", "a", 3, created);
        assert!(card.scheduling.is_new());
        assert_eq!(card.scheduling.next_review_date, created.date_naive());
        assert_eq!(card.scheduling.ease_factor, DEFAULT_EASE_FACTOR);
        assert_eq!(card.scheduling.interval_days, FIRST_INTERVAL_DAYS);
        assert_eq!(card.last_review_date, None);
    }

    #[test]
    fn difficulty_is_clamped_at_construction() {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(Flashcard::new("c1", "u1", "q", "a", 0, created).difficulty, 1);
        assert_eq!(Flashcard::new("c2", "u1", "q", "a", 9, created).difficulty, 5);
    }
}
