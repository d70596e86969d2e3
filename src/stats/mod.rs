//! Learner statistics over cards and review history.
//!
//! All computations are read-only over caller-supplied snapshots; a review
//! committed mid-query may or may not be reflected.

use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::SrsConfig;
use crate::lifecycle::{classify, Lifecycle};
use crate::queue::due_cards;
use crate::scheduler::clamp_score;
use crate::types::{Flashcard, ReviewSession, PASSING_SCORE};

/// Per-label card counts, computed through the classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleCounts {
    pub new: i64,
    pub learning: i64,
    pub review: i64,
    pub mature: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub total_flashcards: i64,
    pub due_flashcards: i64,
    /// Reviews whose date falls in the trailing stats window, inclusive
    pub recent_reviews: i64,
    /// Mean score over recent reviews, 0.0 when there are none
    pub average_score: f64,
    /// Fraction of recent reviews with a passing score, in [0, 1]
    pub success_rate: f64,
    /// Consecutive review days ending on `as_of_date` or the day before
    pub streak_days: i64,
    pub state_counts: LifecycleCounts,
}

/// Compute summary metrics for one learner as of a reference date.
pub fn compute_stats(
    cards: &[Flashcard],
    review_history: &[ReviewSession],
    as_of_date: NaiveDate,
    config: &SrsConfig,
) -> ReviewStats {
    let window_days = config.stats_window_days.max(1);
    let window_start = as_of_date
        .checked_sub_days(Days::new(window_days as u64 - 1))
        .unwrap_or(NaiveDate::MIN);

    let recent: Vec<i32> = review_history
        .iter()
        .filter(|r| {
            let d = r.review_date.date_naive();
            d >= window_start && d <= as_of_date
        })
        .map(|r| clamp_score(r.success_score))
        .collect();

    let recent_reviews = recent.len() as i64;
    let (average_score, success_rate) = if recent.is_empty() {
        (0.0, 0.0)
    } else {
        let sum: i64 = recent.iter().map(|&s| i64::from(s)).sum();
        let passed = recent.iter().filter(|&&s| s >= PASSING_SCORE).count();
        (
            sum as f64 / recent.len() as f64,
            passed as f64 / recent.len() as f64,
        )
    };

    let mut state_counts = LifecycleCounts::default();
    for card in cards {
        match classify(&card.scheduling, config.mature_threshold_days) {
            Lifecycle::New => state_counts.new += 1,
            Lifecycle::Learning => state_counts.learning += 1,
            Lifecycle::Review => state_counts.review += 1,
            Lifecycle::Mature => state_counts.mature += 1,
        }
    }

    ReviewStats {
        total_flashcards: cards.len() as i64,
        due_flashcards: due_cards(cards, as_of_date, None).len() as i64,
        recent_reviews,
        average_score,
        success_rate,
        streak_days: streak_days(review_history, as_of_date),
        state_counts,
    }
}

/// Length of the maximal run of consecutive review days ending on the
/// reference date or the day before. Any gap day breaks the run.
fn streak_days(review_history: &[ReviewSession], as_of_date: NaiveDate) -> i64 {
    let review_days: HashSet<NaiveDate> = review_history
        .iter()
        .map(|r| r.review_date.date_naive())
        .collect();

    let mut cursor = if review_days.contains(&as_of_date) {
        as_of_date
    } else {
        match as_of_date.checked_sub_days(Days::new(1)) {
            Some(yesterday) if review_days.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut streak = 1;
    while let Some(prev) = cursor.checked_sub_days(Days::new(1)) {
        if !review_days.contains(&prev) {
            break;
        }
        streak += 1;
        cursor = prev;
    }
    streak
}
