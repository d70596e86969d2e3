//! SM-2-derived review scheduler.
//!
//! Core rule:
//! - Failure (score < 3): repetitions reset to 0 and the card returns to a
//!   one-day interval; the ease factor is left unchanged.
//! - Success: intervals walk the ladder 1 -> 6 -> round(interval * ease),
//!   repetitions increment, and the ease factor moves by
//!   `0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)`, floored at 1.3.
//!
//! Scores outside 0-5 are accepted and clamped at this boundary; that is
//! the single documented policy, not an error.
//!
//! References:
//! - Wozniak, P. A. (1990). Optimization of learning. SuperMemo SM-2.

use chrono::{DateTime, Days, NaiveDate, Utc};

use crate::error::SrsError;
use crate::types::{
    ReviewOutcome, SchedulingState, FIRST_INTERVAL_DAYS, MAX_SCORE, MIN_EASE_FACTOR, MIN_SCORE,
    PASSING_SCORE, SECOND_INTERVAL_DAYS,
};

/// Clamp a raw score into the nominal 0-5 domain.
pub fn clamp_score(score: i32) -> i32 {
    score.clamp(MIN_SCORE, MAX_SCORE)
}

/// Apply one review outcome to a card's scheduling state.
///
/// Pure and deterministic: the only effects are the returned state and
/// review outcome; persistence belongs to the caller. `review_date` on or
/// after the card's last review is an input precondition enforced
/// upstream, not validated here.
///
/// Never fails for any score. The terminal invariant check exists to trap
/// implementation bugs loudly instead of clamping them away.
pub fn apply_review(
    state: &SchedulingState,
    success_score: i32,
    review_date: DateTime<Utc>,
) -> Result<(SchedulingState, ReviewOutcome), SrsError> {
    let score = clamp_score(success_score);
    let mut next = state.clone();

    if score < PASSING_SCORE {
        next.repetitions = 0;
        next.interval_days = FIRST_INTERVAL_DAYS;
    } else {
        next.interval_days = match state.repetitions {
            0 => FIRST_INTERVAL_DAYS,
            1 => SECOND_INTERVAL_DAYS,
            _ => (state.interval_days as f64 * state.ease_factor).round() as i64,
        };
        next.repetitions = state.repetitions + 1;
        next.ease_factor = next_ease_factor(state.ease_factor, score);
    }

    verify_floors(&next)?;

    let review_day = review_date.date_naive();
    next.next_review_date = next_review_date(review_day, next.interval_days)?;
    next.review_count = state.review_count + 1;

    if next.next_review_date <= review_day {
        return Err(SrsError::InvariantViolation(format!(
            "next review date {} not after review day {review_day}",
            next.next_review_date
        )));
    }

    let outcome = ReviewOutcome {
        success_score: score,
        review_date,
    };
    Ok((next, outcome))
}

fn next_ease_factor(ease: f64, score: i32) -> f64 {
    let q = f64::from(score);
    let adjusted = ease + 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
    adjusted.max(MIN_EASE_FACTOR)
}

fn next_review_date(review_day: NaiveDate, interval_days: i64) -> Result<NaiveDate, SrsError> {
    review_day
        .checked_add_days(Days::new(interval_days as u64))
        .ok_or_else(|| {
            SrsError::InvariantViolation(format!(
                "next review date overflows calendar: interval {interval_days} days"
            ))
        })
}

fn verify_floors(state: &SchedulingState) -> Result<(), SrsError> {
    if state.ease_factor < MIN_EASE_FACTOR {
        return Err(SrsError::InvariantViolation(format!(
            "ease factor {} below floor {MIN_EASE_FACTOR}",
            state.ease_factor
        )));
    }
    if state.interval_days < FIRST_INTERVAL_DAYS {
        return Err(SrsError::InvariantViolation(format!(
            "interval {} days below floor {FIRST_INTERVAL_DAYS}",
            state.interval_days
        )));
    }
    Ok(())
}
