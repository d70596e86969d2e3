//! Review orchestration over a [`CardStore`].
//!
//! The service composes the pure components with the store: validate
//! input, read the card, apply the update rule, conditionally write the
//! result, append the review record. A lost version race surfaces as
//! `Conflict`; the service itself never retries.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::config::SrsConfig;
use crate::error::SrsError;
use crate::forecast::{forecast, ForecastDay};
use crate::lifecycle::{classify, Lifecycle};
use crate::queue::due_cards;
use crate::scheduler::apply_review;
use crate::stats::{compute_stats, ReviewStats};
use crate::store::CardStore;
use crate::types::{Flashcard, NewReview, ReviewSession};

/// Result of one submitted review.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewResult {
    pub card: Flashcard,
    pub lifecycle: Lifecycle,
    pub record: ReviewSession,
}

pub struct ReviewService<S: CardStore> {
    store: S,
    config: SrsConfig,
}

impl<S: CardStore> ReviewService<S> {
    pub fn new(store: S, config: SrsConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &SrsConfig {
        &self.config
    }

    /// Apply one review for a learner's card and persist the result.
    ///
    /// Validation happens before the scheduler runs: a review date earlier
    /// than the card's last review or a negative response time is
    /// `InvalidInput`. A card owned by another learner reports `NotFound`
    /// rather than leaking its existence.
    pub fn submit_review(
        &self,
        user_id: &str,
        card_id: &str,
        success_score: i32,
        response_time: Option<f64>,
        review_date: DateTime<Utc>,
    ) -> Result<SubmitReviewResult, SrsError> {
        if let Some(rt) = response_time {
            if rt < 0.0 {
                return Err(SrsError::InvalidInput(format!(
                    "responseTime must be non-negative, got {rt}"
                )));
            }
        }

        let snapshot = self.store.read(card_id)?;
        let mut card = snapshot.card;
        if card.user_id != user_id {
            return Err(SrsError::NotFound(format!("card {card_id}")));
        }
        if let Some(last) = card.last_review_date {
            if review_date < last {
                return Err(SrsError::InvalidInput(format!(
                    "review date {review_date} is before the card's last review {last}"
                )));
            }
        }

        let (new_state, outcome) = apply_review(&card.scheduling, success_score, review_date)?;

        if let Err(err) = self
            .store
            .write(card_id, &new_state, review_date, snapshot.version)
        {
            if err.is_retryable() {
                tracing::warn!(card_id, version = snapshot.version, "concurrent review lost version race");
            }
            return Err(err);
        }

        let record = self.store.append_review(NewReview {
            card_id: card_id.to_string(),
            user_id: user_id.to_string(),
            success_score: outcome.success_score,
            response_time,
            review_date,
        })?;

        card.scheduling = new_state;
        card.last_review_date = Some(review_date);
        let lifecycle = classify(&card.scheduling, self.config.mature_threshold_days);

        tracing::debug!(
            card_id,
            score = outcome.success_score,
            interval = card.scheduling.interval_days,
            next_review = %card.scheduling.next_review_date,
            lifecycle = lifecycle.as_str(),
            "review applied"
        );

        Ok(SubmitReviewResult {
            card,
            lifecycle,
            record,
        })
    }

    /// Cards due for a learner as of a date, fully ordered, optionally
    /// truncated to a prefix.
    pub fn due_cards(
        &self,
        user_id: &str,
        as_of_date: NaiveDate,
        limit: Option<usize>,
    ) -> Result<Vec<Flashcard>, SrsError> {
        let cards = self.store.list_by_user(user_id)?;
        Ok(due_cards(&cards, as_of_date, limit)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Summary statistics for a learner as of a date.
    pub fn stats(&self, user_id: &str, as_of_date: NaiveDate) -> Result<ReviewStats, SrsError> {
        let cards = self.store.list_by_user(user_id)?;
        let history = self.store.list_reviews(user_id)?;
        Ok(compute_stats(&cards, &history, as_of_date, &self.config))
    }

    /// Due-count calendar strip for a learner starting at a date.
    pub fn schedule(
        &self,
        user_id: &str,
        as_of_date: NaiveDate,
        days: u32,
    ) -> Result<Vec<ForecastDay>, SrsError> {
        let cards = self.store.list_by_user(user_id)?;
        Ok(forecast(&cards, as_of_date, days))
    }
}
