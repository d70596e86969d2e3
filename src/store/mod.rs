//! Card store seam.
//!
//! The engine never talks to a database; everything it needs from
//! persistence sits behind [`CardStore`]. Writes are conditional on a
//! per-card version counter so two concurrent reviews of the same card
//! cannot silently overwrite each other: a write with a stale version
//! returns [`SrsError::Conflict`], and retry policy (re-read, recompute,
//! re-write) belongs to the caller.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SrsError;
use crate::types::{Flashcard, NewReview, ReviewSession, SchedulingState};

/// A card snapshot together with the version its next write must name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionedCard {
    pub card: Flashcard,
    pub version: i64,
}

pub trait CardStore {
    /// Current snapshot of one card.
    fn read(&self, card_id: &str) -> Result<VersionedCard, SrsError>;

    /// Every card owned by a learner, ordered by creation time.
    fn list_by_user(&self, user_id: &str) -> Result<Vec<Flashcard>, SrsError>;

    /// Compare-and-swap write of a card's scheduling result.
    fn write(
        &self,
        card_id: &str,
        state: &SchedulingState,
        last_review_date: DateTime<Utc>,
        expected_version: i64,
    ) -> Result<(), SrsError>;

    /// Append one immutable review record, stamping its identifier.
    fn append_review(&self, review: NewReview) -> Result<ReviewSession, SrsError>;

    /// A learner's full review history, ordered by review date.
    fn list_reviews(&self, user_id: &str) -> Result<Vec<ReviewSession>, SrsError>;
}

/// In-memory [`CardStore`] used by tests and embedders without a database.
#[derive(Default)]
pub struct MemoryCardStore {
    cards: RwLock<HashMap<String, VersionedCard>>,
    reviews: RwLock<Vec<ReviewSession>>,
}

impl MemoryCardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a card. Creation is a collaborator concern, so this lives on
    /// the concrete store rather than on the trait.
    pub fn insert_card(&self, card: Flashcard) {
        let mut cards = self.cards.write();
        cards.insert(card.id.clone(), VersionedCard { card, version: 0 });
    }
}

impl CardStore for MemoryCardStore {
    fn read(&self, card_id: &str) -> Result<VersionedCard, SrsError> {
        self.cards
            .read()
            .get(card_id)
            .cloned()
            .ok_or_else(|| SrsError::NotFound(format!("card {card_id}")))
    }

    fn list_by_user(&self, user_id: &str) -> Result<Vec<Flashcard>, SrsError> {
        let mut cards: Vec<Flashcard> = self
            .cards
            .read()
            .values()
            .filter(|entry| entry.card.user_id == user_id)
            .map(|entry| entry.card.clone())
            .collect();
        cards.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(cards)
    }

    fn write(
        &self,
        card_id: &str,
        state: &SchedulingState,
        last_review_date: DateTime<Utc>,
        expected_version: i64,
    ) -> Result<(), SrsError> {
        let mut cards = self.cards.write();
        let entry = cards
            .get_mut(card_id)
            .ok_or_else(|| SrsError::NotFound(format!("card {card_id}")))?;

        if entry.version != expected_version {
            return Err(SrsError::Conflict(format!(
                "card {card_id} is at version {}, write expected {expected_version}",
                entry.version
            )));
        }

        entry.card.scheduling = state.clone();
        entry.card.last_review_date = Some(last_review_date);
        entry.version += 1;
        Ok(())
    }

    fn append_review(&self, review: NewReview) -> Result<ReviewSession, SrsError> {
        let record = ReviewSession {
            id: Uuid::new_v4().to_string(),
            card_id: review.card_id,
            user_id: review.user_id,
            success_score: review.success_score,
            response_time: review.response_time,
            review_date: review.review_date,
        };
        self.reviews.write().push(record.clone());
        Ok(record)
    }

    fn list_reviews(&self, user_id: &str) -> Result<Vec<ReviewSession>, SrsError> {
        let mut reviews: Vec<ReviewSession> = self
            .reviews
            .read()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| a.review_date.cmp(&b.review_date));
        Ok(reviews)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn sample_card(id: &str) -> Flashcard {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        Flashcard::new(id, "u1", "q", "a", 3, created)
    }

    #[test]
    fn read_unknown_card_is_not_found() {
        let store = MemoryCardStore::new();
        assert!(matches!(store.read("missing"), Err(SrsError::NotFound(_))));
    }

    #[test]
    fn write_bumps_the_version() {
        let store = MemoryCardStore::new();
        store.insert_card(sample_card("c1"));
        let snapshot = store.read("c1").unwrap();
        assert_eq!(snapshot.version, 0);

        let now = Utc.with_ymd_and_hms(2024, 3, 2, 9, 0, 0).unwrap();
        store
            .write("c1", &snapshot.card.scheduling, now, 0)
            .unwrap();
        let after = store.read("c1").unwrap();
        assert_eq!(after.version, 1);
        assert_eq!(after.card.last_review_date, Some(now));
    }

    #[test]
    fn stale_version_write_is_a_conflict() {
        let store = MemoryCardStore::new();
        store.insert_card(sample_card("c1"));
        let snapshot = store.read("c1").unwrap();
        let now = Utc.with_ymd_and_hms(2024, 3, 2, 9, 0, 0).unwrap();

        store
            .write("c1", &snapshot.card.scheduling, now, 0)
            .unwrap();
        let err = store
            .write("c1", &snapshot.card.scheduling, now, 0)
            .unwrap_err();
        assert!(err.is_retryable());
        assert!(matches!(err, SrsError::Conflict(_)));
    }

    #[test]
    fn listing_is_scoped_to_the_user() {
        let store = MemoryCardStore::new();
        store.insert_card(sample_card("c1"));
        let mut other = sample_card("c2");
        other.user_id = "u2".to_string();
        store.insert_card(other);

        let cards = store.list_by_user("u1").unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id, "c1");
    }

    #[test]
    fn appended_reviews_are_stamped_and_listed_in_date_order() {
        let store = MemoryCardStore::new();
        let later = NewReview {
            card_id: "c1".to_string(),
            user_id: "u1".to_string(),
            success_score: 4,
            response_time: None,
            review_date: Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap(),
        };
        let earlier = NewReview {
            review_date: Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap(),
            ..later.clone()
        };

        let first = store.append_review(later).unwrap();
        let second = store.append_review(earlier).unwrap();
        assert!(!first.id.is_empty());
        assert_ne!(first.id, second.id);

        let reviews = store.list_reviews("u1").unwrap();
        assert_eq!(reviews.len(), 2);
        assert!(reviews[0].review_date < reviews[1].review_date);
    }
}
