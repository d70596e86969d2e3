//! Due-set query.
//!
//! Ordering surfaces the longest-overdue, easiest material first so a
//! learner clears backlog without being overwhelmed: ascending next review
//! date, then ascending difficulty, then ascending creation time.

use chrono::NaiveDate;

use crate::types::Flashcard;

/// Select every card with `next_review_date <= as_of_date`, fully ordered.
///
/// `limit` takes a prefix of the ordered result; shrinking it never
/// changes which cards appear earlier in a larger result.
pub fn due_cards(
    cards: &[Flashcard],
    as_of_date: NaiveDate,
    limit: Option<usize>,
) -> Vec<&Flashcard> {
    let mut due: Vec<&Flashcard> = cards
        .iter()
        .filter(|card| card.scheduling.next_review_date <= as_of_date)
        .collect();

    due.sort_by(|a, b| {
        a.scheduling
            .next_review_date
            .cmp(&b.scheduling.next_review_date)
            .then(a.difficulty.cmp(&b.difficulty))
            .then(a.created_at.cmp(&b.created_at))
    });

    if let Some(limit) = limit {
        due.truncate(limit);
    }
    due
}
