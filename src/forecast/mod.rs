//! Review-load forecast.
//!
//! Projects due-card counts over a future date range so a caller can
//! render a full calendar strip without post-processing: one entry per
//! day, zero-count days included.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::types::Flashcard;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub due_count: i64,
    pub is_today: bool,
}

/// Project due-card counts for exactly `days` calendar days starting at
/// `as_of_date`. A card counts toward the day its `next_review_date`
/// equals; already-overdue cards belong to the due-set query, not here.
pub fn forecast(cards: &[Flashcard], as_of_date: NaiveDate, days: u32) -> Vec<ForecastDay> {
    let mut counts: HashMap<NaiveDate, i64> = HashMap::new();
    for card in cards {
        *counts.entry(card.scheduling.next_review_date).or_insert(0) += 1;
    }

    (0..days)
        .map(|offset| {
            let date = as_of_date + Days::new(u64::from(offset));
            ForecastDay {
                date,
                due_count: counts.get(&date).copied().unwrap_or(0),
                is_today: offset == 0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn card_due(id: &str, due: NaiveDate) -> Flashcard {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let mut card = Flashcard::new(id, "u1", "q", "a", 3, created);
        card.scheduling.next_review_date = due;
        card
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    #[test]
    fn one_card_three_days_out() {
        let cards = vec![card_due("c1", today() + Days::new(3))];
        let strip = forecast(&cards, today(), 7);
        assert_eq!(strip.len(), 7);
        for (i, entry) in strip.iter().enumerate() {
            assert_eq!(entry.due_count, if i == 3 { 1 } else { 0 });
        }
    }

    #[test]
    fn only_the_first_entry_is_flagged_today() {
        let strip = forecast(&[], today(), 4);
        let flags: Vec<bool> = strip.iter().map(|d| d.is_today).collect();
        assert_eq!(flags, vec![true, false, false, false]);
    }

    #[test]
    fn dates_are_consecutive_from_the_reference_date() {
        let strip = forecast(&[], today(), 3);
        let dates: Vec<NaiveDate> = strip.iter().map(|d| d.date).collect();
        assert_eq!(
            dates,
            vec![today(), today() + Days::new(1), today() + Days::new(2)]
        );
    }

    #[test]
    fn overdue_cards_do_not_appear_in_the_strip() {
        let cards = vec![card_due("late", today() - Days::new(2))];
        let strip = forecast(&cards, today(), 5);
        assert!(strip.iter().all(|d| d.due_count == 0));
    }

    #[test]
    fn same_day_cards_accumulate() {
        let due = today() + Days::new(1);
        let cards = vec![card_due("a", due), card_due("b", due), card_due("c", due)];
        let strip = forecast(&cards, today(), 2);
        assert_eq!(strip[1].due_count, 3);
    }

    #[test]
    fn zero_days_yields_an_empty_strip() {
        assert!(forecast(&[], today(), 0).is_empty());
    }
}
