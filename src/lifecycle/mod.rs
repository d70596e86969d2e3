//! Card maturity lifecycle.
//!
//! Labels are derived from scheduling state on demand and never persisted:
//! NEW -> {LEARNING, REVIEW} on the first review depending on outcome,
//! LEARNING -> REVIEW -> MATURE on successive successes, and any state
//! falls back to LEARNING on a failed review. There is no terminal state.

use serde::{Deserialize, Serialize};

use crate::types::SchedulingState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Lifecycle {
    New,
    Learning,
    Review,
    Mature,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::New
    }
}

impl Lifecycle {
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "LEARNING" => Self::Learning,
            "REVIEW" => Self::Review,
            "MATURE" => Self::Mature,
            _ => Self::New,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Learning => "LEARNING",
            Self::Review => "REVIEW",
            Self::Mature => "MATURE",
        }
    }
}

/// Derive the lifecycle label for a scheduling state. Pure and total;
/// identical states always classify identically.
pub fn classify(state: &SchedulingState, mature_threshold_days: i64) -> Lifecycle {
    if state.review_count == 0 {
        Lifecycle::New
    } else if state.interval_days <= 1 {
        Lifecycle::Learning
    } else if state.interval_days < mature_threshold_days {
        Lifecycle::Review
    } else {
        Lifecycle::Mature
    }
}
