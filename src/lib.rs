//! # mentor-algo - spaced-repetition scheduling core
//!
//! Pure Rust implementation of the review engine behind the Mentor
//! flashcard system:
//!
//! - **Scheduler** - SM-2-derived update rule applied once per review
//! - **Lifecycle** - NEW/LEARNING/REVIEW/MATURE maturity classification
//! - **Queue** - due-card selection and ordering
//! - **Stats** - learner statistics over review history
//! - **Forecast** - upcoming review load per calendar day
//!
//! ## Design
//!
//! - **Pure core** - scheduling state is an explicit value type passed
//!   into pure functions; persistence stays behind the [`store::CardStore`]
//!   seam, so every algorithm is unit-testable without a database
//! - **No hidden coordination** - the scheduler and classifier are
//!   stateless; queries are read-only over caller-supplied snapshots; the
//!   only synchronization point is the store's versioned write
//! - **Single clamping policy** - scores outside 0-5 are clamped at the
//!   scheduler boundary, never rejected
//!
//! ## Module structure
//!
//! - [`scheduler`] - SM-2-derived review scheduling
//! - [`lifecycle`] - maturity classification
//! - [`queue`] - due-set query
//! - [`stats`] - statistics aggregation
//! - [`forecast`] - review-load forecasting
//! - [`store`] - persistence seam and in-memory store
//! - [`service`] - orchestration over a card store
//! - [`config`] - scheduling configuration
//! - [`error`] - crate error type
//! - [`types`] - shared types and constants
//!
//! ## Usage example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use mentor_algo::{Flashcard, MemoryCardStore, ReviewService, SrsConfig};
//!
//! let store = MemoryCardStore::new();
//! let created = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
//! store.insert_card(Flashcard::new("card-1", "user-1", "ownership?", "moves by default", 2, created));
//!
//! let service = ReviewService::new(store, SrsConfig::default());
//! let result = service
//!     .submit_review("user-1", "card-1", 4, Some(2.5), created)
//!     .unwrap();
//! assert_eq!(result.card.scheduling.repetitions, 1);
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod config;
pub mod error;
pub mod forecast;
pub mod lifecycle;
pub mod queue;
pub mod scheduler;
pub mod service;
pub mod stats;
pub mod store;
pub mod types;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::SrsConfig;
pub use error::SrsError;
pub use forecast::{forecast, ForecastDay};
pub use lifecycle::{classify, Lifecycle};
pub use queue::due_cards;
pub use scheduler::{apply_review, clamp_score};
pub use service::{ReviewService, SubmitReviewResult};
pub use stats::{compute_stats, LifecycleCounts, ReviewStats};
pub use store::{CardStore, MemoryCardStore, VersionedCard};
pub use types::{Flashcard, NewReview, ReviewOutcome, ReviewSession, SchedulingState};
