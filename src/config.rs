use serde::{Deserialize, Serialize};

/// Scheduling configuration supplied to the classifier and stats
/// aggregator at construction time. Thresholds are adjustable defaults,
/// not laws.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SrsConfig {
    /// Interval (days) at which a card counts as mature
    pub mature_threshold_days: i64,
    /// Trailing window (days) for recent-review statistics
    pub stats_window_days: i64,
}

impl Default for SrsConfig {
    fn default() -> Self {
        Self {
            mature_threshold_days: 21,
            stats_window_days: 7,
        }
    }
}

impl SrsConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("SRS_MATURE_THRESHOLD_DAYS") {
            config.mature_threshold_days = val.parse().unwrap_or(config.mature_threshold_days);
        }
        if let Ok(val) = std::env::var("SRS_STATS_WINDOW_DAYS") {
            config.stats_window_days = val.parse().unwrap_or(config.stats_window_days);
        }

        config
    }
}
