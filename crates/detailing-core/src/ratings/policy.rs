use serde::{Deserialize, Serialize};

/// Weights and thresholds applied by the rating aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingPolicy {
    pub recency_window_days: f64,
    pub recency_floor: f64,
    pub repeat_customer_boost: f64,
    pub unverified_penalty: f64,
    pub low_effort_penalty: f64,
    /// Trust weight assigned to abusive reviews. Kept above zero so the
    /// weight sum never collapses.
    pub abusive_weight: f64,
    /// Maximum star shift contributed by text sentiment.
    pub sentiment_influence: f64,
    pub high_confidence_min_reviews: usize,
    pub high_confidence_min_weight: f64,
    pub medium_confidence_min_reviews: usize,
}

impl Default for RatingPolicy {
    fn default() -> Self {
        Self {
            recency_window_days: 365.0,
            recency_floor: 0.1,
            repeat_customer_boost: 1.5,
            unverified_penalty: 0.5,
            low_effort_penalty: 0.7,
            abusive_weight: 0.01,
            sentiment_influence: 0.5,
            high_confidence_min_reviews: 50,
            high_confidence_min_weight: 20.0,
            medium_confidence_min_reviews: 10,
        }
    }
}

/// Thresholds for the recent-versus-older rating comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPolicy {
    /// Reviews younger than this many days count as recent.
    pub recent_window_days: u32,
    /// Older bucket spans `recent_window_days..=comparison_window_days`.
    pub comparison_window_days: u32,
    pub improvement_threshold: f64,
    pub consistency_threshold: f64,
    pub consistency_min_reviews: usize,
}

impl Default for IndicatorPolicy {
    fn default() -> Self {
        Self {
            recent_window_days: 30,
            comparison_window_days: 90,
            improvement_threshold: 0.3,
            consistency_threshold: 0.2,
            consistency_min_reviews: 20,
        }
    }
}
