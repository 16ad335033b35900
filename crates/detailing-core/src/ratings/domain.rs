use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Coarse polarity assigned by the text-analysis step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
        }
    }

    /// Buckets a raw score when the analysis step did not provide a label.
    pub fn from_score(score: f64) -> Self {
        if score > 0.2 {
            Self::Positive
        } else if score < -0.2 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

/// Inferred sentiment of a review's free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// Polarity in [-1, 1].
    pub score: f64,
    pub label: SentimentLabel,
    #[serde(default)]
    pub themes: BTreeSet<String>,
    /// Strength of expressed emotion in [0, 1].
    pub intensity: f64,
    #[serde(default)]
    pub is_abusive: bool,
    #[serde(default)]
    pub is_low_effort: bool,
}

impl Sentiment {
    pub fn neutral() -> Self {
        Self {
            score: 0.0,
            label: SentimentLabel::Neutral,
            themes: BTreeSet::new(),
            intensity: 0.0,
            is_abusive: false,
            is_low_effort: false,
        }
    }
}

/// One review as seen by the aggregator.
///
/// Built fresh per request from stored review rows; see
/// [`crate::ratings::import`] for the boundary mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSignal {
    /// Star rating, nominally 1-5. Out-of-range values are clamped.
    pub stars: i32,
    pub sentiment: Sentiment,
    pub is_repeat_customer: bool,
    pub is_verified: bool,
    /// Age of the review in whole days.
    pub days_ago: u32,
}

impl ReviewSignal {
    pub fn clamped_stars(&self) -> f64 {
        f64::from(self.stars.clamp(1, 5))
    }

    pub fn clamped_sentiment_score(&self) -> f64 {
        if self.sentiment.score.is_finite() {
            self.sentiment.score.clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }
}

/// How much trust the aggregate deserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Aggregated rating for a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingResult {
    /// Rounded to one decimal; 0 when there are no reviews.
    pub final_rating: f64,
    pub confidence: Confidence,
    pub total_reviews: usize,
    /// Sum of recency x trust weights across all reviews.
    pub total_weight: f64,
}

impl RatingResult {
    pub fn empty() -> Self {
        Self {
            final_rating: 0.0,
            confidence: Confidence::Low,
            total_reviews: 0,
            total_weight: 0.0,
        }
    }
}
