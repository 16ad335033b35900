//! Weighted review-rating aggregation.
//!
//! Star ratings are combined with sentiment, trust and recency signals into a
//! single rating plus a confidence label. Qualitative trend indicators are
//! derived from the same signals.

mod aggregator;
pub mod domain;
pub mod import;
mod indicators;
mod policy;
mod weights;

#[cfg(test)]
mod tests;

pub use aggregator::{calculate_weighted_rating, RatingAggregator};
pub use domain::{Confidence, RatingResult, ReviewSignal, Sentiment, SentimentLabel};
pub use import::{ReviewFormat, ReviewImportError, ReviewImporter};
pub use indicators::{quality_indicators, QualityIndicator, RatingTrend};
pub use policy::{IndicatorPolicy, RatingPolicy};
