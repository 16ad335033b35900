use super::domain::ReviewSignal;
use super::policy::IndicatorPolicy;
use serde::{Deserialize, Serialize};

/// Qualitative badge shown next to an aggregate rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityIndicator {
    RecentlyImproved,
    HighlyConsistent,
}

impl QualityIndicator {
    pub const fn label(self) -> &'static str {
        match self {
            Self::RecentlyImproved => "Recently improved",
            Self::HighlyConsistent => "Highly consistent",
        }
    }
}

/// Recent-versus-older comparison backing the quality indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingTrend {
    pub recent_average: Option<f64>,
    pub older_average: Option<f64>,
    pub indicators: Vec<QualityIndicator>,
}

impl RatingTrend {
    pub fn analyze(inputs: &[ReviewSignal], policy: &IndicatorPolicy) -> Self {
        let recent_average = mean_stars(
            inputs
                .iter()
                .filter(|review| review.days_ago < policy.recent_window_days),
        );
        let older_average = mean_stars(inputs.iter().filter(|review| {
            review.days_ago >= policy.recent_window_days
                && review.days_ago <= policy.comparison_window_days
        }));

        let mut indicators = Vec::new();
        if let (Some(recent), Some(older)) = (recent_average, older_average) {
            let gap = recent - older;
            if gap > policy.improvement_threshold {
                indicators.push(QualityIndicator::RecentlyImproved);
            }
            if gap.abs() < policy.consistency_threshold
                && inputs.len() > policy.consistency_min_reviews
            {
                indicators.push(QualityIndicator::HighlyConsistent);
            }
        }

        Self {
            recent_average,
            older_average,
            indicators,
        }
    }
}

/// Indicators for `inputs` under the default thresholds.
pub fn quality_indicators(inputs: &[ReviewSignal]) -> Vec<QualityIndicator> {
    RatingTrend::analyze(inputs, &IndicatorPolicy::default()).indicators
}

fn mean_stars<'a>(reviews: impl Iterator<Item = &'a ReviewSignal>) -> Option<f64> {
    let (sum, count) = reviews.fold((0.0, 0usize), |(sum, count), review| {
        (sum + review.clamped_stars(), count + 1)
    });
    (count > 0).then(|| sum / count as f64)
}
