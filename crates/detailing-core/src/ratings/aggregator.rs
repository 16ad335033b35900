use super::domain::{Confidence, RatingResult, ReviewSignal};
use super::policy::RatingPolicy;
use super::weights::weigh_review;
use tracing::debug;

/// Stateless aggregator that applies a [`RatingPolicy`] to a set of reviews.
#[derive(Debug, Clone, Default)]
pub struct RatingAggregator {
    policy: RatingPolicy,
}

impl RatingAggregator {
    pub fn new(policy: RatingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RatingPolicy {
        &self.policy
    }

    pub fn aggregate(&self, inputs: &[ReviewSignal]) -> RatingResult {
        if inputs.is_empty() {
            return RatingResult::empty();
        }

        let mut terms: Vec<_> = inputs
            .iter()
            .map(|review| weigh_review(review, &self.policy))
            .collect();
        // Summation order must not depend on input order, or rounding to one
        // decimal can flip on permutations.
        terms.sort_by(|a, b| {
            a.adjusted_stars
                .total_cmp(&b.adjusted_stars)
                .then(a.weight.total_cmp(&b.weight))
        });

        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;
        let mut abusive = 0usize;

        for weighted in &terms {
            weighted_sum += weighted.adjusted_stars * weighted.weight;
            total_weight += weighted.weight;
            if weighted.is_abusive {
                abusive += 1;
            }
        }

        let final_rating = if total_weight > 0.0 {
            round_to_tenth(weighted_sum / total_weight)
        } else {
            0.0
        };

        let confidence = if abusive == inputs.len() {
            Confidence::Low
        } else {
            self.confidence_for(inputs.len(), total_weight)
        };

        debug!(
            total_reviews = inputs.len(),
            abusive,
            total_weight,
            final_rating,
            confidence = confidence.label(),
            "aggregated review ratings"
        );

        RatingResult {
            final_rating,
            confidence,
            total_reviews: inputs.len(),
            total_weight,
        }
    }

    fn confidence_for(&self, total_reviews: usize, total_weight: f64) -> Confidence {
        if total_reviews > self.policy.high_confidence_min_reviews
            && total_weight > self.policy.high_confidence_min_weight
        {
            Confidence::High
        } else if total_reviews > self.policy.medium_confidence_min_reviews {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

/// Aggregates `inputs` under the default policy.
pub fn calculate_weighted_rating(inputs: &[ReviewSignal]) -> RatingResult {
    RatingAggregator::default().aggregate(inputs)
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
