use super::domain::ReviewSignal;
use super::policy::RatingPolicy;

/// Per-review weighting, kept so aggregation stays auditable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct WeightedReview {
    pub adjusted_stars: f64,
    pub weight: f64,
    pub is_abusive: bool,
}

pub(crate) fn weigh_review(review: &ReviewSignal, policy: &RatingPolicy) -> WeightedReview {
    let weight = recency_weight(review.days_ago, policy) * trust_weight(review, policy);

    WeightedReview {
        adjusted_stars: adjusted_stars(review, policy),
        weight,
        is_abusive: review.sentiment.is_abusive,
    }
}

/// Linear decay over the recency window, floored so stale reviews keep a
/// minimal voice.
pub(crate) fn recency_weight(days_ago: u32, policy: &RatingPolicy) -> f64 {
    let decayed = 1.0 - f64::from(days_ago) / policy.recency_window_days;
    decayed.max(policy.recency_floor)
}

pub(crate) fn trust_weight(review: &ReviewSignal, policy: &RatingPolicy) -> f64 {
    let mut weight = 1.0;

    if review.is_repeat_customer {
        weight *= policy.repeat_customer_boost;
    }
    if !review.is_verified {
        weight *= policy.unverified_penalty;
    }
    if review.sentiment.is_low_effort {
        weight *= policy.low_effort_penalty;
    }
    // Abuse suppression overrides every other adjustment.
    if review.sentiment.is_abusive {
        weight = policy.abusive_weight;
    }

    weight
}

pub(crate) fn adjusted_stars(review: &ReviewSignal, policy: &RatingPolicy) -> f64 {
    let shifted =
        review.clamped_stars() + review.clamped_sentiment_score() * policy.sentiment_influence;
    shifted.clamp(1.0, 5.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratings::domain::Sentiment;

    fn review() -> ReviewSignal {
        ReviewSignal {
            stars: 4,
            sentiment: Sentiment::neutral(),
            is_repeat_customer: false,
            is_verified: true,
            days_ago: 0,
        }
    }

    #[test]
    fn recency_decays_linearly_then_floors() {
        let policy = RatingPolicy::default();
        assert_eq!(recency_weight(0, &policy), 1.0);
        assert!((recency_weight(73, &policy) - 0.8).abs() < 1e-9);
        assert!((recency_weight(365, &policy) - 0.1).abs() < 1e-9);
        assert!((recency_weight(2_000, &policy) - 0.1).abs() < 1e-9);
    }

    #[test]
    fn trust_combines_boosts_and_penalties() {
        let policy = RatingPolicy::default();
        let mut signal = review();
        signal.is_repeat_customer = true;
        signal.is_verified = false;
        signal.sentiment.is_low_effort = true;

        let weight = trust_weight(&signal, &policy);
        assert!((weight - 1.5 * 0.5 * 0.7).abs() < 1e-9);
    }

    #[test]
    fn abuse_dominates_repeat_customer_boost() {
        let policy = RatingPolicy::default();
        let mut signal = review();
        signal.is_repeat_customer = true;
        signal.sentiment.is_abusive = true;

        assert_eq!(trust_weight(&signal, &policy), 0.01);
    }

    #[test]
    fn sentiment_shifts_stars_within_bounds() {
        let policy = RatingPolicy::default();
        let mut signal = review();
        signal.stars = 5;
        signal.sentiment.score = -1.0;
        assert!((adjusted_stars(&signal, &policy) - 4.5).abs() < 1e-9);

        signal.sentiment.score = 1.0;
        assert_eq!(adjusted_stars(&signal, &policy), 5.0);

        signal.stars = 1;
        signal.sentiment.score = -0.8;
        assert_eq!(adjusted_stars(&signal, &policy), 1.0);
    }

    #[test]
    fn out_of_range_inputs_are_clamped() {
        let policy = RatingPolicy::default();
        let mut signal = review();
        signal.stars = 9;
        signal.sentiment.score = -4.0;
        assert!((adjusted_stars(&signal, &policy) - 4.5).abs() < 1e-9);

        signal.stars = -3;
        signal.sentiment.score = f64::NAN;
        assert_eq!(adjusted_stars(&signal, &policy), 1.0);
    }
}
