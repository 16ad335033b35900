use super::common::*;
use crate::ratings::{calculate_weighted_rating, Confidence, RatingAggregator, RatingPolicy};

#[test]
fn empty_input_yields_zero_rating_with_low_confidence() {
    let result = calculate_weighted_rating(&[]);

    assert_eq!(result.final_rating, 0.0);
    assert_eq!(result.confidence, Confidence::Low);
    assert_eq!(result.total_reviews, 0);
}

#[test]
fn single_fresh_verified_review_keeps_its_stars() {
    let result = calculate_weighted_rating(&[verified_review(5, 0)]);

    assert_eq!(result.final_rating, 5.0);
    assert_eq!(result.total_reviews, 1);
    assert_eq!(result.confidence, Confidence::Low);
}

#[test]
fn negative_sentiment_pulls_rating_down() {
    let review = with_sentiment(verified_review(5, 0), -1.0);

    let result = calculate_weighted_rating(&[review]);

    assert_eq!(result.final_rating, 4.5);
}

#[test]
fn unverified_reviews_count_for_half() {
    let inputs = vec![verified_review(5, 0), unverified_review(1, 0)];

    let result = calculate_weighted_rating(&inputs);

    // (5 * 1.0 + 1 * 0.5) / 1.5
    assert_eq!(result.final_rating, 3.7);
    assert!((result.total_weight - 1.5).abs() < 1e-9);
}

#[test]
fn abusive_review_barely_moves_the_average() {
    let mut inputs: Vec<_> = (0..99).map(|_| verified_review(5, 0)).collect();
    inputs.push(abusive_review(1, 0));

    let result = calculate_weighted_rating(&inputs);

    assert_eq!(result.final_rating, 5.0);
    assert_eq!(result.total_reviews, 100);
    assert_eq!(result.confidence, Confidence::High);
}

#[test]
fn result_is_independent_of_input_order() {
    let inputs = vec![
        verified_review(5, 3),
        with_sentiment(unverified_review(2, 40), -0.4),
        abusive_review(1, 2),
        with_sentiment(verified_review(4, 200), 0.6),
        verified_review(3, 500),
    ];
    let mut reversed = inputs.clone();
    reversed.reverse();
    let mut rotated = inputs.clone();
    rotated.rotate_left(2);

    let baseline = calculate_weighted_rating(&inputs);

    for permutation in [reversed, rotated] {
        let result = calculate_weighted_rating(&permutation);
        assert_eq!(result.final_rating, baseline.final_rating);
        assert_eq!(result.confidence, baseline.confidence);
        assert_eq!(result.total_reviews, baseline.total_reviews);
    }
}

#[test]
fn rounding_edge_is_stable_across_permutations() {
    // Weighted mean sits close to 2.75, where summation order used to decide
    // between 2.7 and 2.8.
    let inputs = vec![
        review(4, -0.6, true, false, 75),
        review(2, -0.9, true, false, 334),
        review(5, -0.9, false, true, 297),
        review(2, -1.0, true, true, 260),
        review(3, -1.0, true, true, 128),
        review(3, -0.6, false, false, 0),
        review(3, -0.6, false, false, 313),
    ];
    let baseline = calculate_weighted_rating(&inputs);
    assert_eq!(baseline.final_rating, 2.8);

    let mut reversed = inputs.clone();
    reversed.reverse();
    assert_eq!(
        calculate_weighted_rating(&reversed).final_rating,
        baseline.final_rating
    );

    for shift in 1..inputs.len() {
        let mut rotated = inputs.clone();
        rotated.rotate_left(shift);
        let result = calculate_weighted_rating(&rotated);
        assert_eq!(result.final_rating, baseline.final_rating, "rotation {shift}");
        assert_eq!(result.total_weight, baseline.total_weight, "rotation {shift}");
    }
}

#[test]
fn rating_stays_within_star_bounds() {
    let inputs = vec![
        with_sentiment(verified_review(9, 0), 1.0),
        with_sentiment(verified_review(-2, 10), -1.0),
        with_sentiment(unverified_review(5, 800), 3.0),
    ];

    for slice in [&inputs[..1], &inputs[1..2], &inputs[..]] {
        let result = calculate_weighted_rating(slice);
        assert!(
            (1.0..=5.0).contains(&result.final_rating),
            "rating {} out of bounds",
            result.final_rating
        );
    }
}

#[test]
fn many_low_weight_reviews_cannot_claim_high_confidence() {
    // 60 unverified, ~200-day-old reviews: each weighs about 0.23.
    let inputs: Vec<_> = (0..60).map(|_| unverified_review(5, 200)).collect();

    let result = calculate_weighted_rating(&inputs);

    assert!(result.total_weight <= 20.0);
    assert_ne!(result.confidence, Confidence::High);
    assert_eq!(result.confidence, Confidence::Medium);
}

#[test]
fn fresh_unverified_volume_still_reaches_high_confidence() {
    // 60 same-day unverified reviews weigh 0.5 each, 30 in total, which
    // clears the weight threshold of 20.
    let inputs: Vec<_> = (0..60).map(|_| unverified_review(5, 0)).collect();

    let result = calculate_weighted_rating(&inputs);

    assert!((result.total_weight - 30.0).abs() < 1e-9);
    assert_eq!(result.confidence, Confidence::High);
}

#[test]
fn high_confidence_needs_volume_and_weight() {
    let inputs: Vec<_> = (0..60).map(|_| verified_review(4, 0)).collect();

    let result = calculate_weighted_rating(&inputs);

    assert_eq!(result.confidence, Confidence::High);
    assert_eq!(result.final_rating, 4.0);
}

#[test]
fn eleven_reviews_reach_medium_confidence() {
    let inputs: Vec<_> = (0..11).map(|_| verified_review(4, 0)).collect();
    assert_eq!(
        calculate_weighted_rating(&inputs).confidence,
        Confidence::Medium
    );

    let ten: Vec<_> = (0..10).map(|_| verified_review(4, 0)).collect();
    assert_eq!(calculate_weighted_rating(&ten).confidence, Confidence::Low);
}

#[test]
fn all_abusive_inputs_report_low_confidence() {
    let inputs: Vec<_> = (0..15).map(|day| abusive_review(2, day)).collect();

    let result = calculate_weighted_rating(&inputs);

    assert_eq!(result.confidence, Confidence::Low);
    assert_eq!(result.final_rating, 2.0);
    assert!(result.total_weight > 0.0);
}

#[test]
fn aggregator_honours_custom_policy() {
    let aggregator = RatingAggregator::new(RatingPolicy {
        high_confidence_min_reviews: 5,
        high_confidence_min_weight: 2.0,
        ..policy()
    });
    let inputs: Vec<_> = (0..6).map(|_| verified_review(3, 0)).collect();

    let result = aggregator.aggregate(&inputs);

    assert_eq!(result.confidence, Confidence::High);
    assert_eq!(aggregator.policy().high_confidence_min_reviews, 5);
}
