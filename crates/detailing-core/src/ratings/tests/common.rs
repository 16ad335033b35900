use crate::ratings::domain::{ReviewSignal, Sentiment};
use crate::ratings::RatingPolicy;

pub(super) fn policy() -> RatingPolicy {
    RatingPolicy::default()
}

pub(super) fn verified_review(stars: i32, days_ago: u32) -> ReviewSignal {
    ReviewSignal {
        stars,
        sentiment: Sentiment::neutral(),
        is_repeat_customer: false,
        is_verified: true,
        days_ago,
    }
}

pub(super) fn unverified_review(stars: i32, days_ago: u32) -> ReviewSignal {
    ReviewSignal {
        is_verified: false,
        ..verified_review(stars, days_ago)
    }
}

pub(super) fn abusive_review(stars: i32, days_ago: u32) -> ReviewSignal {
    let mut review = verified_review(stars, days_ago);
    review.sentiment.is_abusive = true;
    review
}

pub(super) fn with_sentiment(mut review: ReviewSignal, score: f64) -> ReviewSignal {
    review.sentiment.score = score;
    review
}

pub(super) fn review(
    stars: i32,
    score: f64,
    is_repeat_customer: bool,
    is_verified: bool,
    days_ago: u32,
) -> ReviewSignal {
    ReviewSignal {
        stars,
        sentiment: Sentiment {
            score,
            ..Sentiment::neutral()
        },
        is_repeat_customer,
        is_verified,
        days_ago,
    }
}
