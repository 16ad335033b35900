use detailing_core::pricing::{ModifierType, PricingResult};
use detailing_core::ratings::{
    calculate_weighted_rating, IndicatorPolicy, RatingResult, RatingTrend, ReviewSignal,
};
use serde::Serialize;
use std::fmt::Write;

/// Rating plus trend indicators, as handed back to callers.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RatingReport {
    #[serde(flatten)]
    pub(crate) rating: RatingResult,
    pub(crate) indicators: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) recent_average: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) older_average: Option<f64>,
}

pub(crate) fn build_rating_report(reviews: &[ReviewSignal]) -> RatingReport {
    let rating = calculate_weighted_rating(reviews);
    let trend = RatingTrend::analyze(reviews, &IndicatorPolicy::default());

    RatingReport {
        rating,
        indicators: trend
            .indicators
            .iter()
            .map(|indicator| indicator.label())
            .collect(),
        recent_average: trend.recent_average,
        older_average: trend.older_average,
    }
}

pub(crate) fn render_rating_report(report: &RatingReport) -> String {
    let mut out = String::new();
    let rating = &report.rating;

    if rating.total_reviews == 0 {
        out.push_str("No approved reviews yet");
        return out;
    }

    writeln!(
        out,
        "Rating: {:.1} / 5 ({} confidence, {} review{})",
        rating.final_rating,
        rating.confidence.label(),
        rating.total_reviews,
        if rating.total_reviews == 1 { "" } else { "s" }
    )
    .expect("write rating headline");
    writeln!(out, "Accumulated weight: {:.2}", rating.total_weight).expect("write weight");

    match (report.recent_average, report.older_average) {
        (Some(recent), Some(older)) => {
            writeln!(
                out,
                "Last 30 days: {recent:.2} avg vs {older:.2} avg in the 30-90 day window"
            )
            .expect("write trend");
        }
        (Some(recent), None) => {
            writeln!(out, "Last 30 days: {recent:.2} avg").expect("write trend");
        }
        _ => {}
    }

    if report.indicators.is_empty() {
        out.push_str("Indicators: none");
    } else {
        write!(out, "Indicators: {}", report.indicators.join(", ")).expect("write indicators");
    }

    out
}

pub(crate) fn render_pricing_result(result: &PricingResult) -> String {
    let mut out = String::new();

    writeln!(out, "Base price: {:.0}", result.base_price).expect("write base price");
    if result.applied_rules.is_empty() {
        out.push_str("Applied rules: none\n");
    } else {
        out.push_str("Applied rules\n");
        for rule in &result.applied_rules {
            let modifier = match rule.modifier_type {
                ModifierType::Percentage => {
                    format!("{:+}%", rule.modifier_value)
                }
                ModifierType::Fixed => {
                    format!("{:+}", rule.modifier_value)
                }
            };
            writeln!(
                out,
                "- {} ({}): {}",
                rule.display_name(),
                rule.rule_type,
                modifier
            )
            .expect("write applied rule");
        }
    }

    writeln!(out, "Final price: {}", result.final_price).expect("write final price");
    if result.discount > 0.0 {
        write!(out, "Discount: {:.0}", result.discount).expect("write discount");
    } else if result.discount < 0.0 {
        write!(out, "Surcharge: {:.0}", -result.discount).expect("write surcharge");
    } else {
        out.push_str("No adjustment");
    }

    out
}
