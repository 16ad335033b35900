use super::domain::{ModifierType, PricingResult, PricingRule};
use super::rules::{rule_matches, SlotSignals};
use chrono::NaiveDate;
use tracing::{trace, warn};

/// Prices booking slots against a fixed rule set.
#[derive(Debug, Clone, Default)]
pub struct PricingEvaluator {
    rules: Vec<PricingRule>,
}

impl PricingEvaluator {
    pub fn new(rules: Vec<PricingRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[PricingRule] {
        &self.rules
    }

    pub fn quote(
        &self,
        base_price: f64,
        date: NaiveDate,
        time: &str,
        weather: Option<&str>,
    ) -> PricingResult {
        calculate_price(base_price, date, time, weather, &self.rules)
    }
}

/// Applies every active, matching rule to `base_price` in supplied order.
///
/// Each modifier compounds on the running price. No ceiling is enforced on
/// stacked surcharges. A non-finite `base_price` prices to zero with no rules
/// applied.
pub fn calculate_price(
    base_price: f64,
    date: NaiveDate,
    time: &str,
    weather: Option<&str>,
    rules: &[PricingRule],
) -> PricingResult {
    if !base_price.is_finite() {
        warn!(base_price, "refusing to price a non-finite base price");
        return PricingResult {
            base_price: 0.0,
            final_price: 0,
            applied_rules: Vec::new(),
            discount: 0.0,
        };
    }

    let slot = SlotSignals::new(date, time, weather);
    let mut price = base_price;
    let mut applied_rules = Vec::new();

    for rule in rules.iter().filter(|rule| rule.active) {
        if !rule_matches(rule, &slot) {
            continue;
        }
        if !rule.modifier_value.is_finite() {
            warn!(
                rule = rule.display_name(),
                "skipping pricing rule with non-finite modifier"
            );
            continue;
        }

        price = match rule.modifier_type {
            ModifierType::Percentage => price * (1.0 + rule.modifier_value / 100.0),
            ModifierType::Fixed => price + rule.modifier_value,
        };
        trace!(rule = rule.display_name(), price, "applied pricing rule");
        applied_rules.push(rule.clone());
    }

    let final_price = price.round() as i64;

    PricingResult {
        base_price,
        final_price,
        applied_rules,
        discount: base_price - final_price as f64,
    }
}
