//! Rule-based dynamic pricing for booking slots.

pub mod domain;
mod evaluator;
pub mod import;
mod rules;

pub use domain::{ModifierType, PricingResult, PricingRule, RuleConditions, RuleType};
pub use evaluator::{calculate_price, PricingEvaluator};
pub use import::{load_rules, load_rules_from_path, PricingImportError, QuoteRequest};
