use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Condition family a pricing rule belongs to.
///
/// Unrecognised kinds are retained verbatim and never match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RuleType {
    Weekend,
    PeakHour,
    HighDemand,
    Weather,
    Unknown(String),
}

impl RuleType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Weekend => "weekend",
            Self::PeakHour => "peak_hour",
            Self::HighDemand => "high_demand",
            Self::Weather => "weather",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<String> for RuleType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "weekend" => Self::Weekend,
            "peak_hour" => Self::PeakHour,
            "high_demand" => Self::HighDemand,
            "weather" => Self::Weather,
            _ => Self::Unknown(value),
        }
    }
}

impl From<RuleType> for String {
    fn from(value: RuleType) -> Self {
        match value {
            RuleType::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierType {
    /// `modifier_value` is a signed percentage of the running price.
    Percentage,
    /// `modifier_value` is an absolute currency delta.
    Fixed,
}

/// Rule-type-specific parameters. Fields not understood by the evaluator are
/// kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleConditions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_hour: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_hour: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub always: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Externally owned pricing configuration row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub rule_type: RuleType,
    #[serde(default)]
    pub active: bool,
    pub modifier_type: ModifierType,
    pub modifier_value: f64,
    #[serde(default, deserialize_with = "null_as_default_conditions")]
    pub conditions: RuleConditions,
}

fn null_as_default_conditions<'de, D>(deserializer: D) -> Result<RuleConditions, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RuleConditions>::deserialize(deserializer)?.unwrap_or_default())
}

impl PricingRule {
    pub fn new(rule_type: RuleType, modifier_type: ModifierType, modifier_value: f64) -> Self {
        Self {
            id: None,
            name: None,
            rule_type,
            active: true,
            modifier_type,
            modifier_value,
            conditions: RuleConditions::default(),
        }
    }

    pub fn with_conditions(mut self, conditions: RuleConditions) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Human-readable name, falling back to the rule type.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.rule_type.as_str())
    }
}

/// Outcome of pricing a single booking slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub base_price: f64,
    /// Rounded to whole currency units.
    pub final_price: i64,
    /// Matching rules in the order they were applied.
    pub applied_rules: Vec<PricingRule>,
    /// `base_price - final_price`; negative for a surcharge.
    pub discount: f64,
}
