use super::domain::{PricingResult, PricingRule};
use super::evaluator::calculate_price;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum PricingImportError {
    #[error("failed to read pricing rules: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid pricing JSON data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse '{value}' as YYYY-MM-DD")]
    InvalidDate { value: String },
    #[error("{field} must be a finite number")]
    NonFiniteNumber { field: String },
}

/// Reads a JSON array of pricing rule rows.
pub fn load_rules<R: Read>(reader: R) -> Result<Vec<PricingRule>, PricingImportError> {
    let rules: Vec<PricingRule> = serde_json::from_reader(reader)?;
    debug!(
        total = rules.len(),
        active = rules.iter().filter(|rule| rule.active).count(),
        "loaded pricing rules"
    );
    Ok(rules)
}

pub fn load_rules_from_path<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<PricingRule>, PricingImportError> {
    let file = std::fs::File::open(path)?;
    load_rules(std::io::BufReader::new(file))
}

/// Booking slot a caller wants priced.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuoteRequest {
    pub base_price: f64,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    pub time: String,
    #[serde(default)]
    pub weather: Option<String>,
}

impl QuoteRequest {
    pub fn new(
        base_price: f64,
        date: &str,
        time: impl Into<String>,
        weather: Option<String>,
    ) -> Result<Self, PricingImportError> {
        let request = Self {
            base_price,
            date: parse_date(date)?,
            time: time.into(),
            weather,
        };
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<(), PricingImportError> {
        if self.base_price.is_finite() {
            Ok(())
        } else {
            Err(PricingImportError::NonFiniteNumber {
                field: "base_price".to_string(),
            })
        }
    }

    pub fn price(&self, rules: &[PricingRule]) -> PricingResult {
        calculate_price(
            self.base_price,
            self.date,
            &self.time,
            self.weather.as_deref(),
            rules,
        )
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, PricingImportError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        PricingImportError::InvalidDate {
            value: raw.to_string(),
        }
    })
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::domain::{RuleConditions, RuleType};

    #[test]
    fn loads_rule_rows_from_json() {
        let json = r#"[
            { "rule_type": "weekend", "active": true, "modifier_type": "percentage", "modifier_value": 15 },
            { "rule_type": "weather", "active": false, "modifier_type": "fixed", "modifier_value": -50,
              "conditions": { "weather": "rain" } }
        ]"#;

        let rules = load_rules(json.as_bytes()).expect("rules load");

        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].rule_type, RuleType::Weekend);
        assert!(!rules[1].active);
        assert_eq!(rules[1].conditions.weather.as_deref(), Some("rain"));
    }

    #[test]
    fn null_conditions_load_as_empty() {
        let json = r#"[{ "rule_type": "weekend", "active": true, "modifier_type": "percentage",
                         "modifier_value": 20, "conditions": null }]"#;

        let rules = load_rules(json.as_bytes()).expect("null conditions are tolerated");

        assert_eq!(rules[0].conditions, RuleConditions::default());
    }

    #[test]
    fn out_of_range_modifiers_fail_as_json_errors() {
        let json = r#"[{ "rule_type": "weekend", "active": true, "modifier_type": "fixed", "modifier_value": 1e400 }]"#;
        assert!(matches!(
            load_rules(json.as_bytes()),
            Err(PricingImportError::Json(_))
        ));
    }

    #[test]
    fn rejects_rows_with_unknown_modifier_type() {
        let json = r#"[{ "rule_type": "weekend", "active": true, "modifier_type": "multiplier", "modifier_value": 2 }]"#;
        assert!(matches!(
            load_rules(json.as_bytes()),
            Err(PricingImportError::Json(_))
        ));
    }

    #[test]
    fn quote_request_parses_json_body() {
        let json = r#"{ "base_price": 800, "date": "2026-10-17", "time": "11:00", "weather": "sunny" }"#;

        let request: QuoteRequest = serde_json::from_str(json).expect("request parses");

        assert_eq!(request.base_price, 800.0);
        assert_eq!(
            request.date,
            NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid date")
        );
        assert_eq!(request.weather.as_deref(), Some("sunny"));
    }

    #[test]
    fn quote_request_rejects_bad_inputs() {
        assert!(matches!(
            QuoteRequest::new(100.0, "17/10/2026", "10:00", None),
            Err(PricingImportError::InvalidDate { .. })
        ));
        assert!(matches!(
            QuoteRequest::new(f64::NAN, "2026-10-17", "10:00", None),
            Err(PricingImportError::NonFiniteNumber { .. })
        ));
    }
}
