use super::domain::{PricingRule, RuleType};
use chrono::{Datelike, NaiveDate};

pub(crate) const DEFAULT_HOUR: u32 = 12;
pub(crate) const DEFAULT_PEAK_START: u32 = 10;
pub(crate) const DEFAULT_PEAK_END: u32 = 14;

/// Booking slot attributes the rule predicates look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SlotSignals<'a> {
    /// 0 = Sunday .. 6 = Saturday.
    pub day_of_week: u32,
    pub hour: u32,
    pub weather: Option<&'a str>,
}

impl<'a> SlotSignals<'a> {
    pub(crate) fn new(date: NaiveDate, time: &str, weather: Option<&'a str>) -> Self {
        Self {
            day_of_week: date.weekday().num_days_from_sunday(),
            hour: parse_hour(time),
            weather,
        }
    }
}

/// Leading hour of an `HH:MM` string, or [`DEFAULT_HOUR`] when unreadable.
pub(crate) fn parse_hour(time: &str) -> u32 {
    time.trim()
        .split(':')
        .next()
        .and_then(|hour| hour.trim().parse::<u32>().ok())
        .unwrap_or(DEFAULT_HOUR)
}

pub(crate) fn rule_matches(rule: &PricingRule, slot: &SlotSignals<'_>) -> bool {
    let conditions = &rule.conditions;
    match &rule.rule_type {
        RuleType::Weekend => matches!(slot.day_of_week, 0 | 6),
        RuleType::PeakHour => {
            let start = conditions.start_hour.unwrap_or(DEFAULT_PEAK_START);
            let end = conditions.end_hour.unwrap_or(DEFAULT_PEAK_END);
            start <= slot.hour && slot.hour < end
        }
        RuleType::HighDemand => conditions.always == Some(true),
        RuleType::Weather => match (conditions.weather.as_deref(), slot.weather) {
            (Some(expected), Some(actual)) => expected == actual,
            _ => false,
        },
        RuleType::Unknown(_) => false,
    }
}
