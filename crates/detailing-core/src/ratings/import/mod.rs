//! Maps stored review rows into [`ReviewSignal`]s.
//!
//! Missing or loosely-typed fields are defaulted here so the aggregator only
//! ever sees fully-populated signals.

mod parser;

use super::domain::{ReviewSignal, Sentiment, SentimentLabel};
use chrono::{DateTime, Utc};
use parser::{parse_csv_rows, parse_json_rows, parse_timestamp, StoredReview};
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Export format of a review dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewFormat {
    Json,
    Csv,
}

impl ReviewFormat {
    /// Guesses the format from a file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReviewImportError {
    #[error("failed to read review export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid review CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid review JSON data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("row {row}: unrecognised created_at timestamp '{value}'")]
    InvalidTimestamp { row: usize, value: String },
    #[error("row {row}: missing created_at timestamp")]
    MissingTimestamp { row: usize },
}

/// Loads review exports relative to a fixed "now".
pub struct ReviewImporter {
    now: DateTime<Utc>,
}

impl ReviewImporter {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn load_path<P: AsRef<Path>>(
        &self,
        path: P,
        format: ReviewFormat,
    ) -> Result<Vec<ReviewSignal>, ReviewImportError> {
        let file = std::fs::File::open(path)?;
        self.load_reader(file, format)
    }

    pub fn load_reader<R: Read>(
        &self,
        mut reader: R,
        format: ReviewFormat,
    ) -> Result<Vec<ReviewSignal>, ReviewImportError> {
        let rows = match format {
            ReviewFormat::Json => {
                let mut raw = Vec::new();
                reader.read_to_end(&mut raw)?;
                parse_json_rows(&raw)?
            }
            ReviewFormat::Csv => parse_csv_rows(reader)?,
        };

        let total = rows.len();
        let mut signals = Vec::with_capacity(total);
        for row in rows {
            if !is_approved(&row) {
                debug!(row = row.row, status = ?row.status, "skipping unapproved review");
                continue;
            }
            signals.push(self.to_signal(row)?);
        }

        debug!(total, imported = signals.len(), "imported review signals");
        Ok(signals)
    }

    fn to_signal(&self, row: StoredReview) -> Result<ReviewSignal, ReviewImportError> {
        let raw_created = row
            .created_at
            .as_deref()
            .ok_or(ReviewImportError::MissingTimestamp { row: row.row })?;
        let created_at =
            parse_timestamp(raw_created).ok_or_else(|| ReviewImportError::InvalidTimestamp {
                row: row.row,
                value: raw_created.to_string(),
            })?;

        let days_ago = days_between(created_at, self.now);
        let score = row.sentiment_score.filter(|score| score.is_finite()).unwrap_or(0.0);
        let label = match row.sentiment_label.as_deref() {
            Some(raw) => parse_label(raw).unwrap_or_else(|| {
                warn!(row = row.row, label = raw, "unknown sentiment label; deriving from score");
                SentimentLabel::from_score(score)
            }),
            None => SentimentLabel::from_score(score),
        };
        let intensity = row
            .intensity
            .filter(|value| value.is_finite())
            .unwrap_or_else(|| score.abs())
            .clamp(0.0, 1.0);

        Ok(ReviewSignal {
            stars: row.rating,
            sentiment: Sentiment {
                score,
                label,
                themes: row.themes.into_iter().collect(),
                intensity,
                is_abusive: row.flagged,
                is_low_effort: row.is_low_effort,
            },
            is_repeat_customer: row.is_repeat_customer,
            is_verified: row.is_verified,
            days_ago,
        })
    }
}

fn is_approved(row: &StoredReview) -> bool {
    row.status
        .as_deref()
        .map(|status| status.trim().eq_ignore_ascii_case("approved"))
        .unwrap_or(true)
}

fn parse_label(raw: &str) -> Option<SentimentLabel> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "positive" => Some(SentimentLabel::Positive),
        "neutral" | "mixed" => Some(SentimentLabel::Neutral),
        "negative" => Some(SentimentLabel::Negative),
        _ => None,
    }
}

/// Whole days elapsed, floored; future timestamps count as today.
fn days_between(created_at: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    let days = (now - created_at).num_days().max(0);
    u32::try_from(days).unwrap_or(u32::MAX)
}
