use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Normalised review row, independent of the export format it came from.
#[derive(Debug)]
pub(crate) struct StoredReview {
    pub(crate) row: usize,
    pub(crate) rating: i32,
    pub(crate) sentiment_score: Option<f64>,
    pub(crate) sentiment_label: Option<String>,
    pub(crate) themes: Vec<String>,
    pub(crate) intensity: Option<f64>,
    pub(crate) is_repeat_customer: bool,
    pub(crate) is_verified: bool,
    pub(crate) flagged: bool,
    pub(crate) is_low_effort: bool,
    pub(crate) status: Option<String>,
    pub(crate) created_at: Option<String>,
}

/// JSON shape of a review row as returned by the storage API.
///
/// Nullable columns arrive as `null`, so every flag is optional here.
/// `themes`, `intensity` and `is_low_effort` may sit at the top level or inside
/// `ai_metadata`; the metadata copy wins.
#[derive(Debug, Deserialize)]
pub(crate) struct JsonReviewRow {
    rating: i32,
    #[serde(default)]
    sentiment_score: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    sentiment_label: Option<String>,
    #[serde(default)]
    ai_metadata: Option<AiMetadata>,
    #[serde(default)]
    themes: Option<Themes>,
    #[serde(default)]
    intensity: Option<f64>,
    #[serde(default)]
    is_low_effort: Option<bool>,
    #[serde(default)]
    is_repeat_customer: Option<bool>,
    #[serde(default)]
    is_verified: Option<bool>,
    #[serde(default)]
    flagged: Option<bool>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    created_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AiMetadata {
    #[serde(default)]
    themes: Option<Themes>,
    #[serde(default)]
    intensity: Option<f64>,
    #[serde(default)]
    is_low_effort: Option<bool>,
}

/// Themes as a JSON list or a `;`-separated string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Themes {
    List(Vec<String>),
    Joined(String),
}

impl Themes {
    fn into_vec(self) -> Vec<String> {
        match self {
            Themes::List(themes) => themes
                .into_iter()
                .map(|theme| theme.trim().to_string())
                .filter(|theme| !theme.is_empty())
                .collect(),
            Themes::Joined(joined) => split_themes(&joined),
        }
    }
}

impl JsonReviewRow {
    pub(crate) fn into_stored(self, row: usize) -> StoredReview {
        let metadata = self.ai_metadata.unwrap_or_default();
        StoredReview {
            row,
            rating: self.rating,
            sentiment_score: self.sentiment_score,
            sentiment_label: self.sentiment_label,
            themes: metadata
                .themes
                .or(self.themes)
                .map(Themes::into_vec)
                .unwrap_or_default(),
            intensity: metadata.intensity.or(self.intensity),
            is_repeat_customer: self.is_repeat_customer.unwrap_or(false),
            is_verified: self.is_verified.unwrap_or(false),
            flagged: self.flagged.unwrap_or(false),
            is_low_effort: metadata
                .is_low_effort
                .or(self.is_low_effort)
                .unwrap_or(false),
            status: self.status,
            created_at: self.created_at,
        }
    }
}

/// Flat CSV export of the reviews table; themes are `;`-separated.
#[derive(Debug, Deserialize)]
pub(crate) struct CsvReviewRow {
    rating: i32,
    #[serde(default)]
    sentiment_score: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    sentiment_label: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    themes: Option<String>,
    #[serde(default)]
    intensity: Option<f64>,
    #[serde(default)]
    is_repeat_customer: Option<bool>,
    #[serde(default)]
    is_verified: Option<bool>,
    #[serde(default)]
    flagged: Option<bool>,
    #[serde(default)]
    is_low_effort: Option<bool>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    created_at: Option<String>,
}

impl CsvReviewRow {
    pub(crate) fn into_stored(self, row: usize) -> StoredReview {
        let themes = self
            .themes
            .map(|joined| split_themes(&joined))
            .unwrap_or_default();

        StoredReview {
            row,
            rating: self.rating,
            sentiment_score: self.sentiment_score,
            sentiment_label: self.sentiment_label,
            themes,
            intensity: self.intensity,
            is_repeat_customer: self.is_repeat_customer.unwrap_or(false),
            is_verified: self.is_verified.unwrap_or(false),
            flagged: self.flagged.unwrap_or(false),
            is_low_effort: self.is_low_effort.unwrap_or(false),
            status: self.status,
            created_at: self.created_at,
        }
    }
}

pub(crate) fn parse_json_rows(raw: &[u8]) -> Result<Vec<StoredReview>, serde_json::Error> {
    let rows: Vec<JsonReviewRow> = serde_json::from_slice(raw)?;
    Ok(rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| row.into_stored(index + 1))
        .collect())
}

pub(crate) fn parse_csv_rows<R: std::io::Read>(
    reader: R,
) -> Result<Vec<StoredReview>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for (index, record) in csv_reader.deserialize::<CsvReviewRow>().enumerate() {
        rows.push(record?.into_stored(index + 1));
    }

    Ok(rows)
}

fn split_themes(joined: &str) -> Vec<String> {
    joined
        .split(';')
        .map(str::trim)
        .filter(|theme| !theme.is_empty())
        .map(str::to_string)
        .collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Accepts RFC 3339, Postgres-style `YYYY-MM-DD HH:MM:SS+00`, naive
/// timestamps (taken as UTC) and bare dates.
pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
