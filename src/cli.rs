use crate::render::{build_rating_report, render_pricing_result, render_rating_report};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use detailing_core::config::{AppConfig, OutputFormat};
use detailing_core::error::AppError;
use detailing_core::pricing::{load_rules_from_path, QuoteRequest};
use detailing_core::ratings::{ReviewFormat, ReviewImporter};
use detailing_core::telemetry;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "detailing",
    about = "Compute weighted service ratings and dynamic booking prices",
    version
)]
pub(crate) struct Cli {
    /// Emit JSON regardless of APP_OUTPUT
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Aggregate a review export into a weighted rating with trend indicators
    Rating(RatingArgs),
    /// Price a booking slot against a set of pricing rules
    Price(PriceArgs),
}

#[derive(Args, Debug)]
pub(crate) struct RatingArgs {
    /// Review export (JSON array or CSV)
    #[arg(long)]
    pub(crate) reviews: PathBuf,
    /// Export format; inferred from the file extension when omitted
    #[arg(long, value_enum)]
    pub(crate) format: Option<ExportFormat>,
    /// Reference time for review ages (RFC 3339, defaults to now)
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) now: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ExportFormat {
    Json,
    Csv,
}

impl From<ExportFormat> for ReviewFormat {
    fn from(value: ExportFormat) -> Self {
        match value {
            ExportFormat::Json => ReviewFormat::Json,
            ExportFormat::Csv => ReviewFormat::Csv,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct PriceArgs {
    /// JSON array of pricing rule rows
    #[arg(long)]
    pub(crate) rules: PathBuf,
    /// Base price before modifiers
    #[arg(long)]
    pub(crate) base_price: f64,
    /// Booking date (YYYY-MM-DD)
    #[arg(long)]
    pub(crate) date: String,
    /// Booking time (HH:MM)
    #[arg(long)]
    pub(crate) time: String,
    /// Forecast weather condition to match against weather rules
    #[arg(long)]
    pub(crate) weather: Option<String>,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    if cli.json {
        config.output = OutputFormat::Json;
    }

    telemetry::init(&config.telemetry)?;
    info!(?config.environment, "detailing insights starting");

    let rendered = match cli.command {
        Command::Rating(args) => run_rating(args, config.output)?,
        Command::Price(args) => run_price(args, config.output)?,
    };
    println!("{rendered}");
    Ok(())
}

pub(crate) fn run_rating(args: RatingArgs, output: OutputFormat) -> Result<String, AppError> {
    let RatingArgs {
        reviews,
        format,
        now,
    } = args;

    let format = format
        .map(ReviewFormat::from)
        .unwrap_or_else(|| ReviewFormat::from_path(&reviews));
    let now = now.unwrap_or_else(Utc::now);

    let signals = ReviewImporter::new(now).load_path(&reviews, format)?;
    let report = build_rating_report(&signals);
    info!(
        path = %reviews.display(),
        total_reviews = report.rating.total_reviews,
        final_rating = report.rating.final_rating,
        "rating computed"
    );

    match output {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => Ok(render_rating_report(&report)),
    }
}

pub(crate) fn run_price(args: PriceArgs, output: OutputFormat) -> Result<String, AppError> {
    let PriceArgs {
        rules,
        base_price,
        date,
        time,
        weather,
    } = args;

    let request = QuoteRequest::new(base_price, &date, time, weather)?;
    let rules = load_rules_from_path(&rules)?;
    let result = request.price(&rules);
    info!(
        base_price = result.base_price,
        final_price = result.final_price,
        applied = result.applied_rules.len(),
        "price computed"
    );

    match output {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => Ok(render_pricing_result(&result)),
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| format!("failed to parse '{raw}' as an RFC 3339 timestamp ({err})"))
}
