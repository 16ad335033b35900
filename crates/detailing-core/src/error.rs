use crate::config::ConfigError;
use crate::pricing::PricingImportError;
use crate::ratings::ReviewImportError;
use crate::telemetry::TelemetryError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Serialize(serde_json::Error),
    Reviews(ReviewImportError),
    Pricing(PricingImportError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Serialize(err) => write!(f, "failed to render output: {}", err),
            AppError::Reviews(err) => write!(f, "review import error: {}", err),
            AppError::Pricing(err) => write!(f, "pricing input error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Serialize(err) => Some(err),
            AppError::Reviews(err) => Some(err),
            AppError::Pricing(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

impl From<ReviewImportError> for AppError {
    fn from(value: ReviewImportError) -> Self {
        Self::Reviews(value)
    }
}

impl From<PricingImportError> for AppError {
    fn from(value: PricingImportError) -> Self {
        Self::Pricing(value)
    }
}
