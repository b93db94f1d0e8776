use thiserror::Error;

/// Errors raised while loading effect files or before an emission is scheduled.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse RON: {0}")]
    Parse(#[from] ron::error::SpannedError),
    /// A sampling range whose lower bound exceeds its upper bound.
    #[error("{field} range inverted: min ({min}) greater than max ({max})")]
    InvertedRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
    #[error("{field} is not a finite number")]
    NonFinite { field: &'static str },
    #[error("unknown effect `{0}`")]
    UnknownEffect(String),
}

impl ConfigError {
    pub(crate) fn inverted(field: &'static str, min: impl Into<f64>, max: impl Into<f64>) -> Self {
        Self::InvertedRange {
            field,
            min: min.into(),
            max: max.into(),
        }
    }
}
