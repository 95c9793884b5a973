use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChoreographyError {
    /// A trigger window or effect that can never run (end at or before start).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The element is not laid out yet. Setup is retried on the next
    /// resize or layout-ready signal.
    #[error("Measurement error: {0}")]
    Measurement(String),
}

impl ChoreographyError {
    pub fn is_measurement(&self) -> bool {
        matches!(self, ChoreographyError::Measurement(_))
    }
}

pub type Result<T> = std::result::Result<T, ChoreographyError>;
