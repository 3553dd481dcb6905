use crate::core::registry::Domain;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WizardError {
    #[error("{domain} store used outside its provider (not mounted)")]
    NotMounted { domain: Domain },

    #[error("Step {step} is out of range for {domain} (1..={steps})")]
    StepOutOfRange { domain: Domain, step: i64, steps: u32 },

    #[error("Invalid node id: {value:?}")]
    InvalidId { value: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl WizardError {
    /// Misuse errors signal a wiring defect rather than bad input.
    pub fn is_misuse(&self) -> bool {
        matches!(self, WizardError::NotMounted { .. })
    }
}

pub type Result<T> = std::result::Result<T, WizardError>;
