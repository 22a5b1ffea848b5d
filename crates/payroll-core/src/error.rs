use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayrollError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid pay period {start} to {end}: {reason}")]
    InvalidPeriod {
        start: NaiveDate,
        end: NaiveDate,
        reason: String,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl PayrollError {
    /// The field that failed validation, if the error is tied to one.
    pub fn field(&self) -> Option<&str> {
        match self {
            PayrollError::InvalidInput { field, .. } => Some(field.as_str()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PayrollError {
    fn from(e: serde_json::Error) -> Self {
        PayrollError::SerializationError(e.to_string())
    }
}
