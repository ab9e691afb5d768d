//! Error types for appointment operations.

use thiserror::Error;

/// Errors that can occur while talking to the appointment store.
#[derive(Error, Debug)]
pub enum AppointmentError {
    #[error("Appointment {0} not found")]
    NotFound(u64),

    #[error("Appointment rejected by the server: {0}")]
    ValidationRejected(String),

    #[error("Could not reach the appointment server: {0}")]
    Transport(String),

    #[error("Unexpected server response: {0}")]
    Unknown(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported page size {0}; choose 5, 10, 25 or 100")]
    InvalidPageSize(usize),

    #[error("Appointment has no id yet; create it instead of updating")]
    Unsaved,

    #[error("Appointment {0} already exists; update it instead of creating")]
    AlreadySaved(u64),
}

impl From<reqwest::Error> for AppointmentError {
    fn from(err: reqwest::Error) -> Self {
        // Response arrived but its body did not parse
        if err.is_decode() {
            AppointmentError::Unknown(err.to_string())
        } else {
            AppointmentError::Transport(err.to_string())
        }
    }
}

/// Result type alias for appointment operations.
pub type AppointmentResult<T> = Result<T, AppointmentError>;
