use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ReaderError {
    #[error("Storage error: {0}")]
    Storage(#[from] SqlxError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File already imported: {0}")]
    AlreadyImported(String),

    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),
}

impl ReaderError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ReaderError::Validation(msg.into())
    }

    /// True when the underlying medium refused the operation.
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, ReaderError::Storage(_))
    }

    /// Text suitable for an alert dialog. Storage details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            ReaderError::Storage(_) => {
                "Your changes could not be saved. Please try again.".to_string()
            }
            ReaderError::NotFound(_) => "File not found!".to_string(),
            ReaderError::Validation(msg) => msg.clone(),
            ReaderError::Io(e) => format!("Unable to load file: {e}"),
            ReaderError::AlreadyImported(_) => "This file has already been imported!".to_string(),
            ReaderError::Config(_) => "The application is misconfigured.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_details_are_hidden_from_users() {
        let err = ReaderError::Storage(SqlxError::PoolClosed);
        assert!(err.is_storage_failure());
        assert!(!err.user_message().contains("pool"));
    }

    #[test]
    fn validation_message_passes_through() {
        let err = ReaderError::validation("The password cannot be empty!");
        assert_eq!(err.user_message(), "The password cannot be empty!");
        assert!(!err.is_storage_failure());
    }
}
