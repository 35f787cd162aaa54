use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Data service rejected the request ({status}): {message}")]
    ServiceError { status: u16, message: String },

    #[error("Template rendering failed: {0}")]
    RenderError(#[from] askama::Error),

    #[error("Record decoding error: {message}")]
    DecodeError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl SiteError {
    /// The human-readable text shown to a visitor when a write fails.
    pub fn service_message(&self) -> String {
        match self {
            SiteError::ServiceError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SiteError::ConfigError { .. }
                | SiteError::InvalidConfigValueError { .. }
                | SiteError::MissingConfigError { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_message_uses_raw_message() {
        let err = SiteError::ServiceError {
            status: 409,
            message: "duplicate entry".to_string(),
        };
        assert_eq!(err.service_message(), "duplicate entry");
        assert!(err.to_string().contains("409"));
    }

    #[test]
    fn test_service_message_falls_back_to_display() {
        let err = SiteError::DecodeError {
            message: "missing field `id`".to_string(),
        };
        assert_eq!(
            err.service_message(),
            "Record decoding error: missing field `id`"
        );
        assert!(!err.is_config_error());
        assert!(SiteError::MissingConfigError {
            field: "data_service.url".to_string()
        }
        .is_config_error());
    }
}
