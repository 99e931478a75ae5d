use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("Fetch from record backend failed: {message}")]
    FetchError { message: String },

    #[error("Write to record backend failed: {message}")]
    WriteError { message: String },

    #[error("Logo upload failed: {message}")]
    UploadError { message: String },

    #[error("Unexpected record shape: {message}")]
    DecodeError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Operation '{operation}' is not enabled in this deployment")]
    UnsupportedError { operation: String },
}

impl DeskError {
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::FetchError {
            message: message.into(),
        }
    }

    pub fn write(message: impl Into<String>) -> Self {
        Self::WriteError {
            message: message.into(),
        }
    }

    pub fn upload(message: impl Into<String>) -> Self {
        Self::UploadError {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::DecodeError {
            message: message.into(),
        }
    }

    /// Message shown to the operator. Backend detail is kept; nothing here
    /// is fatal to the process and the action can be retried by hand.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::FetchError { .. } => format!("Could not load sponsor data. {}", self),
            Self::WriteError { .. } => format!("The change was not saved. {}", self),
            Self::UploadError { .. } => format!("The logo could not be uploaded. {}", self),
            Self::UnsupportedError { operation } => {
                format!("'{}' is disabled by the panel configuration", operation)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DeskError>;
