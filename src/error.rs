use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{name} is not a PDF or image")]
    UnsupportedDocument { name: String },
}

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Server responded with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    #[error("Failed to send request: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to start upload worker: {0}")]
    Runtime(#[from] std::io::Error),
}

impl SubmitError {
    /// Text shown to the user: the server's own message when it sent one,
    /// otherwise the error itself.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Rejected {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            other => {
                let text = other.to_string();
                if text.trim().is_empty() {
                    FALLBACK_FAILURE_MESSAGE.to_string()
                } else {
                    text
                }
            }
        }
    }
}

pub const FALLBACK_FAILURE_MESSAGE: &str = "Upload failed.";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{key} is not a valid URL ({value}): {reason}")]
    InvalidUrl {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid {key} value '{value}': expected {expected}")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}
