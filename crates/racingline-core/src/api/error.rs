use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid value for header {0}")]
    InvalidHeader(&'static str),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

/// Schema mismatch in a downloaded snapshot.
///
/// `path` locates the offending value (`events[3].sessions[0]`); `message`
/// is the serde description, which names the missing or mistyped field.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Decode error at {path}: {message}")]
pub struct DecodeError {
    pub path: String,
    pub message: String,
}

/// Maximum length for a decode message carried into logs
const MAX_DECODE_MESSAGE_LENGTH: usize = 300;

impl DecodeError {
    pub fn new(path: impl Into<String>, message: impl std::fmt::Display) -> Self {
        let message = message.to_string();
        let message = if message.len() <= MAX_DECODE_MESSAGE_LENGTH {
            message
        } else {
            let truncated: String = message.chars().take(MAX_DECODE_MESSAGE_LENGTH).collect();
            format!("{}... (truncated)", truncated)
        };
        Self {
            path: path.into(),
            message,
        }
    }
}

/// Why a refresh attempt was abandoned. The store is untouched in every case.
#[derive(Error, Debug)]
pub enum RefreshError {
    #[error("Access key unavailable: {0}")]
    KeyUnavailable(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
