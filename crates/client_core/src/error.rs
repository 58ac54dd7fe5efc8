use thiserror::Error;

/// Failure of a single call to the deck service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("invalid deck service url: {0}")]
    InvalidBaseUrl(String),
    #[error("deck service unreachable: {0}")]
    Transport(String),
    #[error("deck service returned {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    Rejected {
        status: u16,
        message: Option<String>,
    },
    #[error("malformed deck service response: {0}")]
    Decode(String),
}

impl ServiceError {
    /// Message to show the user: the service's own `error` text when it sent one,
    /// otherwise the operation's generic fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ServiceError::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ServiceError::Decode(err.to_string())
        } else {
            ServiceError::Transport(err.to_string())
        }
    }
}
