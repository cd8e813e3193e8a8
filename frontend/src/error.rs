use thiserror::Error;

/// Failure of a call against the expenses service
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("server responded {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse response: {0}")]
    Decode(String),

    #[error("failed to serialize request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Short text for the failure banner
    pub fn summary(&self) -> String {
        match self {
            ApiError::Network(_) => "the expenses service could not be reached".to_string(),
            ApiError::Status { status, .. } => format!("the expenses service answered {}", status),
            ApiError::Decode(_) => "the expenses service sent an unexpected response".to_string(),
            ApiError::Encode(_) => "the request could not be prepared".to_string(),
        }
    }
}
