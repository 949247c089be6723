use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgrofindError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {}", .detail.as_deref().unwrap_or("sem detalhes"))]
    Api { status: u16, detail: Option<String> },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Session error: {0}")]
    Session(String),
}

impl AgrofindError {
    /// Structured detail sent by the service, when the error response carried one.
    pub fn api_detail(&self) -> Option<&str> {
        match self {
            Self::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AgrofindError>;
