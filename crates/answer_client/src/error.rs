use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),
}

impl QueryError {
    /// Human-readable description of the failure, if one is available.
    ///
    /// For a non-success response this is the response body; a blank body
    /// carries no description.
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::Server { body, .. } => {
                let body = body.trim();
                (!body.is_empty()).then(|| body.to_string())
            }
            other => Some(other.to_string()),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, QueryError>;
