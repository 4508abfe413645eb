use thiserror::Error;

/// Reasons the remote classifier could not produce a trusted result
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RemoteError {
    #[error("no API credential configured")]
    MissingCredential,

    #[error("request timed out")]
    Timeout,

    #[error("request failed: {0}")]
    Transport(String),

    #[error("API error: HTTP {status} - {body}")]
    Api { status: u16, body: String },

    #[error("no JSON object found in reply")]
    NoJsonObject,

    #[error("malformed reply: {0}")]
    Malformed(String),
}

impl RemoteError {
    /// Whether re-issuing the same request could succeed
    pub fn is_retryable(&self) -> bool {
        !matches!(self, RemoteError::MissingCredential)
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RemoteError::Timeout
        } else {
            RemoteError::Transport(err.to_string())
        }
    }
}
