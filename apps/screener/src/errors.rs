use thiserror::Error;

/// Client-level error type.
///
/// `Validation` never reaches the network. `Api` carries the backend's own
/// `detail` when it sent one.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Validation(String),

    #[error("Backend returned status {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Api { status: u16, detail: Option<String> },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// The server-provided detail if there is one, otherwise `fallback`.
    pub fn detail_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self {
            ClientError::Api {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.as_str(),
            ClientError::Validation(msg) => msg.as_str(),
            _ => fallback,
        }
    }
}
