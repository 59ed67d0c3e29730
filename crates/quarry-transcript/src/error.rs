#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid service URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("no transcript available for video {0}")]
    NotFound(String),

    #[error("transcript service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("transcript response too large: {0} bytes")]
    TooLarge(usize),

    #[error("{0}")]
    Other(String),
}
