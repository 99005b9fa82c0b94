use axum::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SocialError {
    #[error("URL is required")]
    MissingInput,

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Navigation timed out after {0} ms")]
    NavigationTimeout(u64),

    #[error("Render process unavailable: {0}")]
    RenderProcessUnavailable(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SocialError {
    /// Status the HTTP layer reports for this error.
    ///
    /// Input problems are the caller's fault; anything that happens once a
    /// render session is involved is an extraction failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            SocialError::MissingInput
            | SocialError::InvalidUrl(_)
            | SocialError::UnsupportedScheme(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, SocialError>;
