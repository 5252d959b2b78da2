use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Content source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Upstream returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Malformed upstream response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for every failure that means "the upstream could not give us a usable answer".
    /// Callers recover from all of these the same way.
    pub fn is_source_failure(&self) -> bool {
        matches!(
            self,
            Error::SourceUnavailable(_)
                | Error::Status { .. }
                | Error::MalformedResponse(_)
                | Error::Http(_)
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Status { status: 404, .. })
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::InvalidUrl(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
