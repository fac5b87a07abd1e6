use thiserror::Error;

/// Failure talking to a remote source (comment pages or video search).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        // request URLs carry the API key
        FetchError::Network(err.without_url().to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

/// Non-fatal condition that stops processing of a single video or subject.
/// Callers decide whether to log it; a batch always continues past one.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Diagnostic {
    #[error("could not extract a video id from URL: {url}")]
    UnresolvableUrl { url: String },

    #[error("could not fetch comments for video {video_id}: {message}")]
    FetchFailed { video_id: String, message: String },

    #[error("video search for {query:?} failed: {message}")]
    SearchFailed { query: String, message: String },
}

impl Diagnostic {
    /// Stable machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Diagnostic::UnresolvableUrl { .. } => "unresolvable_url",
            Diagnostic::FetchFailed { .. } => "fetch_failed",
            Diagnostic::SearchFailed { .. } => "search_failed",
        }
    }
}
