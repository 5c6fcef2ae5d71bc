use thiserror::Error;

/// Failures of a single HTTP GET issued by the document fetcher.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid proxy URL {proxy:?}: {source}")]
    InvalidProxy {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP request to {url} failed with status code: {status}")]
    Status { url: String, status: u16 },
    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// URL of the request that failed, when the failure belongs to one.
    pub fn url(&self) -> Option<&str> {
        match self {
            FetchError::Request { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Body { url, .. } => Some(url),
            FetchError::InvalidProxy { .. } | FetchError::Client(_) => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Everything that can abort a profile scrape.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("a username or a profile URL is required")]
    MissingTarget,
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("failed to parse document from {url}: {reason}")]
    Parse { url: String, reason: String },
    #[error("failed to fetch profile views: {0}")]
    ProfileViews(#[source] FetchError),
}
