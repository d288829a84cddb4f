use thiserror::Error;

/// Errors that can occur while fetching currency listings.
///
/// The backend never propagates these further: the `Display` text is what
/// lands in the state snapshot's error field.
#[derive(Debug, Error)]
pub enum MarketError {
    /// The HTTP request failed or the response body could not be decoded.
    #[error("listings request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status code.
    #[error("listings provider returned HTTP {status}")]
    Status { status: reqwest::StatusCode },

    /// The configured base URL could not be parsed.
    #[error("invalid listings base url: {0}")]
    InvalidBaseUrl(String),

    /// Generic provider-side failure.
    #[error("{0}")]
    Provider(String),
}

/// Result type for market data operations.
pub type MarketResult<T> = Result<T, MarketError>;
