use thiserror::Error;

/// Why an upstream fetch produced no usable payload
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("HTTP error! status: {0}")]
    Status(reqwest::StatusCode),

    #[error("invalid JSON body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_decode() {
            FetchError::Decode(err)
        } else {
            FetchError::Network(err)
        }
    }
}
