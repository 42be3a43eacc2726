//! Error types for options-data

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("Data error: {0}")]
    Data(String),

    #[error("Invalid strike {strike:?} for {ticker}")]
    InvalidStrike { ticker: String, strike: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type OptionsResult<T> = Result<T, OptionsError>;

impl OptionsError {
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Transport-level failure (connect, timeout, bad status)
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            OptionsError::Network(_) | OptionsError::Timeout(_) | OptionsError::Http { .. }
        )
    }
}

impl From<reqwest::Error> for OptionsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            OptionsError::Timeout(err.to_string())
        } else {
            OptionsError::Network(err.to_string())
        }
    }
}
