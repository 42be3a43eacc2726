//! Fetch configuration
//!
//! Endpoint URL templates and client settings. The defaults point at the
//! public quote-download and options-chain endpoints with a 2 second timeout.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Placeholder replaced by the ticker in both URL templates
pub const TICKER_PLACEHOLDER: &str = "{ticker}";
/// Placeholder replaced by the request id in the chain URL template
pub const REQ_ID_PLACEHOLDER: &str = "{req_id}";

pub const DEFAULT_QUOTE_URL: &str = "https://query1.finance.yahoo.com/v7/finance/download/{ticker}";
pub const DEFAULT_CHAIN_URL: &str =
    "https://www.optionsprofitcalculator.com/ajax/getOptions?stock={ticker}&reqId={req_id}";

/// Endpoint and client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// CSV quote endpoint, must contain `{ticker}`
    pub quote_url: String,
    /// JSON chain endpoint, must contain `{ticker}`; `{req_id}` is optional
    pub chain_url: String,
    /// Opaque request id the chain endpoint expects
    pub request_id: u32,
    /// Client-side timeout applied to every request
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            quote_url: DEFAULT_QUOTE_URL.to_string(),
            chain_url: DEFAULT_CHAIN_URL.to_string(),
            request_id: 1,
            timeout: Duration::from_secs(2),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
        }
    }
}

impl FetchConfig {
    pub fn with_quote_url(mut self, template: impl Into<String>) -> Self {
        self.quote_url = template.into();
        self
    }

    pub fn with_chain_url(mut self, template: impl Into<String>) -> Self {
        self.chain_url = template.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Quote download URL for a ticker
    pub fn quote_url_for(&self, ticker: &str) -> String {
        self.quote_url.replace(TICKER_PLACEHOLDER, ticker)
    }

    /// Options chain URL for a ticker
    pub fn chain_url_for(&self, ticker: &str) -> String {
        self.chain_url
            .replace(TICKER_PLACEHOLDER, ticker)
            .replace(REQ_ID_PLACEHOLDER, &self.request_id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_urls() {
        let config = FetchConfig::default();

        assert_eq!(
            config.quote_url_for("SPY"),
            "https://query1.finance.yahoo.com/v7/finance/download/SPY"
        );
        assert_eq!(
            config.chain_url_for("SPY"),
            "https://www.optionsprofitcalculator.com/ajax/getOptions?stock=SPY&reqId=1"
        );
        assert_eq!(config.timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_custom_templates() {
        let config = FetchConfig::default()
            .with_quote_url("http://127.0.0.1:9000/q/{ticker}.csv")
            .with_chain_url("http://127.0.0.1:9000/chain?s={ticker}")
            .with_timeout(Duration::from_millis(250));

        assert_eq!(config.quote_url_for("QQQ"), "http://127.0.0.1:9000/q/QQQ.csv");
        assert_eq!(config.chain_url_for("QQQ"), "http://127.0.0.1:9000/chain?s=QQQ");
        assert_eq!(config.timeout, Duration::from_millis(250));
    }
}
