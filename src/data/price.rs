//! Underlying price from the CSV quote-download endpoint
//!
//! The body is `Date,Open,High,Low,Close,Adj Close,Volume` followed by one
//! data row. Splitting the whole body on commas puts the header's last
//! column and the row's date in one token, so the close lands at index 10.

use crate::config::FetchConfig;
use crate::core::{OptionsError, OptionsResult};

use super::http::{HttpClient, HttpFetch};

/// Zero-based comma-split index of the closing price
pub const CLOSE_FIELD_INDEX: usize = 10;

/// Fetches the latest close for a ticker
#[derive(Clone)]
pub struct PriceFetcher<H = HttpClient> {
    http: H,
    config: FetchConfig,
}

impl PriceFetcher<HttpClient> {
    pub fn new(config: FetchConfig) -> OptionsResult<Self> {
        let http = HttpClient::new(&config)?;
        Ok(Self { http, config })
    }
}

impl<H: HttpFetch> PriceFetcher<H> {
    pub fn with_http(http: H, config: FetchConfig) -> Self {
        Self { http, config }
    }

    /// One fresh request per call, nothing is cached
    pub fn get_price_for_ticker(&self, ticker: &str) -> OptionsResult<f64> {
        let url = self.config.quote_url_for(ticker);
        let body = self.http.get_text(&url)?;

        let price = parse_close_price(&body)?;
        tracing::debug!("{} close {}", ticker, price);
        Ok(price)
    }
}

/// Extract the closing price from a quote-download body
pub fn parse_close_price(body: &str) -> OptionsResult<f64> {
    let field = body.split(',').nth(CLOSE_FIELD_INDEX).ok_or_else(|| {
        OptionsError::data(format!(
            "Quote body has fewer than {} fields",
            CLOSE_FIELD_INDEX + 1
        ))
    })?;

    let field = field.trim();
    field
        .parse::<f64>()
        .map_err(|e| OptionsError::data(format!("Failed to parse close {:?}: {}", field, e)))
}
