//! Blocking HTTP transport
//!
//! Both fetchers go through [`HttpFetch`] so they can be driven by the real
//! `reqwest` client or by an in-memory stub in tests.

use crate::config::FetchConfig;
use crate::core::{OptionsError, OptionsResult};

/// A single blocking GET returning the response body
pub trait HttpFetch {
    fn get_text(&self, url: &str) -> OptionsResult<String>;
}

/// `reqwest` blocking client with the configured timeout
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::blocking::Client,
}

impl HttpClient {
    pub fn new(config: &FetchConfig) -> OptionsResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| OptionsError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl HttpFetch for HttpClient {
    fn get_text(&self, url: &str) -> OptionsResult<String> {
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(OptionsError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text()?)
    }
}
