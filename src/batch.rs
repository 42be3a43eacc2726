//! Multi-ticker driver
//!
//! Tickers are processed strictly one after another. A ticker's contracts
//! reach the sink only once its whole fetch has succeeded, so a failure
//! never leaks a partial chain.

use crate::core::{Contract, OptionsError, OptionsResult};
use crate::data::{ChainFetcher, HttpFetch};

/// Anything that can produce the contracts for one ticker
pub trait OptionsSource {
    fn options_for(&self, ticker: &str) -> OptionsResult<Vec<Contract>>;
}

impl<H: HttpFetch> OptionsSource for ChainFetcher<H> {
    fn options_for(&self, ticker: &str) -> OptionsResult<Vec<Contract>> {
        self.get_options_for_ticker(ticker)
    }
}

/// What to do when one ticker fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failing ticker and return its error
    #[default]
    Abort,
    /// Log the failure and move on to the next ticker
    Skip,
}

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub contracts: usize,
    pub failed: Vec<(String, OptionsError)>,
}

impl BatchSummary {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Split a comma-separated ticker argument. Entries are trimmed and empty
/// entries dropped.
pub fn parse_tickers(arg: &str) -> OptionsResult<Vec<String>> {
    let tickers: Vec<String> = arg
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    if tickers.is_empty() {
        return Err(OptionsError::invalid_input("no tickers given"));
    }
    Ok(tickers)
}

/// Fetch each ticker in order and hand its contracts to `sink`
pub fn for_each_ticker<S, F>(
    source: &S,
    tickers: &[String],
    policy: FailurePolicy,
    mut sink: F,
) -> OptionsResult<BatchSummary>
where
    S: OptionsSource,
    F: FnMut(&str, Vec<Contract>),
{
    let mut summary = BatchSummary::default();

    for ticker in tickers {
        match source.options_for(ticker) {
            Ok(contracts) => {
                summary.succeeded += 1;
                summary.contracts += contracts.len();
                sink(ticker, contracts);
            }
            Err(e) => match policy {
                FailurePolicy::Abort => return Err(e),
                FailurePolicy::Skip => {
                    tracing::warn!("Skipping {}: {}", ticker, e);
                    summary.failed.push((ticker.clone(), e));
                }
            },
        }
    }

    Ok(summary)
}
