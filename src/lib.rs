//! # options-data
//!
//! Fetches options chains and underlying prices for stock tickers and turns
//! them into flat, normalized contract records.
//!
//! ## Overview
//!
//! Two endpoints are involved:
//! - **Quote download** (CSV): latest close of the underlying
//! - **Options chain** (JSON): expiration -> side -> strike -> quote
//!
//! The chain is flattened into one [`Contract`](crate::core::Contract) per leaf and
//! every contract carries the same underlying close, fetched once per ticker.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use options_data::prelude::*;
//!
//! let fetcher = ChainFetcher::new(FetchConfig::default()).unwrap();
//!
//! for contract in fetcher.get_options_for_ticker("SPY").unwrap() {
//!     println!("{}", format_option(&contract));
//! }
//! ```
//!
//! ## Behavior
//!
//! - Blocking I/O, one request at a time, 2 second timeout per request
//! - No retries and no caching
//! - Any transport or parse failure fails the whole ticker

pub mod batch;
pub mod config;
pub mod core;
pub mod data;

/// Prelude with commonly used types
pub mod prelude {
    pub use crate::batch::{for_each_ticker, parse_tickers, BatchSummary, FailurePolicy, OptionsSource};
    pub use crate::config::FetchConfig;
    pub use crate::core::{
        format_option, format_option_sentence, parse_option, sort_contracts, Contract,
        OptionType, OptionsError, OptionsResult, OutputFormat,
    };
    pub use crate::data::{
        build_contracts, parse_chain, parse_close_price, ChainFetcher, ChainLeaf, HttpClient,
        HttpFetch, PriceFetcher, RawChainResponse, RawQuote,
    };
}

// Re-export main types at crate root
pub use crate::core::{Contract, OptionType, OptionsError, OptionsResult};
pub use crate::data::{ChainFetcher, PriceFetcher};
