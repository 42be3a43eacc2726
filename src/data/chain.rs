//! Options chain fetcher
//!
//! The chain endpoint answers with a triple-nested mapping:
//!
//! ```text
//! {"options": {"2024-01-19": {"c": {"100": {"b": 1.5, "a": 1.6, "l": 1.55, "oi": 10, "v": 2}}}}}
//!     expiration -> side -> strike -> quote
//! ```
//!
//! The mapping is decoded into ordered maps, flattened into one
//! [`ChainLeaf`] per quote, and each leaf becomes a [`Contract`] carrying the
//! underlying close from [`PriceFetcher`].

use chrono::Utc;
use serde::de::{Error as DeError, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::config::FetchConfig;
use crate::core::{Contract, OptionType, OptionsError, OptionsResult};

use super::http::{HttpClient, HttpFetch};
use super::price::PriceFetcher;

/// strike key -> quote
pub type StrikeMap = BTreeMap<String, RawQuote>;
/// side indicator -> strikes
pub type SideMap = BTreeMap<String, StrikeMap>;

/// Wire shape of the chain endpoint. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawChainResponse {
    /// expiration -> side -> strike -> quote
    #[serde(default, deserialize_with = "de_options")]
    pub options: BTreeMap<String, SideMap>,
}

/// Quote record at a chain leaf. Missing fields read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawQuote {
    #[serde(rename = "b", default, deserialize_with = "de_f64")]
    pub bid: f64,
    #[serde(rename = "a", default, deserialize_with = "de_f64")]
    pub ask: f64,
    #[serde(rename = "l", default, deserialize_with = "de_f64")]
    pub last: f64,
    #[serde(rename = "oi", default, deserialize_with = "de_i64")]
    pub open_interest: i64,
    #[serde(rename = "v", default, deserialize_with = "de_i64")]
    pub volume: i64,
}

/// One (expiration, side, strike) entry of the chain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainLeaf<'a> {
    pub expiration: &'a str,
    pub side: &'a str,
    pub strike: &'a str,
    pub quote: &'a RawQuote,
}

impl RawChainResponse {
    /// Flatten to leaves ordered by expiration, side, then strike key
    /// (lexicographic on the raw strings)
    pub fn leaves(&self) -> Vec<ChainLeaf<'_>> {
        self.options
            .iter()
            .flat_map(|(expiration, sides)| {
                sides.iter().flat_map(move |(side, strikes)| {
                    strikes.iter().map(move |(strike, quote)| ChainLeaf {
                        expiration: expiration.as_str(),
                        side: side.as_str(),
                        strike: strike.as_str(),
                        quote,
                    })
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.options
            .values()
            .flat_map(|sides| sides.values())
            .map(|strikes| strikes.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Decode a chain endpoint body
pub fn parse_chain(body: &str) -> OptionsResult<RawChainResponse> {
    serde_json::from_str(body)
        .map_err(|e| OptionsError::data(format!("Failed to parse options chain: {}", e)))
}

/// Turn every leaf of `raw` into a contract. Any bad strike key fails the
/// whole batch.
pub fn build_contracts(
    ticker: &str,
    underlying_price: f64,
    time_seen: i64,
    raw: &RawChainResponse,
) -> OptionsResult<Vec<Contract>> {
    raw.leaves()
        .into_iter()
        .map(|leaf| contract_from_leaf(ticker, underlying_price, time_seen, leaf))
        .collect()
}

fn contract_from_leaf(
    ticker: &str,
    underlying_price: f64,
    time_seen: i64,
    leaf: ChainLeaf<'_>,
) -> OptionsResult<Contract> {
    let strike_price = leaf
        .strike
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|strike| strike.is_finite())
        .ok_or_else(|| OptionsError::InvalidStrike {
            ticker: ticker.to_string(),
            strike: leaf.strike.to_string(),
        })?;

    let option_type = OptionType::from_side(leaf.side).unwrap_or_else(|| {
        tracing::warn!(
            "{} {}: unknown side indicator {:?}, treating as call",
            ticker,
            leaf.expiration,
            leaf.side
        );
        OptionType::default()
    });

    Ok(Contract {
        underlying_ticker: ticker.to_string(),
        underlying_price,
        expiration_date: leaf.expiration.to_string(),
        strike_price,
        bid_premium: leaf.quote.bid,
        ask_premium: leaf.quote.ask,
        last_premium: leaf.quote.last,
        open_interest: leaf.quote.open_interest,
        volume: leaf.quote.volume,
        option_type,
        time_seen,
    })
}

/// Fetches a ticker's full chain and attaches the underlying close
#[derive(Clone)]
pub struct ChainFetcher<H = HttpClient> {
    http: H,
    prices: PriceFetcher<H>,
    config: FetchConfig,
}

impl ChainFetcher<HttpClient> {
    /// One HTTP client shared by the chain and price requests
    pub fn new(config: FetchConfig) -> OptionsResult<Self> {
        let http = HttpClient::new(&config)?;
        Ok(Self::with_http(http, config))
    }
}

impl<H: HttpFetch + Clone> ChainFetcher<H> {
    pub fn with_http(http: H, config: FetchConfig) -> Self {
        Self {
            prices: PriceFetcher::with_http(http.clone(), config.clone()),
            http,
            config,
        }
    }
}

impl<H: HttpFetch> ChainFetcher<H> {
    /// Fetch, flatten and price the chain for `ticker`.
    ///
    /// The quote endpoint is hit exactly once, after the chain has decoded.
    /// Any failure returns an error and no contracts.
    pub fn get_options_for_ticker(&self, ticker: &str) -> OptionsResult<Vec<Contract>> {
        let url = self.config.chain_url_for(ticker);
        let body = self.http.get_text(&url)?;
        let raw = parse_chain(&body)?;

        let time_seen = Utc::now().timestamp();
        let underlying_price = self.prices.get_price_for_ticker(ticker)?;

        let contracts = build_contracts(ticker, underlying_price, time_seen, &raw)?;
        tracing::info!(
            "{}: {} contracts across {} expirations",
            ticker,
            contracts.len(),
            raw.options.len()
        );
        Ok(contracts)
    }
}

/// The chain as sent, with `null` allowed at every level
type WireOptions = BTreeMap<String, Option<BTreeMap<String, Option<BTreeMap<String, Option<RawQuote>>>>>>;

/// A `null` expiration or side reads as empty, a `null` quote as all zeros
fn de_options<'de, D>(deserializer: D) -> Result<BTreeMap<String, SideMap>, D::Error>
where
    D: Deserializer<'de>,
{
    let wire = Option::<WireOptions>::deserialize(deserializer)?.unwrap_or_default();

    Ok(wire
        .into_iter()
        .map(|(expiration, sides)| {
            let sides: SideMap = sides
                .unwrap_or_default()
                .into_iter()
                .map(|(side, strikes)| {
                    let strikes: StrikeMap = strikes
                        .unwrap_or_default()
                        .into_iter()
                        .map(|(strike, quote)| (strike, quote.unwrap_or_default()))
                        .collect();
                    (side, strikes)
                })
                .collect();
            (expiration, sides)
        })
        .collect())
}

/// Number, numeric string, or null (as 0.0)
fn de_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    struct NumVisitor;

    impl<'de> Visitor<'de> for NumVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("number or numeric string")
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E> {
            Ok(v)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
            Ok(v as f64)
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v as f64)
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: DeError,
        {
            let v = v.trim();
            if v.is_empty() {
                return Ok(0.0);
            }
            v.parse::<f64>().map_err(DeError::custom)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E> {
            Ok(0.0)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E> {
            Ok(0.0)
        }
    }

    deserializer.deserialize_any(NumVisitor)
}

/// Whole number, integral float, numeric string, or null (as 0)
fn de_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct IntVisitor;

    impl<'de> Visitor<'de> for IntVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("integer or integer string")
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
            Ok(v)
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: DeError,
        {
            i64::try_from(v).map_err(DeError::custom)
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: DeError,
        {
            if v.fract() == 0.0 && v.is_finite() {
                Ok(v as i64)
            } else {
                Err(DeError::custom(format!("expected whole number, got {}", v)))
            }
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: DeError,
        {
            let v = v.trim();
            if v.is_empty() {
                return Ok(0);
            }
            v.parse::<i64>().map_err(DeError::custom)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E> {
            Ok(0)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E> {
            Ok(0)
        }
    }

    deserializer.deserialize_any(IntVisitor)
}
