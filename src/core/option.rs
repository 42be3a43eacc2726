//! Option contract definitions
//!
//! A `Contract` is one flattened leaf of an options chain with the
//! underlying price attached.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    #[default]
    Call,
    Put,
}

impl OptionType {
    /// Map a chain side indicator ("c" / "p") to an option type
    pub fn from_side(side: &str) -> Option<Self> {
        match side {
            "c" => Some(OptionType::Call),
            "p" => Some(OptionType::Put),
            _ => None,
        }
    }

    /// Lowercase side letter used in dense records
    pub fn letter(&self) -> char {
        match self {
            OptionType::Call => 'c',
            OptionType::Put => 'p',
        }
    }

    /// Inverse of [`OptionType::letter`], case-insensitive
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            'c' => Some(OptionType::Call),
            'p' => Some(OptionType::Put),
            _ => None,
        }
    }
}

/// One option contract as seen at `time_seen`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    /// Underlying symbol (e.g., "AAPL")
    pub underlying_ticker: String,
    /// Latest close of the underlying, shared by every contract of a fetch
    pub underlying_price: f64,
    /// Expiration key exactly as the source sent it
    pub expiration_date: String,
    pub strike_price: f64,
    pub bid_premium: f64,
    pub ask_premium: f64,
    pub last_premium: f64,
    pub open_interest: i64,
    pub volume: i64,
    pub option_type: OptionType,
    /// Unix seconds when the chain was fetched
    pub time_seen: i64,
}

/// Sort by expiration, then numeric strike, then calls before puts
pub fn sort_contracts(contracts: &mut [Contract]) {
    contracts.sort_by(|a, b| {
        a.expiration_date
            .cmp(&b.expiration_date)
            .then_with(|| {
                a.strike_price
                    .partial_cmp(&b.strike_price)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| side_rank(a.option_type).cmp(&side_rank(b.option_type)))
    });
}

fn side_rank(option_type: OptionType) -> u8 {
    match option_type {
        OptionType::Call => 0,
        OptionType::Put => 1,
    }
}
