//! Text rendering of contracts
//!
//! Two presentations:
//! - Dense: one comma-separated record per contract, machine readable
//! - Sentence: short human-readable line with the bid/ask range
//!
//! Prices are fixed to two decimals, counts and timestamps have none.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{OptionsError, OptionsResult};
use super::option::{Contract, OptionType};

/// Number of fields in a dense record
pub const DENSE_FIELDS: usize = 11;

/// Output presentation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    Dense,
    Sentence,
}

impl OutputFormat {
    pub fn render(&self, contract: &Contract) -> String {
        match self {
            OutputFormat::Dense => format_option(contract),
            OutputFormat::Sentence => format_option_sentence(contract),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dense" | "csv" => Ok(OutputFormat::Dense),
            "sentence" | "text" => Ok(OutputFormat::Sentence),
            other => Err(OptionsError::invalid_input(format!(
                "unknown output format {:?} (expected dense or sentence)",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Dense => f.write_str("dense"),
            OutputFormat::Sentence => f.write_str("sentence"),
        }
    }
}

/// Dense record:
/// `time_seen,ticker,underlying,expiration,strike,c|p,bid,ask,last,open_interest,volume`
pub fn format_option(contract: &Contract) -> String {
    let items = [
        contract.time_seen.to_string(),
        contract.underlying_ticker.clone(),
        format!("{:.2}", contract.underlying_price),
        contract.expiration_date.clone(),
        format!("{:.2}", contract.strike_price),
        contract.option_type.letter().to_string(),
        format!("{:.2}", contract.bid_premium),
        format!("{:.2}", contract.ask_premium),
        format!("{:.2}", contract.last_premium),
        contract.open_interest.to_string(),
        contract.volume.to_string(),
    ];
    items.join(",")
}

/// e.g. `AAPL @ 185.20: 2024-01-19 190.00C 1.50 - 1.60`
pub fn format_option_sentence(contract: &Contract) -> String {
    format!(
        "{} @ {:.2}: {} {:.2}{} {:.2} - {:.2}",
        contract.underlying_ticker,
        contract.underlying_price,
        contract.expiration_date,
        contract.strike_price,
        contract.option_type.letter().to_ascii_uppercase(),
        contract.bid_premium,
        contract.ask_premium,
    )
}

/// Decode a dense record produced by [`format_option`]
pub fn parse_option(line: &str) -> OptionsResult<Contract> {
    let fields: Vec<&str> = line.trim().split(',').collect();
    if fields.len() != DENSE_FIELDS {
        return Err(OptionsError::data(format!(
            "dense record has {} fields, expected {}",
            fields.len(),
            DENSE_FIELDS
        )));
    }

    let mut side = fields[5].chars();
    let option_type = match (side.next(), side.next()) {
        (Some(letter), None) => OptionType::from_letter(letter),
        _ => None,
    }
    .ok_or_else(|| OptionsError::data(format!("bad option side {:?}", fields[5])))?;

    Ok(Contract {
        time_seen: int_field(fields[0], "time_seen")?,
        underlying_ticker: fields[1].to_string(),
        underlying_price: float_field(fields[2], "underlying_price")?,
        expiration_date: fields[3].to_string(),
        strike_price: float_field(fields[4], "strike_price")?,
        option_type,
        bid_premium: float_field(fields[6], "bid_premium")?,
        ask_premium: float_field(fields[7], "ask_premium")?,
        last_premium: float_field(fields[8], "last_premium")?,
        open_interest: int_field(fields[9], "open_interest")?,
        volume: int_field(fields[10], "volume")?,
    })
}

fn float_field(raw: &str, name: &str) -> OptionsResult<f64> {
    raw.parse::<f64>()
        .map_err(|e| OptionsError::data(format!("bad {} {:?}: {}", name, raw, e)))
}

fn int_field(raw: &str, name: &str) -> OptionsResult<i64> {
    raw.parse::<i64>()
        .map_err(|e| OptionsError::data(format!("bad {} {:?}: {}", name, raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Contract {
        Contract {
            underlying_ticker: "AAPL".to_string(),
            underlying_price: 185.2049,
            expiration_date: "2024-01-19".to_string(),
            strike_price: 190.0,
            bid_premium: 1.5,
            ask_premium: 1.6,
            last_premium: 1.555,
            open_interest: 1200,
            volume: 37,
            option_type: OptionType::Put,
            time_seen: 1_705_600_000,
        }
    }

    #[test]
    fn test_dense_layout() {
        assert_eq!(
            format_option(&sample()),
            "1705600000,AAPL,185.20,2024-01-19,190.00,p,1.50,1.60,1.55,1200,37"
        );
    }

    #[test]
    fn test_dense_decodes_to_same_fields() {
        let original = sample();
        let decoded = parse_option(&format_option(&original)).unwrap();

        assert_eq!(decoded.time_seen, original.time_seen);
        assert_eq!(decoded.underlying_ticker, original.underlying_ticker);
        assert_eq!(decoded.expiration_date, original.expiration_date);
        assert_eq!(decoded.option_type, original.option_type);
        assert_eq!(decoded.open_interest, original.open_interest);
        assert_eq!(decoded.volume, original.volume);

        // Two-decimal rounding is the only loss
        assert!((decoded.underlying_price - original.underlying_price).abs() <= 0.005);
        assert!((decoded.strike_price - original.strike_price).abs() <= 0.005);
        assert!((decoded.bid_premium - original.bid_premium).abs() <= 0.005);
        assert!((decoded.ask_premium - original.ask_premium).abs() <= 0.005);
        assert!((decoded.last_premium - original.last_premium).abs() <= 0.005);
    }

    #[test]
    fn test_sentence_layout() {
        let mut c = sample();
        c.option_type = OptionType::Call;
        assert_eq!(
            format_option_sentence(&c),
            "AAPL @ 185.20: 2024-01-19 190.00C 1.50 - 1.60"
        );
        assert_eq!(OutputFormat::Sentence.render(&c), format_option_sentence(&c));
        assert_eq!(OutputFormat::Dense.render(&c), format_option(&c));
    }

    #[test]
    fn test_parse_rejects_malformed_records() {
        assert!(matches!(parse_option("1,AAPL,1.00"), Err(OptionsError::Data(_))));
        assert!(matches!(
            parse_option("1,AAPL,1.00,2024-01-19,100.00,x,1,1,1,1,1"),
            Err(OptionsError::Data(_))
        ));
        assert!(matches!(
            parse_option("1,AAPL,abc,2024-01-19,100.00,c,1,1,1,1,1"),
            Err(OptionsError::Data(_))
        ));
        assert!(matches!(
            parse_option("1,AAPL,1.00,2024-01-19,100.00,c,1,1,1,1.5,1"),
            Err(OptionsError::Data(_))
        ));
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("dense".parse::<OutputFormat>().unwrap(), OutputFormat::Dense);
        assert_eq!("Sentence".parse::<OutputFormat>().unwrap(), OutputFormat::Sentence);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default().to_string(), "dense");
    }
}
