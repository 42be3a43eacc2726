//! options-data CLI
//!
//! Prints one record per option contract for each ticker in a
//! comma-separated list.
//!
//! ```text
//! options-data AAPL,MSFT
//! options-data SPY --format sentence --sort
//! RUST_LOG=debug options-data QQQ,IWM --skip-failed
//! ```

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use options_data::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "options-data", version, about = "Fetch and print option chains for stock tickers")]
struct Args {
    /// Comma-separated ticker symbols, e.g. AAPL,MSFT
    tickers: String,

    /// Row format: dense (comma-separated) or sentence
    #[arg(long, default_value_t = OutputFormat::Dense)]
    format: OutputFormat,

    /// Order each ticker's rows by expiration, strike, then side
    #[arg(long)]
    sort: bool,

    /// Keep going when a ticker fails instead of stopping
    #[arg(long)]
    skip_failed: bool,
}

fn main() -> ExitCode {
    // Rows go to stdout, so logs go to stderr. RUST_LOG overrides the level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(summary) if summary.is_clean() => ExitCode::SUCCESS,
        Ok(summary) => {
            let transport = summary.failed.iter().filter(|(_, e)| e.is_transport()).count();
            eprintln!(
                "options-data: {} of {} tickers failed ({} unreachable)",
                summary.failed.len(),
                summary.failed.len() + summary.succeeded,
                transport
            );
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("options-data: {}: {:#}", failure_kind(&e), e);
            ExitCode::FAILURE
        }
    }
}

/// Short label for a fatal error: endpoint trouble vs. bad data or input
fn failure_kind(err: &anyhow::Error) -> &'static str {
    match err.downcast_ref::<OptionsError>() {
        Some(e) if e.is_transport() => "request failed",
        Some(OptionsError::InvalidInput(_)) => "invalid input",
        Some(_) => "bad response",
        None => "error",
    }
}

fn run(args: &Args) -> Result<BatchSummary> {
    let tickers = parse_tickers(&args.tickers)?;
    let fetcher = ChainFetcher::new(FetchConfig::default()).context("building HTTP client")?;

    let policy = if args.skip_failed {
        FailurePolicy::Skip
    } else {
        FailurePolicy::Abort
    };

    let summary = for_each_ticker(&fetcher, &tickers, policy, |_, mut contracts| {
        if args.sort {
            sort_contracts(&mut contracts);
        }
        for contract in &contracts {
            println!("{}", args.format.render(contract));
        }
    })
    .context("fetching options")?;

    tracing::info!(
        "{} tickers, {} contracts",
        summary.succeeded,
        summary.contracts
    );
    Ok(summary)
}
