//! Market Client — a command-line client for the Alpha Vantage API that prints
//! stock quotes, top movers and market news as terminal tables and plots the
//! global copper price.
//!
//! Usage example (CLI):
//! ```bash
//! ALPHAVANTAGE_API_KEY=... market_client --symbol AAPL --top --news --copper
//! ```
//!
//! The API key may also come from a `.env` file or `--api-key`. Operations run
//! in the order symbol → top → news → copper, one blocking request each.
#![warn(missing_docs)]
mod args;
mod dispatch;
mod render;

use std::io;

use clap::Parser;
use log::debug;
use market_common::ApiConfig;
use market_common::Gateway;
use market_common::MarketClient;
use market_common::MarketError;
use market_common::Result;

use crate::args::{Args, USAGE_HINT};

fn main() -> Result<(), MarketError> {
    init_logger();
    let args = Args::parse();

    if !args.has_action() {
        println!("{}", USAGE_HINT);
        return Ok(());
    }

    let config = ApiConfig::from_env(args.api_key.as_deref())?
        .with_overrides(args.base_url.as_deref(), args.timeout);
    debug!(
        "Using endpoint {} (timeout {}s)",
        config.base_url,
        config.timeout.as_secs()
    );
    let market = MarketClient::new(Gateway::new(config)?);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    dispatch::run(&args, &market, &mut out)
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
