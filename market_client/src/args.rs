//! Command-line arguments for the market client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use std::path::PathBuf;

use clap::Parser;

/// Hint printed when no operation flag is given.
pub const USAGE_HINT: &str = "Please provide either a stock symbol (-s), use the --top (-t) option, \
use the --news (-n) option, or use the --copper (-c) option.";

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(
    version,
    about = "Get stock information, top gainers/losers, market news, or the copper price.",
    long_about = None
)]
pub struct Args {
    /// Stock ticker symbol (e.g., AAPL).
    #[clap(short, long)]
    pub symbol: Option<String>,

    /// Show top gainers and losers.
    #[clap(short, long)]
    pub top: bool,

    /// Show market news and sentiment.
    #[clap(short, long)]
    pub news: bool,

    /// Get the global copper price and plot it.
    #[clap(short, long)]
    pub copper: bool,

    /// API key; overrides ALPHAVANTAGE_API_KEY.
    #[clap(long)]
    pub api_key: Option<String>,

    /// Query endpoint; overrides ALPHAVANTAGE_BASE_URL.
    #[clap(long)]
    pub base_url: Option<String>,

    /// Request timeout in seconds; overrides ALPHAVANTAGE_TIMEOUT_SECS.
    #[clap(long)]
    pub timeout: Option<u64>,

    /// Where the copper chart (SVG) is written.
    #[clap(long, default_value = "copper_price.svg")]
    pub chart_out: PathBuf,

    /// Print plain news titles instead of terminal hyperlinks.
    #[clap(long)]
    pub no_links: bool,
}

impl Args {
    /// `true` if at least one operation flag is present.
    pub fn has_action(&self) -> bool {
        self.symbol.is_some() || self.top || self.news || self.copper
    }
}
