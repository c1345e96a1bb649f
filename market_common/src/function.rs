//! API function selectors understood by the Alpha Vantage query endpoint.

use strum_macros::{Display, EnumString};

/// Interval parameter used for the commodity series.
pub const MONTHLY: &str = "monthly";

/// Value of the `function` query parameter choosing the remote operation.
#[derive(Debug, Clone, Copy, Display, EnumString, Hash, Eq, PartialEq)]
#[strum(ascii_case_insensitive)]
pub enum Function {
    /// Latest price and trading information for one ticker.
    #[strum(serialize = "GLOBAL_QUOTE")]
    GlobalQuote,
    /// Top gainers, losers and most actively traded tickers.
    #[strum(serialize = "TOP_GAINERS_LOSERS")]
    TopGainersLosers,
    /// Market news with sentiment scores.
    #[strum(serialize = "NEWS_SENTIMENT")]
    NewsSentiment,
    /// Global copper price series.
    #[strum(serialize = "COPPER")]
    Copper,
}
