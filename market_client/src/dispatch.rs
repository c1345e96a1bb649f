//! Runs the requested operations in the fixed order symbol → top → news → copper.
//!
//! "No data" outcomes are reported on `out` and never abort the run. Malformed
//! records and output failures are returned to the caller.
use std::io::Write;

use log::debug;
use market_common::Result;
use market_common::gateway::Transport;
use market_common::market::MarketClient;

use crate::args::{Args, USAGE_HINT};
use crate::render::chart::render_commodity_chart;
use crate::render::table::{render_movers, render_news};

/// Executes every operation selected in `args`.
pub fn run<T: Transport, W: Write>(args: &Args, market: &MarketClient<T>, out: &mut W) -> Result<()> {
    if !args.has_action() {
        writeln!(out, "{}", USAGE_HINT)?;
        return Ok(());
    }

    if let Some(symbol) = args.symbol.as_deref() {
        debug!("Fetching quote for {}", symbol);
        match market.get_price(symbol) {
            Some(price) => writeln!(out, "Current Stock Price of {}: {}", symbol, price)?,
            None => writeln!(
                out,
                "Could not retrieve stock price for {}. Please check the symbol and your API key.",
                symbol
            )?,
        }
    }

    if args.top {
        match market.get_top_gainers_losers() {
            Some(report) => render_movers(out, &report)?,
            None => writeln!(out, "Error: Could not retrieve gainers/losers data.")?,
        }
    }

    if args.news {
        let feed = market.get_market_news().unwrap_or_default();
        render_news(out, &feed, !args.no_links)?;
    }

    if args.copper {
        match market.get_copper_price() {
            Some(series) if series.data.is_some() => {
                render_commodity_chart(out, &series, &args.chart_out)?;
            }
            _ => writeln!(out, "Could not retrieve copper price data.")?,
        }
    }

    Ok(())
}
