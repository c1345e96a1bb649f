//! Typed accessors, one per API function.
//!
//! Each accessor issues exactly one gateway request and returns `None` when
//! the gateway fails or the body does not match the expected model.
use crate::function::{Function, MONTHLY};
use crate::gateway::{Gateway, HttpTransport, Transport};
use crate::model::commodity::CommoditySeries;
use crate::model::movers::MoversReport;
use crate::model::news::NewsFeed;
use crate::model::quote::GlobalQuoteResponse;

/// Stateless accessor set over a [`Gateway`].
pub struct MarketClient<T: Transport = HttpTransport> {
    gateway: Gateway<T>,
}

impl<T: Transport> MarketClient<T> {
    /// Wraps a configured gateway.
    pub fn new(gateway: Gateway<T>) -> Self {
        MarketClient { gateway }
    }

    /// Gateway the accessors send through.
    pub fn gateway(&self) -> &Gateway<T> {
        &self.gateway
    }

    /// Current price of `symbol` as sent by the API (e.g. `"189.8400"`).
    pub fn get_price(&self, symbol: &str) -> Option<String> {
        self.gateway
            .request_as::<GlobalQuoteResponse>(Function::GlobalQuote, &[("symbol", symbol)])?
            .price()
            .map(str::to_string)
    }

    /// Top gainers, losers and most actively traded tickers.
    pub fn get_top_gainers_losers(&self) -> Option<MoversReport> {
        self.gateway.request_as(Function::TopGainersLosers, &[])
    }

    /// Market news and sentiment feed.
    pub fn get_market_news(&self) -> Option<NewsFeed> {
        self.gateway.request_as(Function::NewsSentiment, &[])
    }

    /// Global copper price, monthly interval.
    pub fn get_copper_price(&self) -> Option<CommoditySeries> {
        self.gateway
            .request_as(Function::Copper, &[("interval", MONTHLY)])
    }
}
