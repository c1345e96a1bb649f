//! `GLOBAL_QUOTE` response.
use serde::Deserialize;

/// Top-level quote response. An unknown symbol yields an empty `Global Quote` object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlobalQuoteResponse {
    /// Quote body.
    #[serde(rename = "Global Quote")]
    pub global_quote: Option<GlobalQuote>,
}

/// Latest trading information for one symbol, verbatim as sent by the API.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlobalQuote {
    #[serde(rename = "01. symbol")]
    pub symbol: Option<String>,
    #[serde(rename = "02. open")]
    pub open: Option<String>,
    #[serde(rename = "03. high")]
    pub high: Option<String>,
    #[serde(rename = "04. low")]
    pub low: Option<String>,
    #[serde(rename = "05. price")]
    pub price: Option<String>,
    #[serde(rename = "06. volume")]
    pub volume: Option<String>,
    #[serde(rename = "07. latest trading day")]
    pub latest_trading_day: Option<String>,
    #[serde(rename = "08. previous close")]
    pub previous_close: Option<String>,
    #[serde(rename = "09. change")]
    pub change: Option<String>,
    #[serde(rename = "10. change percent")]
    pub change_percent: Option<String>,
}

impl GlobalQuoteResponse {
    /// The `05. price` string, if both the quote object and the field exist.
    pub fn price(&self) -> Option<&str> {
        self.global_quote.as_ref()?.price.as_deref()
    }
}
