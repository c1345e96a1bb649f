//! `TOP_GAINERS_LOSERS` response.
use serde::Deserialize;
use serde_json::{Map, Value};

/// One mover row. Key order is kept as received, so the first record of a
/// category defines the column order of its table.
pub type MoverRecord = Map<String, Value>;

/// Gainers, losers and most actively traded tickers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MoversReport {
    /// Free-text description of the data set.
    pub metadata: Option<String>,
    /// Timestamp of the last refresh, as sent.
    pub last_updated: Option<String>,
    /// Biggest gainers, in API order.
    pub top_gainers: Option<Vec<MoverRecord>>,
    /// Biggest losers, in API order.
    pub top_losers: Option<Vec<MoverRecord>>,
    /// Most actively traded, in API order.
    pub most_actively_traded: Option<Vec<MoverRecord>>,
}

/// The three mover categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoverCategory {
    /// `top_gainers`
    TopGainers,
    /// `top_losers`
    TopLosers,
    /// `most_actively_traded`
    MostActivelyTraded,
}

impl MoverCategory {
    /// All categories in the order they are shown.
    pub const ALL: [MoverCategory; 3] = [
        MoverCategory::TopGainers,
        MoverCategory::TopLosers,
        MoverCategory::MostActivelyTraded,
    ];

    /// Table title.
    pub fn title(self) -> &'static str {
        match self {
            MoverCategory::TopGainers => "Top Gainers",
            MoverCategory::TopLosers => "Top Losers",
            MoverCategory::MostActivelyTraded => "Most Actively Traded",
        }
    }
}

impl MoversReport {
    /// Records of one category; `None` when the key is absent.
    pub fn records(&self, category: MoverCategory) -> Option<&[MoverRecord]> {
        match category {
            MoverCategory::TopGainers => self.top_gainers.as_deref(),
            MoverCategory::TopLosers => self.top_losers.as_deref(),
            MoverCategory::MostActivelyTraded => self.most_actively_traded.as_deref(),
        }
    }
}
