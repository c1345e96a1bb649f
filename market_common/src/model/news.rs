//! `NEWS_SENTIMENT` response.
use serde::Deserialize;

/// News feed response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsFeed {
    /// Article count as reported by the API (a string).
    pub items: Option<String>,
    /// Articles in feed order.
    pub feed: Option<Vec<Article>>,
}

/// One article. Every field may be missing; the renderer shows `N/A` instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Article {
    /// Headline.
    pub title: Option<String>,
    /// Publisher name.
    pub source: Option<String>,
    /// Publication time, `YYYYMMDDTHHMMSS`.
    pub time_published: Option<String>,
    /// Link to the article.
    pub url: Option<String>,
}

impl Article {
    /// Lowercased first five whitespace-separated words of the title.
    pub fn title_signature(&self) -> Vec<String> {
        self.title
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
            .take(5)
            .map(str::to_lowercase)
            .collect()
    }
}
