//! Column-aligned tables for movers and news.
//!
//! Tables are built with `tabled` and written to any `Write` sink, so the
//! binary prints to stdout while tests render into a buffer.
use std::io::Write;

use chrono::NaiveDateTime;
use market_common::MarketError;
use market_common::Result;
use market_common::model::movers::{MoverCategory, MoverRecord, MoversReport};
use market_common::model::news::{Article, NewsFeed};
use serde_json::Value;
use tabled::Table;
use tabled::builder::Builder;
use tabled::settings::Style;

/// Title of the news table.
pub const NEWS_TITLE: &str = "Market News & Sentiment";
/// Notice printed when the feed is absent or empty.
pub const NO_NEWS: &str = "No market news data available.";

const NOT_AVAILABLE: &str = "N/A";

/// Notice for a category without records.
pub fn no_data_notice(category: MoverCategory) -> String {
    format!("No {} data available.", category.title().to_lowercase())
}

/// Builds the table for one mover category.
///
/// Columns come from the first record's keys; a later record without one of
/// them fails with `MarketError::MissingColumn`.
pub fn movers_table(title: &str, records: &[MoverRecord]) -> Result<Table> {
    let mut builder = Builder::default();
    let headers: Vec<String> = match records.first() {
        Some(first) => first.keys().cloned().collect(),
        None => Vec::new(),
    };
    builder.push_record(headers.clone());

    for (row, record) in records.iter().enumerate() {
        let mut cells = Vec::with_capacity(headers.len());
        for column in &headers {
            let value = record.get(column).ok_or_else(|| MarketError::MissingColumn {
                table: title.to_string(),
                row,
                column: column.clone(),
            })?;
            cells.push(cell_text(value));
        }
        builder.push_record(cells);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    Ok(table)
}

/// Writes the gainers, losers and most-active tables in that order.
pub fn render_movers<W: Write>(out: &mut W, report: &MoversReport) -> Result<()> {
    for category in MoverCategory::ALL {
        match report.records(category) {
            Some(records) if !records.is_empty() => {
                let table = movers_table(category.title(), records)?;
                writeln!(out, "{}", category.title())?;
                writeln!(out, "{}", table)?;
            }
            _ => writeln!(out, "{}", no_data_notice(category))?,
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Drops every article whose title signature equals the one of the
/// previously kept article. Feed order is preserved.
pub fn dedup_headlines(articles: &[Article]) -> Vec<&Article> {
    let mut kept = Vec::with_capacity(articles.len());
    let mut previous: Option<Vec<String>> = None;

    for article in articles {
        let signature = article.title_signature();
        if previous.as_ref() == Some(&signature) {
            continue;
        }
        previous = Some(signature);
        kept.push(article);
    }
    kept
}

/// Shows `YYYYMMDDTHHMMSS` as `YYYY-MM-DD HH:MM:SS`; anything else verbatim.
pub fn format_published(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw, "%Y%m%dT%H%M%S")
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// OSC 8 terminal hyperlink.
pub fn hyperlink(text: &str, url: &str) -> String {
    format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", url, text)
}

/// Builds the news table from the de-duplicated feed.
pub fn news_table(articles: &[Article], links: bool) -> Table {
    let mut builder = Builder::default();
    builder.push_record([
        String::from("Title"),
        String::from("Source"),
        String::from("Time Published"),
    ]);

    for article in dedup_headlines(articles) {
        let title = article.title.as_deref().unwrap_or(NOT_AVAILABLE);
        let title = match (links, article.url.as_deref()) {
            (true, Some(url)) => hyperlink(title, url),
            _ => title.to_string(),
        };
        let published = article
            .time_published
            .as_deref()
            .map(format_published)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        builder.push_record([
            title,
            article.source.as_deref().unwrap_or(NOT_AVAILABLE).to_string(),
            published,
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table
}

/// Writes the news table, or a notice when there is nothing to show.
pub fn render_news<W: Write>(out: &mut W, feed: &NewsFeed, links: bool) -> Result<()> {
    match feed.feed.as_deref() {
        Some(articles) if !articles.is_empty() => {
            writeln!(out, "{}", NEWS_TITLE)?;
            writeln!(out, "{}", news_table(articles, links))?;
        }
        _ => writeln!(out, "{}", NO_NEWS)?,
    }
    Ok(())
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str) -> Article {
        Article {
            title: Some(title.to_string()),
            source: Some(String::from("Wire")),
            time_published: Some(String::from("20240105T143000")),
            url: Some(format!("https://example.com/{}", title.len())),
        }
    }

    fn render_to_string(report: &MoversReport) -> String {
        let mut buf = Vec::new();
        render_movers(&mut buf, report).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn report(json: &str) -> MoversReport {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn near_duplicate_headline_is_suppressed() {
        let feed = [
            article("Fed Raises Interest Rates Again Today"),
            article("Fed Raises Interest Rates Again Now"),
            article("Markets React To Decision"),
        ];
        let kept: Vec<&str> = dedup_headlines(&feed)
            .iter()
            .map(|a| a.title.as_deref().unwrap())
            .collect();
        assert_eq!(
            kept,
            ["Fed Raises Interest Rates Again Today", "Markets React To Decision"]
        );
    }

    #[test]
    fn dedup_is_adjacent_only() {
        let feed = [
            article("Oil prices climb on supply worries"),
            article("Tech stocks slide after earnings"),
            article("OIL PRICES CLIMB ON SUPPLY fears"),
        ];
        assert_eq!(dedup_headlines(&feed).len(), 3);
    }

    #[test]
    fn dedup_compares_against_last_kept_article() {
        let feed = [
            article("a b c d e one"),
            article("a b c d e two"),
            article("a b c d e three"),
            article("x y z"),
        ];
        let kept = dedup_headlines(&feed);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[1].title.as_deref(), Some("x y z"));
    }

    #[test]
    fn untitled_first_article_is_kept() {
        let feed = [Article::default(), Article::default(), article("Something")];
        assert_eq!(dedup_headlines(&feed).len(), 2);
    }

    #[test]
    fn gainers_notice_when_absent_or_empty() {
        for json in [r#"{}"#, r#"{"top_gainers": []}"#] {
            let out = render_to_string(&report(json));
            assert!(out.contains("No top gainers data available."));
            assert!(!out.contains("Top Gainers\n"));
        }
    }

    #[test]
    fn movers_table_uses_first_record_columns_in_order() {
        let out = render_to_string(&report(
            r#"{
                "top_gainers": [
                    {"ticker": "ABCD", "price": "1.23", "change_percentage": "50.1%"},
                    {"ticker": "WXYZ", "price": "4.56", "change_percentage": "40.0%"}
                ],
                "top_losers": [{"ticker": "LOSS", "price": "0.10"}]
            }"#,
        ));
        assert!(out.contains("Top Gainers"));
        assert!(out.contains("Top Losers"));
        assert!(out.contains("No most actively traded data available."));

        let header = out.lines().find(|l| l.contains("ticker")).unwrap();
        let ticker = header.find("ticker").unwrap();
        let price = header.find("price").unwrap();
        let change = header.find("change_percentage").unwrap();
        assert!(ticker < price && price < change);

        let abcd = out.find("ABCD").unwrap();
        let wxyz = out.find("WXYZ").unwrap();
        assert!(abcd < wxyz);
    }

    #[test]
    fn missing_column_in_later_record_is_an_error() {
        let records = report(
            r#"{"top_losers": [{"ticker": "A", "price": "1"}, {"ticker": "B"}]}"#,
        );
        let err = render_movers(&mut Vec::new(), &records).unwrap_err();
        match err {
            MarketError::MissingColumn { table, row, column } => {
                assert_eq!(table, "Top Losers");
                assert_eq!(row, 1);
                assert_eq!(column, "price");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn news_notice_when_feed_absent_or_empty() {
        for feed in [NewsFeed::default(), serde_json::from_str(r#"{"feed": []}"#).unwrap()] {
            let mut buf = Vec::new();
            render_news(&mut buf, &feed, true).unwrap();
            assert_eq!(String::from_utf8(buf).unwrap().trim(), NO_NEWS);
        }
    }

    #[test]
    fn news_rows_show_source_and_formatted_time() {
        let feed = NewsFeed {
            items: None,
            feed: Some(vec![
                article("Fed Raises Interest Rates Again Today"),
                article("Fed Raises Interest Rates Again Now"),
                Article::default(),
            ]),
        };
        let mut buf = Vec::new();
        render_news(&mut buf, &feed, false).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.starts_with(NEWS_TITLE));
        assert!(out.contains("Fed Raises Interest Rates Again Today"));
        assert!(!out.contains("Again Now"));
        assert!(out.contains("2024-01-05 14:30:00"));
        assert!(out.contains("N/A"));
    }

    #[test]
    fn hyperlinks_wrap_titles() {
        assert_eq!(
            hyperlink("Linked", "https://example.com/6"),
            "\x1b]8;;https://example.com/6\x1b\\Linked\x1b]8;;\x1b\\"
        );
        let table = news_table(&[article("Linked")], true).to_string();
        assert!(table.contains("Linked"));
        assert!(table.contains("https://example.com/6"));
    }

    #[test]
    fn publication_time_falls_back_to_raw_text() {
        assert_eq!(format_published("20231231T235959"), "2023-12-31 23:59:59");
        assert_eq!(format_published("yesterday"), "yesterday");
    }
}
