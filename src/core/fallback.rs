//! Static data shown when the backend cannot be reached, plus the news set,
//! which has no live source.

use super::quote::{AssetCategory, AssetQuote, NewsItem};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const FALLBACK_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2024, 1, 15) {
    Some(date) => date,
    None => panic!("invalid fallback date"),
};

fn quote(
    symbol: &str,
    name: &str,
    price: Decimal,
    change_percent: Decimal,
    category: AssetCategory,
) -> AssetQuote {
    AssetQuote {
        symbol: symbol.to_string(),
        name: name.to_string(),
        price,
        change_percent,
        category,
        date: FALLBACK_DATE,
        volume: None,
    }
}

pub fn market_indices() -> Vec<AssetQuote> {
    vec![
        quote("^GSPC", "S&P 500", dec!(4850.25), dec!(0.85), AssetCategory::Index),
        quote("^NDX", "NASDAQ 100", dec!(15234.18), dec!(1.23), AssetCategory::Index),
    ]
}

pub fn popular_stocks() -> Vec<AssetQuote> {
    vec![
        quote("AAPL", "Apple", dec!(178.19), dec!(2.15), AssetCategory::Stock),
        quote("GOOGL", "Google", dec!(142.68), dec!(-0.85), AssetCategory::Stock),
        quote("MSFT", "Microsoft", dec!(378.85), dec!(1.20), AssetCategory::Stock),
        quote("TSLA", "Tesla", dec!(248.50), dec!(3.45), AssetCategory::Stock),
    ]
}

fn news(headline: &str, summary: &str, source: &str, published_at: &str, category: &str) -> NewsItem {
    NewsItem {
        headline: headline.to_string(),
        summary: summary.to_string(),
        source: source.to_string(),
        published_at: published_at.to_string(),
        category: category.to_string(),
    }
}

pub fn financial_news() -> Vec<NewsItem> {
    vec![
        news(
            "Tesla Reports Strong Q4 Earnings Beat",
            "Tesla exceeded Wall Street expectations with record vehicle deliveries and improved margins across all segments.",
            "Reuters",
            "2 hours ago",
            "Earnings",
        ),
        news(
            "Apple Unveils Revolutionary AI Features",
            "Apple announced significant AI improvements across iOS and macOS, focusing on privacy-first machine learning.",
            "TechCrunch",
            "4 hours ago",
            "Technology",
        ),
        news(
            "Federal Reserve Hints at Rate Changes",
            "Fed officials suggest potential policy shifts following latest inflation data and employment figures.",
            "WSJ",
            "6 hours ago",
            "Policy",
        ),
        news(
            "Microsoft Cloud Revenue Surges 40%",
            "Azure and Office 365 drive record quarterly growth as enterprise adoption accelerates post-pandemic.",
            "CNBC",
            "8 hours ago",
            "Earnings",
        ),
        news(
            "Bitcoin Reaches New Monthly High",
            "Cryptocurrency markets rally on institutional adoption news and regulatory clarity from major economies.",
            "Bloomberg",
            "12 hours ago",
            "Crypto",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_sets_are_stable() {
        let symbols: Vec<_> = popular_stocks().into_iter().map(|q| q.symbol).collect();
        assert_eq!(symbols, vec!["AAPL", "GOOGL", "MSFT", "TSLA"]);
        assert!(popular_stocks().iter().all(|q| q.category == AssetCategory::Stock));

        let symbols: Vec<_> = market_indices().into_iter().map(|q| q.symbol).collect();
        assert_eq!(symbols, vec!["^GSPC", "^NDX"]);
        assert!(market_indices().iter().all(|q| q.category == AssetCategory::Index));
        assert!(market_indices().iter().all(|q| q.date == FALLBACK_DATE));
    }

    #[test]
    fn test_news_set() {
        let items = financial_news();
        assert_eq!(items.len(), 5);
        assert_eq!(items[0].source, "Reuters");
        assert_eq!(items[4].category, "Crypto");
    }
}
