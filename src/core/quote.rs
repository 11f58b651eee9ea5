//! Quote, history and news types shared by the client and the front end

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetCategory {
    #[serde(rename = "STK", alias = "STOCK")]
    Stock,
    #[serde(rename = "IDX", alias = "INDEX")]
    Index,
    #[serde(rename = "CMD")]
    Commodity,
    #[serde(rename = "CRY")]
    Crypto,
}

impl Display for AssetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                AssetCategory::Stock => "STK",
                AssetCategory::Index => "IDX",
                AssetCategory::Commodity => "CMD",
                AssetCategory::Crypto => "CRY",
            }
        )
    }
}

impl FromStr for AssetCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "STK" | "STOCK" => Ok(AssetCategory::Stock),
            "IDX" | "INDEX" => Ok(AssetCategory::Index),
            "CMD" => Ok(AssetCategory::Commodity),
            "CRY" => Ok(AssetCategory::Crypto),
            _ => Err(anyhow::anyhow!("Invalid asset category: {}", s)),
        }
    }
}

/// Priced snapshot of one instrument at its latest observation.
///
/// `change_percent` is always derived from the last two observations of the
/// same symbol, never taken from upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetQuote {
    pub symbol: String,
    pub name: String,
    pub price: Decimal,
    pub change_percent: Decimal,
    pub category: AssetCategory,
    pub date: NaiveDate,
    pub volume: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub headline: String,
    pub summary: String,
    pub source: String,
    pub published_at: String,
    pub category: String,
}

/// Symbol requested in a batch, labelled with the category it is displayed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRequest {
    pub symbol: String,
    pub category: AssetCategory,
}

impl SymbolRequest {
    pub fn new(symbol: &str, category: AssetCategory) -> Self {
        Self {
            symbol: symbol.to_string(),
            category,
        }
    }
}

/// Date a consumer asks for. Only `Latest` is guaranteed to be meaningful to
/// the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryDate {
    #[default]
    Latest,
    On(NaiveDate),
}

impl Display for QueryDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryDate::Latest => write!(f, "latest"),
            QueryDate::On(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

impl FromStr for QueryDate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("latest") {
            return Ok(QueryDate::Latest);
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(QueryDate::On)
            .map_err(|e| anyhow::anyhow!("Invalid date '{}': {}", s, e))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    Live,
    Fallback,
}

/// Quotes for one dashboard section. Either entirely live or entirely fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteBatch {
    pub quotes: Vec<AssetQuote>,
    pub origin: DataOrigin,
}

impl QuoteBatch {
    pub fn live(quotes: Vec<AssetQuote>) -> Self {
        Self {
            quotes,
            origin: DataOrigin::Live,
        }
    }

    pub fn fallback(quotes: Vec<AssetQuote>) -> Self {
        Self {
            quotes,
            origin: DataOrigin::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.origin == DataOrigin::Fallback
    }
}
