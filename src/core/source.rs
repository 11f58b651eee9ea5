//! Raw observation source abstraction

use super::quote::{AssetCategory, QueryDate};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Failure fetching observations. Every variant is recoverable by the client.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed for {symbol}: {message}")]
    Transport { symbol: String, message: String },

    #[error("HTTP error: {status} for symbol: {symbol}")]
    Status { symbol: String, status: u16 },

    #[error("Unexpected response for {symbol}: {message}")]
    Shape { symbol: String, message: String },
}

impl FetchError {
    pub fn symbol(&self) -> &str {
        match self {
            FetchError::Transport { symbol, .. }
            | FetchError::Status { symbol, .. }
            | FetchError::Shape { symbol, .. } => symbol,
        }
    }
}

/// One stored price row as the backend returns it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Observation {
    pub symbol: String,
    pub name: String,
    pub price: Decimal,
    #[serde(default, deserialize_with = "lenient_category")]
    pub cat: Option<AssetCategory>,
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "lenient_volume")]
    pub volume: Option<u64>,
}

// Volume is an INTEGER column but can come back as a float or null.
fn lenient_volume<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<f64> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|v| v.is_finite() && *v >= 0.0).map(|v| v.trunc() as u64))
}

// Unknown category codes are kept out of the row rather than failing it; the
// client labels quotes from the request anyway.
fn lenient_category<'de, D>(deserializer: D) -> Result<Option<AssetCategory>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|code| code.parse().ok()))
}

#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Returns up to `days` of observations for `symbol`, oldest first.
    async fn fetch_observations(
        &self,
        symbol: &str,
        days: u32,
        as_of: QueryDate,
    ) -> Result<Vec<Observation>, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_observation_deserialization() {
        let json = r#"{
            "symbol": "AAPL",
            "name": "Apple",
            "price": 178.19,
            "cat": "STK",
            "date": "2024-01-15",
            "volume": 51234000
        }"#;
        let obs: Observation = serde_json::from_str(json).unwrap();
        assert_eq!(obs.symbol, "AAPL");
        assert_eq!(obs.price, dec!(178.19));
        assert_eq!(obs.cat, Some(AssetCategory::Stock));
        assert_eq!(obs.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(obs.volume, Some(51234000));
    }

    #[test]
    fn test_observation_volume_variants() {
        let float_volume = r#"{"symbol":"^NDX","name":"Nasdaq 100","price":15234.18,"cat":"IDX","date":"2024-01-15","volume":1200.0}"#;
        let obs: Observation = serde_json::from_str(float_volume).unwrap();
        assert_eq!(obs.volume, Some(1200));

        let null_volume = r#"{"symbol":"^GSPC","name":"S&P 500","price":4850.25,"cat":"IDX","date":"2024-01-15","volume":null}"#;
        let obs: Observation = serde_json::from_str(null_volume).unwrap();
        assert!(obs.volume.is_none());

        let missing_volume = r#"{"symbol":"^GSPC","name":"S&P 500","price":4850.25,"cat":"IDX","date":"2024-01-15"}"#;
        let obs: Observation = serde_json::from_str(missing_volume).unwrap();
        assert!(obs.volume.is_none());
    }

    #[test]
    fn test_observation_unknown_category_is_absent() {
        let etf = r#"{"symbol":"SPY","name":"SPDR S&P 500","price":476.5,"cat":"ETF","date":"2024-01-15","volume":100}"#;
        let obs: Observation = serde_json::from_str(etf).unwrap();
        assert_eq!(obs.cat, None);
        assert_eq!(obs.price, dec!(476.5));

        let no_cat = r#"{"symbol":"SPY","name":"SPDR S&P 500","price":476.5,"date":"2024-01-15"}"#;
        assert_eq!(serde_json::from_str::<Observation>(no_cat).unwrap().cat, None);

        let index = r#"{"symbol":"^NDX","name":"Nasdaq 100","price":1.0,"cat":"INDEX","date":"2024-01-15"}"#;
        let obs: Observation = serde_json::from_str(index).unwrap();
        assert_eq!(obs.cat, Some(AssetCategory::Index));
    }

    #[test]
    fn test_observation_rejects_bad_date() {
        let json = r#"{"symbol":"AAPL","name":"Apple","price":1.0,"cat":"STK","date":"15/01/2024"}"#;
        assert!(serde_json::from_str::<Observation>(json).is_err());
    }

    #[test]
    fn test_fetch_error_messages() {
        let err = FetchError::Status {
            symbol: "GOOGL".to_string(),
            status: 500,
        };
        assert_eq!(err.to_string(), "HTTP error: 500 for symbol: GOOGL");
        assert_eq!(err.symbol(), "GOOGL");
    }
}
