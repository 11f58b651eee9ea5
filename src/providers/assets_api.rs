use super::util::with_retry;
use crate::core::config::BackendConfig;
use crate::core::quote::QueryDate;
use crate::core::source::{FetchError, MarketDataSource, Observation};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, instrument};

#[derive(Debug, Deserialize)]
struct AssetsResponse {
    data: Vec<Observation>,
}

/// Reads observations from the backend's `/assets` endpoint.
pub struct AssetsApiProvider {
    base_url: String,
    client: reqwest::Client,
    retries: usize,
    retry_delay_ms: u64,
}

impl AssetsApiProvider {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("marketboard/0.1")
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            retries: config.retries,
            retry_delay_ms: config.retry_delay_ms,
        })
    }

    fn assets_url(&self, symbol: &str, days: u32, as_of: QueryDate) -> Result<Url, FetchError> {
        let mut params = vec![
            ("symbol", symbol.to_string()),
            ("days", days.to_string()),
        ];
        if let QueryDate::On(date) = as_of {
            params.push(("dateEnd", date.format("%Y-%m-%d").to_string()));
        }
        Url::parse_with_params(&format!("{}/assets", self.base_url), &params).map_err(|e| {
            FetchError::Transport {
                symbol: symbol.to_string(),
                message: format!("Invalid backend URL {}: {}", self.base_url, e),
            }
        })
    }
}

#[async_trait]
impl MarketDataSource for AssetsApiProvider {
    #[instrument(
        name = "AssetsFetch",
        skip(self),
        fields(symbol = %symbol)
    )]
    async fn fetch_observations(
        &self,
        symbol: &str,
        days: u32,
        as_of: QueryDate,
    ) -> Result<Vec<Observation>, FetchError> {
        let url = self.assets_url(symbol, days, as_of)?;
        debug!("Requesting observations from {}", url);

        let response = with_retry(
            || async {
                self.client
                    .get(url.clone())
                    .send()
                    .await
                    .and_then(|r| r.error_for_status())
            },
            self.retries,
            self.retry_delay_ms,
        )
        .await
        .map_err(|e| match e.status() {
            Some(status) => FetchError::Status {
                symbol: symbol.to_string(),
                status: status.as_u16(),
            },
            None => FetchError::Transport {
                symbol: symbol.to_string(),
                message: e.to_string(),
            },
        })?;

        let text = response.text().await.map_err(|e| FetchError::Transport {
            symbol: symbol.to_string(),
            message: format!("Failed to read response body: {e}"),
        })?;

        let data: AssetsResponse = match serde_json::from_str(&text) {
            Ok(data) => data,
            Err(e) => {
                error!(
                    error = ?e,
                    response = %text,
                    "Failed to parse assets response"
                );
                return Err(FetchError::Shape {
                    symbol: symbol.to_string(),
                    message: e.to_string(),
                });
            }
        };

        debug!(count = data.data.len(), "Received observations");
        Ok(data.data)
    }
}
