//! Dashboard-facing market data client.
//!
//! Every operation resolves to a value. Source failures are logged here and
//! turned into an absent quote, a dropped batch entry, an empty history or the
//! static fallback set.

use super::change::percent_change;
use super::config::{AppConfig, BatchPolicy};
use super::fallback;
use super::quote::{
    AssetCategory, AssetQuote, HistoryPoint, NewsItem, QueryDate, QuoteBatch, SymbolRequest,
};
use super::source::{FetchError, MarketDataSource, Observation};
use futures::future::join_all;
use tracing::{debug, warn};

pub use super::config::DEFAULT_HISTORY_DAYS;

// Two observations are enough to derive the change.
const QUOTE_LOOKBACK_DAYS: u32 = 2;

pub struct MarketDataClient<S: MarketDataSource> {
    source: S,
    policy: BatchPolicy,
    indices: Vec<SymbolRequest>,
    stocks: Vec<SymbolRequest>,
}

impl<S: MarketDataSource> MarketDataClient<S> {
    /// Client with the default index and stock watchlists.
    pub fn new(source: S, policy: BatchPolicy) -> Self {
        let defaults = AppConfig::default();
        Self {
            source,
            policy,
            indices: defaults.indices,
            stocks: defaults.stocks,
        }
    }

    pub fn from_config(source: S, config: &AppConfig) -> Self {
        Self {
            source,
            policy: config.batch_policy,
            indices: config.indices.clone(),
            stocks: config.stocks.clone(),
        }
    }

    pub fn with_watchlists(mut self, indices: Vec<SymbolRequest>, stocks: Vec<SymbolRequest>) -> Self {
        self.indices = indices;
        self.stocks = stocks;
        self
    }

    async fn try_latest_quote(
        &self,
        symbol: &str,
        category: AssetCategory,
        as_of: QueryDate,
    ) -> Result<Option<AssetQuote>, FetchError> {
        let observations = self
            .source
            .fetch_observations(symbol, QUOTE_LOOKBACK_DAYS, as_of)
            .await?;

        let [.., previous, latest] = observations.as_slice() else {
            debug!(
                symbol,
                count = observations.len(),
                "Not enough observations to derive a change"
            );
            return Ok(None);
        };
        check_adjacent(symbol, previous, latest)?;

        Ok(Some(AssetQuote {
            symbol: latest.symbol.clone(),
            name: latest.name.clone(),
            price: latest.price,
            change_percent: percent_change(latest.price, previous.price),
            category,
            date: latest.date,
            volume: latest.volume,
        }))
    }

    /// Latest quote for `symbol`, or `None` when fewer than two observations
    /// exist or the source fails.
    pub async fn fetch_latest_quote(&self, symbol: &str, category: AssetCategory) -> Option<AssetQuote> {
        self.fetch_latest_quote_as_of(symbol, category, QueryDate::Latest)
            .await
    }

    pub async fn fetch_latest_quote_as_of(
        &self,
        symbol: &str,
        category: AssetCategory,
        as_of: QueryDate,
    ) -> Option<AssetQuote> {
        if symbol.trim().is_empty() {
            warn!(operation = "fetch_latest_quote", "Empty symbol requested");
            return None;
        }
        match self.try_latest_quote(symbol, category, as_of).await {
            Ok(quote) => quote,
            Err(e) => {
                warn!(
                    symbol = e.symbol(),
                    operation = "fetch_latest_quote",
                    error = %e,
                    "Failed to fetch latest quote"
                );
                None
            }
        }
    }

    /// Quotes for `requests` in request order. Symbols without a quote are
    /// handled per the configured [`BatchPolicy`].
    pub async fn fetch_batch(&self, requests: &[SymbolRequest]) -> Vec<AssetQuote> {
        self.fetch_batch_as_of(requests, QueryDate::Latest).await
    }

    pub async fn fetch_batch_as_of(&self, requests: &[SymbolRequest], as_of: QueryDate) -> Vec<AssetQuote> {
        let futures = requests
            .iter()
            .map(|req| self.fetch_latest_quote_as_of(&req.symbol, req.category, as_of));
        let results = join_all(futures).await;

        let missing = results.iter().filter(|q| q.is_none()).count();
        if missing > 0 {
            debug!(
                requested = requests.len(),
                missing,
                policy = ?self.policy,
                "Batch has missing symbols"
            );
            if self.policy == BatchPolicy::AllOrNothing {
                return Vec::new();
            }
        }
        results.into_iter().flatten().collect()
    }

    /// Live quotes, or exactly `fallback` when no live quote could be produced
    /// for a non-empty request. The two are never mixed.
    pub async fn fetch_batch_or_fallback(
        &self,
        requests: &[SymbolRequest],
        as_of: QueryDate,
        fallback: Vec<AssetQuote>,
    ) -> QuoteBatch {
        let quotes = self.fetch_batch_as_of(requests, as_of).await;
        if quotes.is_empty() && !requests.is_empty() {
            warn!(
                requested = requests.len(),
                fallback = fallback.len(),
                "Batch failed, using fallback quotes"
            );
            return QuoteBatch::fallback(fallback);
        }
        QuoteBatch::live(quotes)
    }

    /// Up to `lookback_days` of `(date, price)` points for `symbol`, oldest
    /// first. Empty on any failure. Rows for other symbols are discarded.
    pub async fn fetch_history(&self, symbol: &str, lookback_days: u32) -> Vec<HistoryPoint> {
        if symbol.trim().is_empty() {
            warn!(operation = "fetch_history", "Empty symbol requested");
            return Vec::new();
        }
        let days = lookback_days.max(1);
        match self
            .source
            .fetch_observations(symbol, days, QueryDate::Latest)
            .await
        {
            Ok(observations) => {
                let received = observations.len();
                let points: Vec<_> = observations
                    .into_iter()
                    .filter(|o| o.symbol == symbol)
                    .map(|o| HistoryPoint {
                        date: o.date,
                        price: o.price,
                    })
                    .collect();
                if points.len() < received {
                    warn!(
                        symbol,
                        dropped = received - points.len(),
                        "Ignoring history rows for other symbols"
                    );
                }
                debug!(symbol, points = points.len(), "Fetched history");
                points
            }
            Err(e) => {
                warn!(
                    symbol = e.symbol(),
                    operation = "fetch_history",
                    error = %e,
                    "Failed to fetch history"
                );
                Vec::new()
            }
        }
    }

    pub async fn fetch_news(&self) -> Vec<NewsItem> {
        fallback::financial_news()
    }

    pub async fn market_indices(&self, date: QueryDate) -> QuoteBatch {
        debug!(%date, "Fetching market indices");
        self.fetch_batch_or_fallback(&self.indices, date, fallback::market_indices())
            .await
    }

    pub async fn popular_stocks(&self, date: QueryDate) -> QuoteBatch {
        debug!(%date, "Fetching popular stocks");
        self.fetch_batch_or_fallback(&self.stocks, date, fallback::popular_stocks())
            .await
    }

    pub async fn get_market_indices(&self, date: QueryDate) -> Vec<AssetQuote> {
        self.market_indices(date).await.quotes
    }

    pub async fn get_popular_stocks(&self, date: QueryDate) -> Vec<AssetQuote> {
        self.popular_stocks(date).await.quotes
    }

    pub async fn get_stock_history(&self, symbol: &str, days: u32) -> Vec<HistoryPoint> {
        self.fetch_history(symbol, days).await
    }

    pub async fn get_financial_news(&self, date: QueryDate) -> Vec<NewsItem> {
        debug!(%date, "Returning static financial news");
        self.fetch_news().await
    }
}

fn check_adjacent(symbol: &str, previous: &Observation, latest: &Observation) -> Result<(), FetchError> {
    if previous.symbol != symbol || latest.symbol != symbol {
        return Err(FetchError::Shape {
            symbol: symbol.to_string(),
            message: format!(
                "observations belong to {} and {}",
                previous.symbol, latest.symbol
            ),
        });
    }
    if previous.date >= latest.date {
        return Err(FetchError::Shape {
            symbol: symbol.to_string(),
            message: format!(
                "observations out of order: {} then {}",
                previous.date, latest.date
            ),
        });
    }
    Ok(())
}
