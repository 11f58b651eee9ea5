//! Market data types, the observation source abstraction and the client

pub mod change;
pub mod client;
pub mod config;
pub mod fallback;
pub mod log;
pub mod quote;
pub mod source;

// Re-export main types for cleaner imports
pub use client::MarketDataClient;
pub use config::{AppConfig, BatchPolicy};
pub use quote::{
    AssetCategory, AssetQuote, DataOrigin, HistoryPoint, NewsItem, QueryDate, QuoteBatch,
    SymbolRequest,
};
pub use source::{FetchError, MarketDataSource, Observation};
