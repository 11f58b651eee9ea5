pub mod cli;
pub mod core;
pub mod providers;

use crate::core::{AppConfig, MarketDataClient, QueryDate};
use anyhow::Result;
use providers::AssetsApiProvider;
use tracing::{debug, info};

pub enum AppCommand {
    Dashboard { date: QueryDate },
    Indices { date: QueryDate },
    Stocks { date: QueryDate },
    News { date: QueryDate },
    History { symbol: String, days: Option<u32> },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Market dashboard starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let source = AssetsApiProvider::new(&config.backend)?;
    let client = MarketDataClient::from_config(source, &config);

    match command {
        AppCommand::Dashboard { date } => cli::dashboard::show_dashboard(&client, date).await,
        AppCommand::Indices { date } => cli::dashboard::show_indices(&client, date).await,
        AppCommand::Stocks { date } => cli::dashboard::show_stocks(&client, date).await,
        AppCommand::News { date } => cli::dashboard::show_news(&client, date).await,
        AppCommand::History { symbol, days } => {
            let days = days.unwrap_or(config.history_days);
            cli::dashboard::show_history(&client, &symbol, days).await
        }
    }
    Ok(())
}
