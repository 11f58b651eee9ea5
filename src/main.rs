use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use marketboard::core::QueryDate;
use marketboard::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display market overview, popular stocks and news
    Dashboard {
        /// "latest" or YYYY-MM-DD
        #[arg(long, default_value = "latest")]
        date: QueryDate,
    },
    /// Display market indices
    Indices {
        #[arg(long, default_value = "latest")]
        date: QueryDate,
    },
    /// Display popular stocks
    Stocks {
        #[arg(long, default_value = "latest")]
        date: QueryDate,
    },
    /// Display financial news
    News {
        #[arg(long, default_value = "latest")]
        date: QueryDate,
    },
    /// Display price history for a symbol
    History {
        symbol: String,
        /// Lookback window in days (defaults to the configured history_days)
        #[arg(short, long)]
        days: Option<u32>,
    },
}

impl From<Commands> for marketboard::AppCommand {
    fn from(cmd: Commands) -> marketboard::AppCommand {
        match cmd {
            Commands::Dashboard { date } => marketboard::AppCommand::Dashboard { date },
            Commands::Indices { date } => marketboard::AppCommand::Indices { date },
            Commands::Stocks { date } => marketboard::AppCommand::Stocks { date },
            Commands::News { date } => marketboard::AppCommand::News { date },
            Commands::History { symbol, days } => marketboard::AppCommand::History { symbol, days },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => marketboard::cli::setup::setup(),
        Some(cmd) => marketboard::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
