use account_service::{AccountService, AccountServiceConfig};
use clap::{Parser, Subcommand};
use common::decimal::Amount;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Account Service CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Set the log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Commands
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the account service
    Start {
        /// Database URL
        #[arg(short, long)]
        database_url: Option<String>,

        /// Database pool size
        #[arg(short, long)]
        pool_size: Option<u32>,

        /// Daily deposit cap
        #[arg(short = 'c', long)]
        daily_cap: Option<Amount>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "account_service={}",
            cli.log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Start {
            database_url,
            pool_size,
            daily_cap,
        } => {
            // Fill in anything not given on the command line from env vars
            let mut config = AccountServiceConfig::from_env();
            if let Some(url) = database_url {
                config.database_url = url;
            }
            if let Some(size) = pool_size {
                config.db_pool_size = size;
            }
            if let Some(cap) = daily_cap {
                config.daily_deposit_cap = cap;
            }

            info!(
                "Starting account service with database pool size: {}, daily deposit cap: {}",
                config.db_pool_size, config.daily_deposit_cap
            );

            let _service = AccountService::with_config(&config).await?;

            info!("Account service started. Press Ctrl+C to stop.");
            match signal::ctrl_c().await {
                Ok(()) => {
                    info!("Shutting down account service...");
                }
                Err(err) => {
                    error!("Error waiting for Ctrl+C: {}", err);
                }
            }
        }
    }

    Ok(())
}
