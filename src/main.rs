use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use compare_tickers::{API_KEY_ENV, AlphaVantage, CompareOptions, Ticker, compare::DEFAULT_OUTPUT, compare_stocks};

/// Fetch fundamentals for a list of tickers and write one comparison row per ticker to CSV
#[derive(Debug, Parser)]
#[command(name = "compare-tickers", version, about, long_about = None)]
struct Cli {
    /// Comma-separated ticker symbols, processed in order
    #[arg(short, long, value_delimiter = ',', default_values = ["MSFT", "AAPL", "NVDA", "AMZN", "META"])]
    tickers: Vec<Ticker>,

    /// Alpha Vantage API key
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    api_key: String,

    /// Pause 61 seconds between tickers to stay under the free tier's 5 calls per minute
    #[arg(long)]
    free_api: bool,

    /// Custom pause between tickers, in seconds
    #[arg(long, conflicts_with = "free_api")]
    pause_secs: Option<u64>,

    /// Output CSV path
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .init();

    let cli = Cli::parse();

    let mut options = CompareOptions::default().output(&cli.output).free_api(cli.free_api);
    if let Some(secs) = cli.pause_secs {
        options = options.pause(Duration::from_secs(secs));
    }

    let client = AlphaVantage::default().with_key(cli.api_key);
    let table = compare_stocks(&client, &cli.tickers, &options)
        .await
        .with_context(|| format!("comparison of {} tickers failed", cli.tickers.len()))?;

    println!("Wrote {} rows to {}", table.len(), cli.output.display());
    Ok(())
}
