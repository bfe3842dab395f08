//! The comparison loop: fetch, transform and accumulate, then write once.

use std::path::PathBuf;
use std::time::Duration;

use crate::client::AlphaVantage;
use crate::error::Result;
use crate::fetch::fetch_annual_data;
use crate::model::{ResultTable, Ticker};
use crate::request::Request;
use crate::transform::process_data;

/// Pause between tickers on the free tier. Each ticker costs four calls and
/// the free tier allows five per minute.
pub const FREE_TIER_PAUSE: Duration = Duration::from_secs(61);

/// Default output file, relative to the working directory
pub const DEFAULT_OUTPUT: &str = "compareTickers.csv";

/// Options of a comparison run
#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// Where the CSV is written
    pub output: PathBuf,
    /// Wait between consecutive tickers, if any
    pub pause: Option<Duration>,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            pause: None,
        }
    }
}

impl CompareOptions {
    /// Pace requests for the free API tier
    pub fn free_api(mut self, enabled: bool) -> Self {
        self.pause = enabled.then_some(FREE_TIER_PAUSE);
        self
    }

    /// Set the output path
    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Set a custom pause between tickers
    pub fn pause(mut self, pause: Duration) -> Self {
        self.pause = Some(pause);
        self
    }
}

/// Fetch and shape every ticker, in order, into one table.
///
/// The first error aborts the loop and discards the rows collected so far.
/// When `pause` is set the loop sleeps between tickers but not after the last.
pub async fn collect_rows<C: Request>(
    client: &AlphaVantage<C>,
    tickers: &[Ticker],
    pause: Option<Duration>,
) -> Result<ResultTable> {
    let mut table = ResultTable::new();

    for (i, ticker) in tickers.iter().enumerate() {
        let raw = fetch_annual_data(client, ticker).await?;
        let processed = process_data(&raw.overview, &raw.income, &raw.balance, &raw.cash_flow)?;
        for diagnostic in &processed.diagnostics {
            tracing::warn!(%ticker, column = diagnostic.metric.column(), "{diagnostic}");
        }
        table.push(processed.row);

        if let Some(pause) = pause.filter(|_| i + 1 < tickers.len()) {
            tracing::info!(%ticker, seconds = pause.as_secs(), "pausing for rate limit");
            tokio::time::sleep(pause).await;
        }
    }

    Ok(table)
}

/// Compare `tickers` and write the result to `options.output`.
///
/// The file is only created once every ticker succeeded, so a failed run
/// leaves no output behind.
pub async fn compare_stocks<C: Request>(
    client: &AlphaVantage<C>,
    tickers: &[Ticker],
    options: &CompareOptions,
) -> Result<ResultTable> {
    let table = collect_rows(client, tickers, options.pause).await?;
    table.write_csv(&options.output)?;
    tracing::info!(rows = table.len(), output = %options.output.display(), "wrote comparison");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options() {
        let options = CompareOptions::default();
        assert_eq!(options.output, PathBuf::from("compareTickers.csv"));
        assert_eq!(options.pause, None);

        let options = options.free_api(true);
        assert_eq!(options.pause, Some(Duration::from_secs(61)));
        assert_eq!(options.free_api(false).pause, None);
    }
}
