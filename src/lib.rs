//! Compare company fundamentals from the Alpha Vantage API.
//!
//! For every ticker the crate fetches the company overview and the annual income
//! statement, balance sheet and cash flow, then condenses them into one row:
//! twelve overview fields, the 3-year revenue and COGS growth ratios, and the
//! latest balance-sheet and cash-flow figures. The rows are written to a CSV file.
//!
//! # Quick Start
//!
//! ```no_run
//! use compare_tickers::{AlphaVantage, CompareOptions, Ticker, compare_stocks};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AlphaVantage::default().with_key("your_api_key");
//!     let tickers = vec![Ticker::new("MSFT")?, Ticker::new("AAPL")?];
//!     let options = CompareOptions::default().free_api(true);
//!
//!     let table = compare_stocks(&client, &tickers, &options).await?;
//!     println!("wrote {} rows", table.len());
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - **`hyper`** (default) - Uses [`hyper`](https://docs.rs/hyper) as the HTTP client.
//!
//! - **`reqwest`** - Uses [`reqwest`](https://docs.rs/reqwest) instead.
//!   To use reqwest: `default-features = false, features = ["reqwest"]`.
//!
//! - **`table`** - Adds `.as_dataframe()` to the endpoint builders, returning
//!   [`polars`](https://docs.rs/polars) DataFrames.

#![warn(missing_docs)]

pub mod client;
pub mod compare;
pub mod error;
pub mod execute;
pub mod fetch;
pub mod model;
pub mod processor;
pub mod request;
pub mod response;
pub mod rest;
pub mod transform;

pub use client::{API_KEY_ENV, DEFAULT_BASE_URL};
pub use compare::{CompareOptions, FREE_TIER_PAUSE, collect_rows, compare_stocks};
pub use error::{Error, Result};
pub use fetch::fetch_annual_data;
pub use model::{AnnualStatement, Overview, RawFinancials, ResultRow, ResultTable, Ticker};
pub use request::Request;
pub use response::Response;
pub use transform::{Diagnostic, GrowthError, Metric, Processed, process_data, three_year_growth};

/// The Alpha Vantage API client with the default HTTP client.
///
/// - `reqwest` feature: `reqwest::Client`
/// - `hyper` feature (default): [`HyperClient`](request::HyperClient)
/// - neither: `client::AlphaVantage<YourClient>`
#[cfg(feature = "reqwest")]
pub type AlphaVantage = client::AlphaVantage<reqwest::Client>;

/// The Alpha Vantage API client with the default HTTP client.
///
/// - `reqwest` feature: `reqwest::Client`
/// - `hyper` feature (default): [`HyperClient`](request::HyperClient)
/// - neither: `client::AlphaVantage<YourClient>`
#[cfg(all(feature = "hyper", not(feature = "reqwest")))]
pub type AlphaVantage = client::AlphaVantage<request::HyperClient>;

// Without a bundled transport, re-export the generic client
#[cfg(not(any(feature = "reqwest", feature = "hyper")))]
pub use client::AlphaVantage;
