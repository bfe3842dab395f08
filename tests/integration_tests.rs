//! Integration tests against the live Alpha Vantage API
//!
//! These tests make real API calls and should be run sparingly to avoid
//! exhausting API quota. Run with:
//!
//! ```sh
//! cargo test --test integration_tests -- --ignored --test-threads=1
//! ```
//!
//! Ensure ALPHAVANTAGE_API_KEY is set in your environment or .env file.

use compare_tickers::model::{AnnualStatement, Overview};
use compare_tickers::request::common::Function;
use compare_tickers::{AlphaVantage, CompareOptions, Ticker, compare_stocks, fetch_annual_data, rest};

fn setup() -> AlphaVantage {
    AlphaVantage::from_env().expect("ALPHAVANTAGE_API_KEY not found. Set it in .env or environment.")
}

#[tokio::test]
#[ignore]
async fn test_company_overview() {
    let client = setup();

    let overview: Overview = rest::company_overview(&client, "IBM").typed().get().await.unwrap();

    assert_eq!(overview.field("Symbol").unwrap(), "IBM");
    assert!(overview.field("MarketCapitalization").is_ok());
}

#[tokio::test]
#[ignore]
async fn test_income_statement_is_most_recent_first() {
    let client = setup();

    let income: AnnualStatement = rest::income_statement(&client, "IBM").typed().get().await.unwrap();

    assert!(income.len() >= 4, "expected several fiscal years, got {}", income.len());
    income.ensure_most_recent_first(Function::IncomeStatement).unwrap();
}

#[tokio::test]
#[ignore]
async fn test_fetch_annual_data() {
    let client = setup();
    let ticker = Ticker::new("IBM").unwrap();

    let raw = fetch_annual_data(&client, &ticker).await.unwrap();

    assert!(!raw.balance.is_empty());
    assert!(!raw.cash_flow.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_compare_two_tickers_on_free_tier() {
    let client = setup();
    let dir = tempfile::tempdir().unwrap();
    let options = CompareOptions::default()
        .free_api(true)
        .output(dir.path().join("compareTickers.csv"));
    let tickers = vec![Ticker::new("IBM").unwrap(), Ticker::new("MSFT").unwrap()];

    let table = compare_stocks(&client, &tickers, &options).await.unwrap();

    assert_eq!(table.len(), 2);
    assert!(options.output.exists());
}

#[cfg(feature = "table")]
#[tokio::test]
#[ignore]
async fn test_balance_sheet_dataframe() {
    let client = setup();

    let df = rest::balance_sheet(&client, "IBM").as_dataframe().get().await.unwrap();

    assert!(df.height() >= 1);
    assert!(df.width() > 10);
}

#[tokio::test]
async fn test_missing_api_key() {
    let client = AlphaVantage::default();

    let result = rest::company_overview(&client, "IBM").get().await;

    let err = result.expect_err("request without API key should fail");
    assert!(err.to_string().contains("API key"), "error should mention API key: {err}");
}

#[test]
fn test_client_initialization() {
    let client = AlphaVantage::default().with_key("test_key");
    assert_eq!(client.api_key(), Some("test_key"));
}
