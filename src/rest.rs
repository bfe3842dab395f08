//! Fundamentals endpoints
//!
//! Each function returns a [`Fundamentals`] builder that yields the raw JSON
//! body; chain `.typed::<T>()` (or `.as_dataframe()` with the `table` feature)
//! before `.get()` to change the output.
//!
//! ```no_run
//! # use compare_tickers::AlphaVantage;
//! # use compare_tickers::model::AnnualStatement;
//! # async fn example() -> compare_tickers::Result<()> {
//! let client = AlphaVantage::default().with_key("api-key");
//! let income: AnnualStatement = compare_tickers::rest::income_statement(&client, "IBM")
//!     .typed()
//!     .get()
//!     .await?;
//! # Ok(())
//! # }
//! ```

use crate::client::AlphaVantage;
use crate::processor::Raw;
use crate::request::Request;
use crate::request::common::Function;
use crate::request::fundamentals::Fundamentals;

/// Get company overview for a stock
pub fn company_overview<'a, Client: Request>(
    client: &'a AlphaVantage<Client>,
    symbol: impl Into<String>,
) -> Fundamentals<'a, Client, Raw> {
    Fundamentals::new(client, Function::Overview, symbol)
}

/// Get income statements for a stock
pub fn income_statement<'a, Client: Request>(
    client: &'a AlphaVantage<Client>,
    symbol: impl Into<String>,
) -> Fundamentals<'a, Client, Raw> {
    Fundamentals::new(client, Function::IncomeStatement, symbol)
}

/// Get balance sheets for a stock
pub fn balance_sheet<'a, Client: Request>(
    client: &'a AlphaVantage<Client>,
    symbol: impl Into<String>,
) -> Fundamentals<'a, Client, Raw> {
    Fundamentals::new(client, Function::BalanceSheet, symbol)
}

/// Get cash flow statements for a stock
pub fn cash_flow<'a, Client: Request>(
    client: &'a AlphaVantage<Client>,
    symbol: impl Into<String>,
) -> Fundamentals<'a, Client, Raw> {
    Fundamentals::new(client, Function::CashFlow, symbol)
}
