//! Fetches the four fundamentals tables for one ticker

use crate::client::AlphaVantage;
use crate::error::Result;
use crate::model::{AnnualStatement, Overview, RawFinancials, Ticker};
use crate::request::Request;
use crate::request::common::Function;
use crate::rest;

/// Requests overview, income statement, balance sheet and cash flow for
/// `ticker`, in that order.
///
/// Every error is returned as-is; nothing is retried. Each annual statement
/// is checked to be ordered most recent fiscal year first.
pub async fn fetch_annual_data<C: Request>(client: &AlphaVantage<C>, ticker: &Ticker) -> Result<RawFinancials> {
    let symbol = ticker.as_str();

    let overview: Overview = rest::company_overview(client, symbol).typed().get().await?;
    let income: AnnualStatement = rest::income_statement(client, symbol).typed().get().await?;
    let balance: AnnualStatement = rest::balance_sheet(client, symbol).typed().get().await?;
    let cash_flow: AnnualStatement = rest::cash_flow(client, symbol).typed().get().await?;

    income.ensure_most_recent_first(Function::IncomeStatement)?;
    balance.ensure_most_recent_first(Function::BalanceSheet)?;
    cash_flow.ensure_most_recent_first(Function::CashFlow)?;

    tracing::info!(
        %ticker,
        income_years = income.len(),
        balance_years = balance.len(),
        cash_flow_years = cash_flow.len(),
        "fetched annual data"
    );

    Ok(RawFinancials {
        overview,
        income,
        balance,
        cash_flow,
    })
}
