//! Common types used across the fundamentals endpoints
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Alpha Vantage fundamentals function, sent as the `function` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Function {
    /// Company overview (single record)
    Overview,
    /// Annual and quarterly income statements
    IncomeStatement,
    /// Annual and quarterly balance sheets
    BalanceSheet,
    /// Annual and quarterly cash flow statements
    CashFlow,
}

impl Function {
    /// Wire name of the function
    pub fn as_str(&self) -> &'static str {
        match self {
            Function::Overview => "OVERVIEW",
            Function::IncomeStatement => "INCOME_STATEMENT",
            Function::BalanceSheet => "BALANCE_SHEET",
            Function::CashFlow => "CASH_FLOW",
        }
    }
}

impl FromStr for Function {
    type Err = crate::error::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OVERVIEW" => Ok(Function::Overview),
            "INCOME_STATEMENT" => Ok(Function::IncomeStatement),
            "BALANCE_SHEET" => Ok(Function::BalanceSheet),
            "CASH_FLOW" => Ok(Function::CashFlow),
            _ => Err(crate::error::Error::Custom(format!("Invalid function: {s}"))),
        }
    }
}

impl std::fmt::Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query parameters shared by every fundamentals endpoint
#[derive(Debug, Serialize)]
pub(crate) struct Query<'a> {
    pub function: Function,
    pub symbol: &'a str,
    pub apikey: &'a str,
}

impl Query<'_> {
    /// Full request URL against `base_url`
    pub fn to_url(&self, base_url: &str) -> crate::error::Result<String> {
        Ok(format!("{base_url}?{}", serde_urlencoded::to_string(self)?))
    }
}
