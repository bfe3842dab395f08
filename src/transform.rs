//! Shapes the four fundamentals tables of one ticker into a [`ResultRow`].
//!
//! Two failure policies apply. Overview, balance-sheet and cash-flow lookups
//! are fatal and return [`Error`](crate::Error). Growth ratios are recovered
//! locally: a failed ratio becomes an empty cell plus a [`Diagnostic`] that the
//! caller decides how to report.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::error::Result;
use crate::model::{AnnualStatement, Overview, ResultRow};
use crate::request::common::Function;

/// Overview fields copied into the row, in column order
pub const OVERVIEW_FIELDS: [&str; 12] = [
    "Symbol",
    "Sector",
    "AnalystTargetPrice",
    "MarketCapitalization",
    "RevenueTTM",
    "ReturnOnAssetsTTM",
    "ReturnOnEquityTTM",
    "EBITDA",
    "ProfitMargin",
    "OperatingMarginTTM",
    "GrossProfitTTM",
    "DividendYield",
];

/// Balance-sheet fields taken from the most recent report
pub const BALANCE_FIELDS: [&str; 3] = ["totalAssets", "totalLiabilities", "cashAndShortTermInvestments"];

/// Cash-flow fields taken from the most recent report
pub const CASH_FLOW_FIELDS: [&str; 2] = ["operatingCashflow", "capitalExpenditures"];

/// Reports between the current and the initial value of a growth ratio
const GROWTH_SPAN: usize = 3;

/// Why a growth ratio could not be computed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrowthError {
    /// Fewer than four fiscal years reported
    #[error("need {needed} annual reports, statement has {available}")]
    InsufficientHistory {
        /// Reports required
        needed: usize,
        /// Reports present
        available: usize,
    },

    /// A report lacks the field
    #[error("{field} missing from report {index}")]
    MissingValue {
        /// Field name
        field: &'static str,
        /// Report index, 0 = most recent
        index: usize,
    },

    /// The field does not hold an integer (Alpha Vantage uses `"None"`)
    #[error("{field} in report {index} is not an integer: {value}")]
    NotAnInteger {
        /// Field name
        field: &'static str,
        /// Report index, 0 = most recent
        index: usize,
        /// Offending value
        value: String,
    },

    /// The initial value is zero, so the ratio is undefined
    #[error("{field} three years back is zero")]
    ZeroBase {
        /// Field name
        field: &'static str,
    },

    /// `current - initial` does not fit in an i64
    #[error("{field} difference overflows")]
    Overflow {
        /// Field name
        field: &'static str,
    },
}

/// The two derived growth ratios
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Total revenue
    Revenue,
    /// Cost of goods and services sold
    Cogs,
}

impl Metric {
    /// Income-statement field the ratio is computed over
    pub fn field(&self) -> &'static str {
        match self {
            Metric::Revenue => "totalRevenue",
            Metric::Cogs => "costofGoodsAndServicesSold",
        }
    }

    /// Output column holding the ratio
    pub fn column(&self) -> &'static str {
        match self {
            Metric::Revenue => "RevenueGrowth3YrPct",
            Metric::Cogs => "COGSGrowth3YrPct",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Revenue => f.write_str("revenue growth"),
            Metric::Cogs => f.write_str("cogs growth"),
        }
    }
}

/// A growth ratio that was recorded as absent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Which ratio
    pub metric: Metric,
    /// Why it is absent
    pub error: GrowthError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error calculating {}: {}", self.metric, self.error)
    }
}

/// Output of [`process_data`]
#[derive(Debug, Clone, PartialEq)]
pub struct Processed {
    /// The consolidated row
    pub row: ResultRow,
    /// Growth ratios that were set to absent, with the reason
    pub diagnostics: Vec<Diagnostic>,
}

/// `(current - initial) / initial` where `current` is the most recent report
/// and `initial` the one three fiscal years earlier.
///
/// Reports must be ordered most recent first.
pub fn three_year_growth(statement: &AnnualStatement, field: &'static str) -> std::result::Result<f64, GrowthError> {
    let needed = GROWTH_SPAN + 1;
    if statement.len() < needed {
        return Err(GrowthError::InsufficientHistory {
            needed,
            available: statement.len(),
        });
    }

    let initial = integer_at(statement, GROWTH_SPAN, field)?;
    let current = integer_at(statement, 0, field)?;
    if initial == 0 {
        return Err(GrowthError::ZeroBase { field });
    }

    let change = current.checked_sub(initial).ok_or(GrowthError::Overflow { field })?;
    Ok(change as f64 / initial as f64)
}

fn integer_at(statement: &AnnualStatement, index: usize, field: &'static str) -> std::result::Result<i64, GrowthError> {
    let value = statement
        .value(index, field)
        .ok_or(GrowthError::MissingValue { field, index })?;

    let parsed = match value {
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Number(n) => n.as_i64(),
        _ => None,
    };
    parsed.ok_or_else(|| GrowthError::NotAnInteger {
        field,
        index,
        value: match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
    })
}

/// Build the consolidated row for one ticker.
///
/// Fails if an overview field is missing or if the balance sheet or cash flow
/// statement is empty or lacks a field. Growth failures never fail the call.
pub fn process_data(
    overview: &Overview,
    income: &AnnualStatement,
    balance: &AnnualStatement,
    cash_flow: &AnnualStatement,
) -> Result<Processed> {
    let [
        symbol,
        sector,
        analyst_target_price,
        market_capitalization,
        revenue_ttm,
        return_on_assets_ttm,
        return_on_equity_ttm,
        ebitda,
        profit_margin,
        operating_margin_ttm,
        gross_profit_ttm,
        dividend_yield,
    ] = pick(OVERVIEW_FIELDS, |field| overview.field(field))?;

    let mut diagnostics = Vec::new();
    let mut growth = |metric: Metric| match three_year_growth(income, metric.field()) {
        Ok(ratio) => Some(ratio),
        Err(error) => {
            diagnostics.push(Diagnostic { metric, error });
            None
        }
    };
    let revenue_growth_3yr = growth(Metric::Revenue);
    let cogs_growth_3yr = growth(Metric::Cogs);

    let [total_assets, total_liabilities, cash_and_short_term_investments] =
        pick(BALANCE_FIELDS, |field| balance.latest(Function::BalanceSheet, field))?;
    let [operating_cashflow, capital_expenditures] =
        pick(CASH_FLOW_FIELDS, |field| cash_flow.latest(Function::CashFlow, field))?;

    Ok(Processed {
        row: ResultRow {
            symbol,
            sector,
            analyst_target_price,
            market_capitalization,
            revenue_ttm,
            return_on_assets_ttm,
            return_on_equity_ttm,
            ebitda,
            profit_margin,
            operating_margin_ttm,
            gross_profit_ttm,
            dividend_yield,
            revenue_growth_3yr,
            cogs_growth_3yr,
            total_assets,
            total_liabilities,
            cash_and_short_term_investments,
            operating_cashflow,
            capital_expenditures,
        },
        diagnostics,
    })
}

/// Look up every field in order, stopping at the first failure.
fn pick<const N: usize>(
    fields: [&'static str; N],
    mut lookup: impl FnMut(&'static str) -> Result<String>,
) -> Result<[String; N]> {
    let mut out: [String; N] = std::array::from_fn(|_| String::new());
    for (slot, field) in out.iter_mut().zip(fields) {
        *slot = lookup(field)?;
    }
    Ok(out)
}
