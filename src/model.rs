//! Input and output shapes of a comparison run

use std::fmt;
use std::io;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::request::common::Function;

/// A named-field record as returned by Alpha Vantage. Values are nearly
/// always strings, with `"None"` standing in for missing numbers.
pub type Record = serde_json::Map<String, Value>;

/// A ticker symbol, e.g. `MSFT`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ticker(String);

impl Ticker {
    /// Trim `symbol` and reject it if nothing is left
    pub fn new(symbol: impl AsRef<str>) -> Result<Self> {
        let symbol = symbol.as_ref().trim();
        if symbol.is_empty() {
            return Err(Error::InvalidTicker(symbol.to_string()));
        }
        Ok(Self(symbol.to_string()))
    }

    /// The symbol as sent to the API
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Ticker {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Ticker::new(s)
    }
}

/// Company overview: a single record of descriptive and valuation metrics
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Overview(pub Record);

impl Overview {
    /// Text of `field`, failing if the overview does not carry it
    pub fn field(&self, field: &'static str) -> Result<String> {
        self.0.get(field).map(cell_text).ok_or(Error::MissingField {
            table: Function::Overview,
            field,
        })
    }
}

/// An annual financial statement, one report per fiscal year
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnnualStatement {
    /// Symbol echoed by the provider
    #[serde(default)]
    pub symbol: String,
    /// Reports ordered most recent fiscal year first
    #[serde(rename = "annualReports")]
    pub annual_reports: Vec<Record>,
}

impl AnnualStatement {
    /// Build a statement directly from its reports
    pub fn from_reports(symbol: impl Into<String>, annual_reports: Vec<Record>) -> Self {
        Self {
            symbol: symbol.into(),
            annual_reports,
        }
    }

    /// Number of fiscal years
    pub fn len(&self) -> usize {
        self.annual_reports.len()
    }

    /// True when the statement has no reports
    pub fn is_empty(&self) -> bool {
        self.annual_reports.is_empty()
    }

    /// Value of `field` in the report at `index`
    pub fn value(&self, index: usize, field: &str) -> Option<&Value> {
        self.annual_reports.get(index).and_then(|report| report.get(field))
    }

    /// Text of `field` in the most recent report
    pub fn latest(&self, statement: Function, field: &'static str) -> Result<String> {
        let report = self.annual_reports.first().ok_or(Error::EmptyStatement { statement })?;
        report.get(field).map(cell_text).ok_or(Error::MissingField {
            table: statement,
            field,
        })
    }

    /// Check that `fiscalDateEnding` strictly decreases from one report to the next.
    pub fn ensure_most_recent_first(&self, statement: Function) -> Result<()> {
        let order_error = |reason: String| Error::StatementOrder { statement, reason };

        let mut previous: Option<NaiveDate> = None;
        for (index, report) in self.annual_reports.iter().enumerate() {
            let raw = report
                .get("fiscalDateEnding")
                .and_then(Value::as_str)
                .ok_or_else(|| order_error(format!("report {index} has no fiscalDateEnding")))?;
            let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|e| order_error(format!("report {index} has fiscalDateEnding {raw:?}: {e}")))?;

            if let Some(previous) = previous {
                if date >= previous {
                    return Err(order_error(format!("report {index} ({date}) is not older than {previous}")));
                }
            }
            previous = Some(date);
        }
        Ok(())
    }
}

/// The four tables fetched for one ticker
#[derive(Debug, Clone, Default)]
pub struct RawFinancials {
    /// Company overview
    pub overview: Overview,
    /// Annual income statement
    pub income: AnnualStatement,
    /// Annual balance sheet
    pub balance: AnnualStatement,
    /// Annual cash flow statement
    pub cash_flow: AnnualStatement,
}

/// Output columns, in file order
pub const COLUMNS: [&str; 19] = [
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
    "RevenueGrowth3YrPct",
    "COGSGrowth3YrPct",
    "totalAssets",
    "totalLiabilities",
    "cashAndShortTermInvestments",
    "operatingCashflow",
    "capitalExpenditures",
];

/// One consolidated row per ticker.
///
/// Field order is the CSV column order. Provider values stay as text so
/// the file carries exactly what the API returned.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    #[serde(rename = "Symbol")]
    pub symbol: String,
    #[serde(rename = "Sector")]
    pub sector: String,
    #[serde(rename = "AnalystTargetPrice")]
    pub analyst_target_price: String,
    #[serde(rename = "MarketCapitalization")]
    pub market_capitalization: String,
    #[serde(rename = "RevenueTTM")]
    pub revenue_ttm: String,
    #[serde(rename = "ReturnOnAssetsTTM")]
    pub return_on_assets_ttm: String,
    #[serde(rename = "ReturnOnEquityTTM")]
    pub return_on_equity_ttm: String,
    #[serde(rename = "EBITDA")]
    pub ebitda: String,
    #[serde(rename = "ProfitMargin")]
    pub profit_margin: String,
    #[serde(rename = "OperatingMarginTTM")]
    pub operating_margin_ttm: String,
    #[serde(rename = "GrossProfitTTM")]
    pub gross_profit_ttm: String,
    #[serde(rename = "DividendYield")]
    pub dividend_yield: String,
    /// `(rev[0] - rev[3]) / rev[3]`, absent when it could not be computed
    #[serde(rename = "RevenueGrowth3YrPct")]
    pub revenue_growth_3yr: Option<f64>,
    /// Same ratio over cost of goods and services sold
    #[serde(rename = "COGSGrowth3YrPct")]
    pub cogs_growth_3yr: Option<f64>,
    #[serde(rename = "totalAssets")]
    pub total_assets: String,
    #[serde(rename = "totalLiabilities")]
    pub total_liabilities: String,
    #[serde(rename = "cashAndShortTermInvestments")]
    pub cash_and_short_term_investments: String,
    #[serde(rename = "operatingCashflow")]
    pub operating_cashflow: String,
    #[serde(rename = "capitalExpenditures")]
    pub capital_expenditures: String,
}

/// Rows accumulated over a run, in ticker input order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    rows: Vec<ResultRow>,
}

impl ResultTable {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row
    pub fn push(&mut self, row: ResultRow) {
        self.rows.push(row);
    }

    /// Rows in insertion order
    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no row was added
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serialize as CSV: header row first, no index column.
    pub fn to_writer<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
        csv.write_record(COLUMNS)?;
        for row in &self.rows {
            csv.serialize(row)?;
        }
        csv.flush()?;
        Ok(())
    }

    /// Write the table to `path`, replacing any existing file.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.to_writer(io::BufWriter::new(file))
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn statement(dates: &[&str]) -> AnnualStatement {
        let reports = dates
            .iter()
            .map(|d| match json!({ "fiscalDateEnding": d }) {
                Value::Object(map) => map,
                _ => unreachable!(),
            })
            .collect();
        AnnualStatement::from_reports("TEST", reports)
    }

    #[test]
    fn test_ticker_is_trimmed_and_non_empty() {
        assert_eq!(Ticker::new(" MSFT ").unwrap().as_str(), "MSFT");
        assert!(matches!(Ticker::new("   "), Err(Error::InvalidTicker(_))));
        assert!("".parse::<Ticker>().is_err());
    }

    #[test]
    fn test_overview_field_lookup() {
        let overview: Overview =
            serde_json::from_value(json!({ "Symbol": "IBM", "Beta": 0.7, "DividendYield": null })).unwrap();
        assert_eq!(overview.field("Symbol").unwrap(), "IBM");
        assert_eq!(overview.field("Beta").unwrap(), "0.7");
        assert_eq!(overview.field("DividendYield").unwrap(), "");
        assert!(matches!(
            overview.field("Sector"),
            Err(Error::MissingField { table: Function::Overview, field: "Sector" })
        ));
    }

    #[test]
    fn test_statement_decodes_annual_reports_only() {
        let statement: AnnualStatement = serde_json::from_value(json!({
            "symbol": "IBM",
            "annualReports": [{ "fiscalDateEnding": "2023-12-31", "totalAssets": "135241000000" }],
            "quarterlyReports": [{ "fiscalDateEnding": "2024-03-31" }]
        }))
        .unwrap();
        assert_eq!(statement.len(), 1);
        assert_eq!(statement.latest(Function::BalanceSheet, "totalAssets").unwrap(), "135241000000");
    }

    #[test]
    fn test_latest_on_empty_statement() {
        let err = AnnualStatement::default().latest(Function::CashFlow, "operatingCashflow").unwrap_err();
        assert!(matches!(err, Error::EmptyStatement { statement: Function::CashFlow }));
    }

    #[test]
    fn test_descending_dates_accepted() {
        statement(&["2023-12-31", "2022-12-31", "2021-12-31"])
            .ensure_most_recent_first(Function::IncomeStatement)
            .unwrap();
        statement(&[]).ensure_most_recent_first(Function::IncomeStatement).unwrap();
    }

    #[test]
    fn test_ascending_or_duplicate_dates_rejected() {
        for dates in [
            &["2021-12-31", "2022-12-31"][..],
            &["2022-12-31", "2022-12-31"][..],
            &["2022-12-31", "not a date"][..],
        ] {
            let err = statement(dates).ensure_most_recent_first(Function::IncomeStatement).unwrap_err();
            assert!(matches!(err, Error::StatementOrder { statement: Function::IncomeStatement, .. }));
        }
    }

    #[test]
    fn test_empty_table_still_has_header() {
        let mut out = Vec::new();
        ResultTable::new().to_writer(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", COLUMNS.join(",")));
    }
}
