//! Table processor using Polars DataFrames
use std::io::Cursor;

use polars_core::frame::DataFrame;
use polars_io::prelude::*;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::processor::{Processor, check_provider_message};
use crate::request::common::Function;
use crate::response::Response;

/// Converts a fundamentals response into a DataFrame.
///
/// Statements yield one row per annual report, most recent first. The company
/// overview yields a single row.
#[derive(Debug, Clone, Copy, Default)]
pub struct Table;

impl Processor for Table {
    type Output = DataFrame;

    fn process<R: Response>(&self, function: Function, response: Result<R>) -> Result<DataFrame> {
        let resp = response?;
        if resp.status() != 200 {
            return Err(Error::ApiError {
                request_id: resp.request_id().map(str::to_owned),
                status: resp.status(),
                message: resp.body().to_owned(),
            });
        }

        let json: Value = serde_json::from_str(resp.body())?;
        check_provider_message(function, &json)?;

        let rows = match function {
            Function::Overview => Value::Array(vec![json]),
            _ => match json.get("annualReports") {
                Some(reports @ Value::Array(_)) => reports.clone(),
                _ => {
                    return Err(Error::Custom(format!("{function} response has no annualReports array")));
                }
            },
        };

        let bytes = serde_json::to_vec(&rows)?;
        JsonReader::new(Cursor::new(bytes))
            .finish()
            .map_err(|e| Error::Custom(format!("failed to read {function} as DataFrame: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::HttpResponse;

    #[test]
    fn test_statement_rows() {
        let body = r#"{
            "symbol": "IBM",
            "annualReports": [
                {"fiscalDateEnding": "2023-12-31", "totalRevenue": "61860000000"},
                {"fiscalDateEnding": "2022-12-31", "totalRevenue": "60530000000"}
            ],
            "quarterlyReports": []
        }"#;
        let df = Table
            .process(Function::IncomeStatement, Ok(HttpResponse::new(200, body)))
            .unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 2);
    }

    #[test]
    fn test_overview_is_single_row() {
        let body = r#"{"Symbol": "IBM", "Sector": "TECHNOLOGY", "EBITDA": "14620000000"}"#;
        let df = Table
            .process(Function::Overview, Ok(HttpResponse::new(200, body)))
            .unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(df.width(), 3);
    }

    #[test]
    fn test_statement_without_reports() {
        let err = Table
            .process(Function::BalanceSheet, Ok(HttpResponse::new(200, r#"{"symbol": "IBM"}"#)))
            .unwrap_err();
        assert!(err.to_string().contains("annualReports"));
    }
}
