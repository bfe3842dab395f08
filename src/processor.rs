//! Response processors
//!
//! A request builder carries a processor type that decides what `.get()`
//! returns: the raw body ([`Raw`]), a serde-decoded value ([`Typed`]) or,
//! with the `table` feature, a polars `DataFrame` ([`Table`]).

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::request::common::Function;
use crate::response::Response;

#[cfg(feature = "table")]
mod table;
#[cfg(feature = "table")]
pub use table::Table;

/// Turns an HTTP response into the builder's output type
pub trait Processor: Send + Sync {
    /// Output of the processor
    type Output;

    /// Process the response of a call to `function`
    fn process<R: Response>(&self, function: Function, response: Result<R>) -> Result<Self::Output>;
}

/// Returns the body unchanged once the status is checked
#[derive(Debug, Clone, Copy, Default)]
pub struct Raw;

impl Processor for Raw {
    type Output = String;

    fn process<R: Response>(&self, _function: Function, response: Result<R>) -> Result<String> {
        let resp = ok_status(response?)?;
        Ok(resp.body().to_owned())
    }
}

/// Decodes the body into `T` with serde
pub struct Typed<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> Typed<T> {
    /// Create a processor decoding into `T`
    pub fn new() -> Self {
        Self { _marker: PhantomData }
    }
}

impl<T> Default for Typed<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DeserializeOwned> Processor for Typed<T> {
    type Output = T;

    fn process<R: Response>(&self, function: Function, response: Result<R>) -> Result<T> {
        let resp = ok_status(response?)?;
        let value: Value = serde_json::from_str(resp.body())?;
        check_provider_message(function, &value)?;
        Ok(serde_json::from_value(value)?)
    }
}

fn ok_status<R: Response>(resp: R) -> Result<R> {
    if resp.status() != 200 {
        return Err(Error::ApiError {
            request_id: resp.request_id().map(str::to_owned),
            status: resp.status(),
            message: resp.body().to_owned(),
        });
    }
    Ok(resp)
}

/// Alpha Vantage reports failures with a 200 status and a one-key body.
pub(crate) fn check_provider_message(function: Function, value: &Value) -> Result<()> {
    let message = |key: &str| value.get(key).map(|m| m.as_str().map_or_else(|| m.to_string(), str::to_owned));

    if let Some(message) = message("Error Message") {
        return Err(Error::Provider { function, message });
    }
    if let Some(message) = message("Note").or_else(|| message("Information")) {
        return Err(Error::RateLimited { function, message });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::HttpResponse;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Symbol {
        #[serde(rename = "Symbol")]
        symbol: String,
    }

    #[test]
    fn test_raw_passes_body_through() {
        let body = Raw
            .process(Function::Overview, Ok(HttpResponse::new(200, "{\"Symbol\":\"IBM\"}")))
            .unwrap();
        assert_eq!(body, "{\"Symbol\":\"IBM\"}");
    }

    #[test]
    fn test_non_200_is_api_error() {
        let resp = HttpResponse::new(503, "unavailable").with_request_id("req-1");
        let err = Typed::<Symbol>::new().process(Function::Overview, Ok(resp)).unwrap_err();
        match err {
            Error::ApiError {
                request_id,
                status,
                message,
            } => {
                assert_eq!(request_id.as_deref(), Some("req-1"));
                assert_eq!(status, 503);
                assert_eq!(message, "unavailable");
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
    }

    #[test]
    fn test_typed_decodes() {
        let decoded = Typed::<Symbol>::new()
            .process(Function::Overview, Ok(HttpResponse::new(200, r#"{"Symbol":"IBM","Sector":"TECHNOLOGY"}"#)))
            .unwrap();
        assert_eq!(decoded.symbol, "IBM");
    }

    #[test]
    fn test_provider_messages() {
        let err = Typed::<Value>::new()
            .process(
                Function::IncomeStatement,
                Ok(HttpResponse::new(200, r#"{"Error Message":"Invalid API call."}"#)),
            )
            .unwrap_err();
        assert!(matches!(err, Error::Provider { function: Function::IncomeStatement, .. }));

        let err = Typed::<Value>::new()
            .process(
                Function::CashFlow,
                Ok(HttpResponse::new(200, r#"{"Note":"Our standard API call frequency is 5 calls per minute"}"#)),
            )
            .unwrap_err();
        assert!(matches!(err, Error::RateLimited { function: Function::CashFlow, .. }));

        let err = Typed::<Value>::new()
            .process(Function::Overview, Ok(HttpResponse::new(200, r#"{"Information":"rate limit"}"#)))
            .unwrap_err();
        assert!(matches!(err, Error::RateLimited { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = Typed::<Value>::new()
            .process(Function::Overview, Ok(HttpResponse::new(200, "<html>")))
            .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
