//! Fundamentals request builder
//!
//! The four fundamentals functions share one query shape (`function`, `symbol`,
//! `apikey`), so a single builder serves all of them.

use serde::de::DeserializeOwned;

use crate::client::AlphaVantage;
use crate::error::{Error, Result};
use crate::execute::Execute;
use crate::processor::{Processor, Raw, Typed};
use crate::request::Request;
use crate::request::common::{Function, Query};

/// Request builder for one fundamentals function and symbol
pub struct Fundamentals<'a, Client: Request, P: Processor = Raw> {
    client: &'a AlphaVantage<Client>,
    /// Function to call
    pub function: Function,
    /// Stock symbol
    pub symbol: String,
    processor: P,
}

// Constructor - always starts with Raw
impl<'a, C: Request> Fundamentals<'a, C, Raw> {
    /// Create a new request returning the raw JSON body
    pub fn new(client: &'a AlphaVantage<C>, function: Function, symbol: impl Into<String>) -> Self {
        Self {
            client,
            function,
            symbol: symbol.into(),
            processor: Raw,
        }
    }
}

impl<'a, C: Request, P: Processor + 'a> Fundamentals<'a, C, P> {
    /// Execute the request and return the result
    pub fn get(self) -> impl std::future::Future<Output = Result<P::Output>> + 'a {
        Execute::get(self)
    }

    /// Decode the response into `T`
    pub fn typed<T: DeserializeOwned>(self) -> Fundamentals<'a, C, Typed<T>> {
        self.with_processor(Typed::new())
    }

    /// Convert to DataFrame output (Polars DataFrame)
    #[cfg(feature = "table")]
    pub fn as_dataframe(self) -> Fundamentals<'a, C, crate::processor::Table> {
        self.with_processor(crate::processor::Table)
    }

    fn with_processor<Q: Processor>(self, processor: Q) -> Fundamentals<'a, C, Q> {
        Fundamentals {
            client: self.client,
            function: self.function,
            symbol: self.symbol,
            processor,
        }
    }

    /// URL this request will be sent to
    pub fn url(&self) -> Result<String> {
        let apikey = self.client.api_key().ok_or(Error::MissingApiKey)?;
        Query {
            function: self.function,
            symbol: &self.symbol,
            apikey,
        }
        .to_url(self.client.base_url())
    }
}

impl<'a, C: Request, P: Processor + 'a> Execute for Fundamentals<'a, C, P> {
    type Output = P::Output;

    #[allow(refining_impl_trait_reachable)]
    async fn get(self) -> Result<P::Output> {
        let url = self.url()?;
        tracing::debug!(function = %self.function, symbol = %self.symbol, "requesting");

        let response = self.client.client().get(&url).await;
        self.processor.process(self.function, response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::HttpResponse;

    struct Echo;

    impl Request for Echo {
        type Response = HttpResponse;

        fn new() -> Self {
            Echo
        }

        async fn get(&self, url: &str) -> Result<HttpResponse> {
            Ok(HttpResponse::new(200, url))
        }
    }

    #[test]
    fn test_url_requires_api_key() {
        let client = AlphaVantage::<Echo>::default();
        let request = Fundamentals::new(&client, Function::Overview, "IBM");
        assert!(matches!(request.url(), Err(Error::MissingApiKey)));
    }

    #[tokio::test]
    async fn test_get_sends_function_and_symbol() {
        let client = AlphaVantage::<Echo>::default()
            .with_key("k")
            .with_base_url("http://test/query");
        let url = Fundamentals::new(&client, Function::BalanceSheet, "MSFT").get().await.unwrap();
        assert_eq!(url, "http://test/query?function=BALANCE_SHEET&symbol=MSFT&apikey=k");
    }
}
