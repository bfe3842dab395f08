//! Alpha Vantage API client
use crate::request::Request;

/// Endpoint every fundamentals function is served from
pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "ALPHAVANTAGE_API_KEY";

/// The Alpha Vantage API client.
///
/// Holds the transport, the API key and the base URL. Nothing here is global:
/// the key travels with the instance that is passed down to the fetcher.
#[cfg(feature = "reqwest")]
#[derive(Debug, Clone)]
pub struct AlphaVantage<Client: Request = reqwest::Client> {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

/// The Alpha Vantage API client.
///
/// Holds the transport, the API key and the base URL. Nothing here is global:
/// the key travels with the instance that is passed down to the fetcher.
#[cfg(all(feature = "hyper", not(feature = "reqwest")))]
#[derive(Debug, Clone)]
pub struct AlphaVantage<Client: Request = crate::request::HyperClient> {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

/// The Alpha Vantage API client.
///
/// No HTTP client feature is enabled, so the transport has to be supplied.
#[cfg(not(any(feature = "reqwest", feature = "hyper")))]
#[derive(Debug, Clone)]
pub struct AlphaVantage<Client: Request> {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl<Client: Request> AlphaVantage<Client> {
    /// Create a client with a fresh transport and no API key.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a client whose key comes from `ALPHAVANTAGE_API_KEY`, after
    /// loading a `.env` file if one is present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingApiKey`](crate::Error::MissingApiKey) if the variable is unset.
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| crate::Error::MissingApiKey)?;
        Ok(Self::new().with_key(api_key))
    }

    /// Sets the HTTP client for this instance.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Set the API key for this instance.
    ///
    /// ```no_run
    /// use compare_tickers::AlphaVantage;
    ///
    /// let client = AlphaVantage::default().with_key("my_api_key");
    /// ```
    pub fn with_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Point the client at a different endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Get the API key for this instance.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get a reference to the underlying HTTP client.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl<Client: Request> Default for AlphaVantage<Client> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::HttpResponse;

    struct Offline;

    impl Request for Offline {
        type Response = HttpResponse;

        fn new() -> Self {
            Offline
        }

        async fn get(&self, _url: &str) -> crate::Result<HttpResponse> {
            Err(crate::Error::Http("offline".to_string()))
        }
    }

    #[test]
    fn test_builder_sets_key_and_base_url() {
        let client = AlphaVantage::<Offline>::default();
        assert_eq!(client.api_key(), None);
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);

        let client = client.with_key("test_key").with_base_url("http://localhost:8080/query");
        assert_eq!(client.api_key(), Some("test_key"));
        assert_eq!(client.base_url(), "http://localhost:8080/query");
    }
}
