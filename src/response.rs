//! Response types for Alpha Vantage API

/// An HTTP response as seen by the processors.
pub trait Response {
    /// HTTP status code
    fn status(&self) -> u16;

    /// Response body
    fn body(&self) -> &str;

    /// The `X-Request-Id` header of the response, if the server sent one
    fn request_id(&self) -> Option<&str>;
}
