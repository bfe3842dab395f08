//! Execute trait for running API requests

use crate::error::Result;

/// Implemented by the endpoint request builders; `.get()` sends the request and
/// hands the response to the builder's processor.
pub trait Execute {
    /// The output type of the request
    type Output;

    /// Execute the request and return the processed result
    fn get(self) -> impl std::future::Future<Output = Result<Self::Output>>;
}
