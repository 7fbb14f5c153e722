//! Weather data source trait

use crate::config::WeatherQuery;
use crate::weather::{Snapshot, ValidationError};

/// Errors from a single fetch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchError {
    /// Link down, DNS, TCP or TLS failure
    Network,
    /// No complete response within the fetch timeout
    Timeout,
    /// Server answered with a non-success HTTP status
    BadStatus(u16),
    /// Payload malformed or over the size limit
    ParseError,
    /// Payload decoded but required fields were missing
    ValidationError,
}

impl From<ValidationError> for FetchError {
    fn from(_: ValidationError) -> Self {
        FetchError::ValidationError
    }
}

/// One network round trip producing a snapshot
///
/// Implementations must resolve within their configured timeout and leave
/// the snapshot unstamped; the orchestrator stamps the fetch time.
pub trait DataSource {
    /// Fetch current conditions for `query`
    fn fetch(
        &mut self,
        query: &WeatherQuery,
    ) -> impl core::future::Future<Output = Result<Snapshot, FetchError>>;
}
