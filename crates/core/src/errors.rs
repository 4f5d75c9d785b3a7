//! Error types for the price cache core.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while refreshing or serving price data.
#[derive(Error, Debug)]
pub enum PriceDataError {
    /// The upstream price source could not be reached or returned an
    /// unusable response. The store is left untouched.
    #[error("Upstream price source unavailable: {0}")]
    UpstreamUnavailable(String),

    /// A quotation failed the per-gram sanity bounds. The previously stored
    /// snapshot is preserved.
    #[error("{metal} price out of range: {value} INR/g")]
    OutOfRange { metal: &'static str, value: Decimal },

    /// The key-value store could not be reached or rejected the request.
    #[error("Price store unavailable: {0}")]
    StoreUnavailable(String),

    /// The store is reachable but holds no snapshot (never written or
    /// expired).
    #[error("Price data not available yet")]
    NoDataAvailable,

    /// A stored value could not be decoded, even after unwrapping the legacy
    /// double-encoded envelope.
    #[error("Stored record could not be decoded: {0}")]
    MalformedRecord(String),
}
