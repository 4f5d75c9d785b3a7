//! Upstream spot price providers.

mod goldprice;

pub use goldprice::GoldPriceOrgProvider;

use async_trait::async_trait;

use crate::errors::PriceDataError;
use crate::models::RawQuote;

/// A single upstream source of gold and silver spot prices.
#[async_trait]
pub trait SpotPriceProvider: Send + Sync {
    /// Fetches one raw quotation, already converted to per-gram prices.
    ///
    /// No retries happen here; the next scheduled refresh is the retry.
    async fn fetch_spot(&self) -> Result<RawQuote, PriceDataError>;
}
