//! TTL-backed persistence for the single price snapshot.

mod upstash;

pub use upstash::UpstashRedisStore;

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::PriceDataError;
use crate::models::PriceSnapshot;

/// Key-value persistence for one snapshot under a fixed key.
///
/// Implementations must distinguish three read outcomes: a well-formed
/// snapshot, an absent key, and a transport failure. They map to different
/// responses at the serving boundary.
#[async_trait]
pub trait PriceStore: Send + Sync {
    /// Fully replaces the stored snapshot with an absolute expiry of `ttl`
    /// from now. One atomic write per call.
    async fn set_snapshot(
        &self,
        snapshot: &PriceSnapshot,
        ttl: Duration,
    ) -> Result<(), PriceDataError>;

    /// Reads the current snapshot. `Ok(None)` means the key was never set or
    /// has expired; undecodable records degrade to `Ok(None)` so a corrupt
    /// cache cannot block the next refresh from healing it.
    async fn get_snapshot(&self) -> Result<Option<PriceSnapshot>, PriceDataError>;
}
