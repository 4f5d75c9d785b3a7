//! Refresh orchestration and cached reads.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use chrono_tz::Tz;
use log::{info, warn};

use crate::errors::PriceDataError;
use crate::models::{PriceSnapshot, SpotPrices};
use crate::provider::SpotPriceProvider;
use crate::schedule::next_refresh_after;
use crate::store::PriceStore;
use crate::validate::validate;

#[async_trait]
pub trait PriceCacheServiceTrait: Send + Sync {
    /// Runs one refresh cycle: fetch, validate, persist. On any failure the
    /// previously stored snapshot is left untouched (last-good-value).
    async fn refresh(&self) -> Result<PriceSnapshot, PriceDataError>;

    /// Returns the most recent stored snapshot, if any. Never contacts the
    /// upstream source, so read latency stays bounded by the store alone.
    async fn cached_snapshot(&self) -> Result<Option<PriceSnapshot>, PriceDataError>;
}

pub struct PriceCacheService {
    provider: Arc<dyn SpotPriceProvider>,
    store: Arc<dyn PriceStore>,
    timezone: Tz,
    snapshot_ttl: Duration,
}

impl PriceCacheService {
    pub fn new(
        provider: Arc<dyn SpotPriceProvider>,
        store: Arc<dyn PriceStore>,
        timezone: Tz,
        snapshot_ttl: Duration,
    ) -> Self {
        Self {
            provider,
            store,
            timezone,
            snapshot_ttl,
        }
    }

    /// Best-effort read of the previous update counter. Absent or unreadable
    /// counts as zero; the counter is observability-only.
    async fn previous_update_count(&self) -> u64 {
        match self.store.get_snapshot().await {
            Ok(Some(snapshot)) => snapshot.update_count,
            Ok(None) => 0,
            Err(err) => {
                warn!("Could not read previous snapshot for the update counter: {err}");
                0
            }
        }
    }
}

#[async_trait]
impl PriceCacheServiceTrait for PriceCacheService {
    async fn refresh(&self) -> Result<PriceSnapshot, PriceDataError> {
        let raw = self.provider.fetch_spot().await?;
        let quote = validate(raw)?;

        let now = Utc::now();
        let next_update = next_refresh_after(now, self.timezone);
        let update_count = self.previous_update_count().await + 1;

        let snapshot = PriceSnapshot {
            prices: SpotPrices {
                gold_inr_per_gram: quote.gold_per_gram,
                silver_inr_per_gram: quote.silver_per_gram,
            },
            last_updated: now,
            next_update,
            update_count,
        };

        self.store.set_snapshot(&snapshot, self.snapshot_ttl).await?;
        info!(
            "Prices refreshed: gold {} INR/g, silver {} INR/g (update #{update_count}, next at {next_update})",
            snapshot.prices.gold_inr_per_gram, snapshot.prices.silver_inr_per_gram
        );

        Ok(snapshot)
    }

    async fn cached_snapshot(&self) -> Result<Option<PriceSnapshot>, PriceDataError> {
        self.store.get_snapshot().await
    }
}
