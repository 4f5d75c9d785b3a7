//! Domain models for the price cache.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Unrounded per-gram prices as produced by a provider after the troy-ounce
/// conversion. Not yet bounds-checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawQuote {
    pub gold_per_gram: Decimal,
    pub silver_per_gram: Decimal,
}

/// Per-gram prices rounded to two decimals and within the sanity bounds.
/// Only [`crate::validate::validate`] constructs these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidQuote {
    pub gold_per_gram: Decimal,
    pub silver_per_gram: Decimal,
}

/// Price fields of the persisted snapshot. Field names reflect the
/// deployment currency and are part of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotPrices {
    pub gold_inr_per_gram: Decimal,
    pub silver_inr_per_gram: Decimal,
}

/// The sole persisted entity: one snapshot under a fixed key, fully replaced
/// on every successful refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSnapshot {
    pub prices: SpotPrices,
    /// Instant the snapshot was produced.
    pub last_updated: DateTime<Utc>,
    /// Instant the next refresh is expected. Informational for clients; the
    /// actual trigger cadence is an external concern.
    pub next_update: DateTime<Utc>,
    /// Incremented once per successful refresh. Observability only; older
    /// records may lack it.
    #[serde(default)]
    pub update_count: u64,
}
