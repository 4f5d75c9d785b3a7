//! Goldrate core crate
//!
//! Domain logic for the goldrate price cache: fetching gold and silver spot
//! quotations from an upstream source, validating them against sanity
//! bounds, computing the twice-daily refresh schedule, and persisting a
//! single snapshot in a TTL-backed key-value store.
//!
//! # Data flow
//!
//! ```text
//! +------------------+     +------------+     +------------------+
//! | SpotPriceProvider| --> |  validate  | --> | next_refresh_after|
//! +------------------+     +------------+     +------------------+
//!                                                      |
//!                                                      v
//!                                             +------------------+
//!                                             |    PriceStore    |
//!                                             +------------------+
//! ```
//!
//! The refresh path is orchestrated by [`PriceCacheServiceTrait::refresh`];
//! the read path ([`PriceCacheServiceTrait::cached_snapshot`]) only ever
//! touches the store, never the upstream source.

pub mod constants;
pub mod errors;
pub mod models;
pub mod provider;
pub mod schedule;
pub mod service;
pub mod store;
pub mod validate;

// Re-export the public surface
pub use errors::PriceDataError;
pub use models::{PriceSnapshot, RawQuote, SpotPrices, ValidQuote};
pub use provider::{GoldPriceOrgProvider, SpotPriceProvider};
pub use schedule::next_refresh_after;
pub use service::{PriceCacheService, PriceCacheServiceTrait};
pub use store::{PriceStore, UpstashRedisStore};
