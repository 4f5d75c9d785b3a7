use std::time::Duration;

use chrono_tz::Tz;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Troy ounces to grams conversion constant.
pub const GRAMS_PER_TROY_OUNCE: Decimal = dec!(31.1035);

/// Upper sanity bound for gold, INR per gram. Values above this indicate a
/// garbled upstream response, not a real market move.
pub const MAX_GOLD_PER_GRAM: Decimal = dec!(100000);

/// Upper sanity bound for silver, INR per gram.
pub const MAX_SILVER_PER_GRAM: Decimal = dec!(10000);

/// Fixed store key holding the single price snapshot.
pub const SNAPSHOT_KEY: &str = "metal_prices";

/// Store-level expiry safety net: 24 hours, longer than the 6.5 hour maximum
/// gap between scheduled refreshes so one missed trigger does not blank the
/// cache.
pub const SNAPSHOT_TTL: Duration = Duration::from_secs(86_400);

/// Timezone of record for the refresh schedule. Fixed per deployment, never
/// derived from the server locale.
pub const REFRESH_TIMEZONE: Tz = chrono_tz::Asia::Kolkata;

/// Wall-clock refresh slots as (hour, minute) in [`REFRESH_TIMEZONE`],
/// ascending order.
pub const REFRESH_SLOTS: [(u32, u32); 2] = [(17, 0), (23, 30)];
