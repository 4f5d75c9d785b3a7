//! Quotation sanity checks.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{MAX_GOLD_PER_GRAM, MAX_SILVER_PER_GRAM};
use crate::errors::PriceDataError;
use crate::models::{RawQuote, ValidQuote};

/// Rounds a price to two decimals, half away from zero.
fn round_price(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Validates a raw quotation against the per-gram sanity bounds.
///
/// Prices are rounded to two decimals first so the bounds check applies to
/// the exact values that get persisted. Pure and deterministic.
pub fn validate(quote: RawQuote) -> Result<ValidQuote, PriceDataError> {
    let gold = round_price(quote.gold_per_gram);
    let silver = round_price(quote.silver_per_gram);

    if gold <= Decimal::ZERO || gold > MAX_GOLD_PER_GRAM {
        return Err(PriceDataError::OutOfRange {
            metal: "gold",
            value: gold,
        });
    }
    if silver <= Decimal::ZERO || silver > MAX_SILVER_PER_GRAM {
        return Err(PriceDataError::OutOfRange {
            metal: "silver",
            value: silver,
        });
    }

    Ok(ValidQuote {
        gold_per_gram: gold,
        silver_per_gram: silver,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn quote(gold: Decimal, silver: Decimal) -> RawQuote {
        RawQuote {
            gold_per_gram: gold,
            silver_per_gram: silver,
        }
    }

    #[test]
    fn rounds_to_two_decimals_half_up() {
        let valid = validate(quote(dec!(6430.1443), dec!(80.375))).unwrap();
        assert_eq!(valid.gold_per_gram, dec!(6430.14));
        assert_eq!(valid.silver_per_gram, dec!(80.38));
    }

    #[test]
    fn accepts_values_at_the_upper_bound() {
        let valid = validate(quote(dec!(100000), dec!(10000))).unwrap();
        assert_eq!(valid.gold_per_gram, dec!(100000.00));
        assert_eq!(valid.silver_per_gram, dec!(10000.00));
    }

    #[test]
    fn bound_is_applied_to_the_rounded_value() {
        // 100000.004 rounds back inside the bound
        assert!(validate(quote(dec!(100000.004), dec!(80))).is_ok());
        // 100000.005 rounds to 100000.01, out of bounds
        let err = validate(quote(dec!(100000.005), dec!(80))).unwrap_err();
        assert!(matches!(
            err,
            PriceDataError::OutOfRange { metal: "gold", .. }
        ));
    }

    #[test]
    fn rejects_zero_and_negative_prices() {
        assert!(validate(quote(Decimal::ZERO, dec!(80))).is_err());
        assert!(validate(quote(dec!(6500), dec!(-1))).is_err());
    }

    #[test]
    fn rejects_absurdly_high_gold_price() {
        // 5,000,000 per troy ounce converted upstream would exceed the
        // per-gram bound
        let err = validate(quote(dec!(160753.13), dec!(80))).unwrap_err();
        assert!(matches!(
            err,
            PriceDataError::OutOfRange { metal: "gold", .. }
        ));
    }

    #[test]
    fn rejects_out_of_range_silver() {
        let err = validate(quote(dec!(6500), dec!(10000.01))).unwrap_err();
        assert!(matches!(
            err,
            PriceDataError::OutOfRange {
                metal: "silver",
                ..
            }
        ));
    }
}
