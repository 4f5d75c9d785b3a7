//! goldprice.org spot price client.
//!
//! The dbXRates endpoint is public and keyless; it returns gold (XAU) and
//! silver (XAG) quotations per troy ounce in the requested currency.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::constants::GRAMS_PER_TROY_OUNCE;
use crate::errors::PriceDataError;
use crate::models::RawQuote;
use crate::provider::SpotPriceProvider;

const GOLDPRICE_URL: &str = "https://data-asg.goldprice.org/dbXRates/INR";

/// Upstream request timeout. Conservative so a hung source cannot stall the
/// refresh handler.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct DbxRatesResponse {
    items: Vec<DbxRatesItem>,
}

#[derive(Debug, Deserialize)]
struct DbxRatesItem {
    #[serde(rename = "xauPrice")]
    xau_price: f64,
    #[serde(rename = "xagPrice")]
    xag_price: f64,
}

/// Fetches INR-denominated spot prices from goldprice.org.
pub struct GoldPriceOrgProvider {
    client: Client,
}

impl GoldPriceOrgProvider {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }
}

impl Default for GoldPriceOrgProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts a dbXRates payload to per-gram prices.
fn to_raw_quote(response: DbxRatesResponse) -> Result<RawQuote, PriceDataError> {
    let item = response
        .items
        .into_iter()
        .next()
        .ok_or_else(|| PriceDataError::UpstreamUnavailable("empty items list".to_string()))?;

    let gold_per_ounce = Decimal::try_from(item.xau_price)
        .map_err(|e| PriceDataError::UpstreamUnavailable(format!("unusable gold price: {e}")))?;
    let silver_per_ounce = Decimal::try_from(item.xag_price)
        .map_err(|e| PriceDataError::UpstreamUnavailable(format!("unusable silver price: {e}")))?;

    Ok(RawQuote {
        gold_per_gram: gold_per_ounce / GRAMS_PER_TROY_OUNCE,
        silver_per_gram: silver_per_ounce / GRAMS_PER_TROY_OUNCE,
    })
}

#[async_trait]
impl SpotPriceProvider for GoldPriceOrgProvider {
    async fn fetch_spot(&self) -> Result<RawQuote, PriceDataError> {
        let response = self
            .client
            .get(GOLDPRICE_URL)
            .send()
            .await
            .map_err(|e| PriceDataError::UpstreamUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PriceDataError::UpstreamUnavailable(format!(
                "goldprice.org returned status {}",
                response.status()
            )));
        }

        let rates: DbxRatesResponse = response
            .json()
            .await
            .map_err(|e| PriceDataError::UpstreamUnavailable(e.to_string()))?;

        to_raw_quote(rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate;
    use rust_decimal_macros::dec;

    #[test]
    fn converts_troy_ounce_prices_to_per_gram() {
        let response: DbxRatesResponse =
            serde_json::from_str(r#"{"items":[{"xauPrice":200000.0,"xagPrice":2500.0}]}"#)
                .unwrap();

        let raw = to_raw_quote(response).unwrap();
        let valid = validate(raw).unwrap();

        assert_eq!(valid.gold_per_gram, dec!(6430.14));
        assert_eq!(valid.silver_per_gram, dec!(80.38));
    }

    #[test]
    fn tolerates_extra_response_fields() {
        let response: DbxRatesResponse = serde_json::from_str(
            r#"{"ts":1700000000,"items":[{"curr":"INR","xauPrice":199000.5,"xagPrice":2400.25,"chgXau":-12.0}]}"#,
        )
        .unwrap();

        assert!(to_raw_quote(response).is_ok());
    }

    #[test]
    fn empty_items_is_upstream_unavailable() {
        let response: DbxRatesResponse = serde_json::from_str(r#"{"items":[]}"#).unwrap();
        let err = to_raw_quote(response).unwrap_err();
        assert!(matches!(err, PriceDataError::UpstreamUnavailable(_)));
    }

    #[test]
    fn non_numeric_prices_fail_to_parse() {
        let parsed =
            serde_json::from_str::<DbxRatesResponse>(r#"{"items":[{"xauPrice":"n/a","xagPrice":80}]}"#);
        assert!(parsed.is_err());
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn fetches_live_prices() {
        let provider = GoldPriceOrgProvider::new();
        let raw = provider.fetch_spot().await.unwrap();
        assert!(raw.gold_per_gram > Decimal::ZERO);
        assert!(raw.silver_per_gram > Decimal::ZERO);
    }
}
