//! Price store backed by the Upstash Redis REST API.

use std::time::Duration;

use async_trait::async_trait;
use log::warn;
use reqwest::Client;
use serde::Deserialize;

use crate::constants::SNAPSHOT_KEY;
use crate::errors::PriceDataError;
use crate::models::PriceSnapshot;
use crate::store::PriceStore;

/// Store request timeout, tighter than the upstream fetch since the store
/// sits on the client read path.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// `GET {base}/get/{key}` reply: `result` is the stored string or null.
#[derive(Debug, Deserialize)]
struct GetResponse {
    result: Option<String>,
}

/// `POST {base}/set/{key}` reply. Upstash reports failures in `error`.
#[derive(Debug, Deserialize)]
struct SetResponse {
    error: Option<String>,
}

/// Envelope produced by historical writers that serialized the record twice.
/// Readers unwrap it transparently; it is not corruption.
#[derive(Debug, Deserialize)]
struct LegacyEnvelope {
    value: String,
}

pub struct UpstashRedisStore {
    client: Client,
    base_url: String,
    token: String,
}

impl UpstashRedisStore {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }
}

/// Decodes a stored record, unwrapping at most one legacy double-encoding
/// layer. This is the single decode path for every reader.
fn decode_record(raw: &str) -> Result<PriceSnapshot, PriceDataError> {
    if let Ok(snapshot) = serde_json::from_str::<PriceSnapshot>(raw) {
        return Ok(snapshot);
    }

    let envelope: LegacyEnvelope =
        serde_json::from_str(raw).map_err(|e| PriceDataError::MalformedRecord(e.to_string()))?;
    serde_json::from_str(&envelope.value)
        .map_err(|e| PriceDataError::MalformedRecord(e.to_string()))
}

#[async_trait]
impl PriceStore for UpstashRedisStore {
    async fn set_snapshot(
        &self,
        snapshot: &PriceSnapshot,
        ttl: Duration,
    ) -> Result<(), PriceDataError> {
        let payload = serde_json::to_string(snapshot)
            .map_err(|e| PriceDataError::StoreUnavailable(format!("serialize snapshot: {e}")))?;
        let url = format!(
            "{}/set/{}?EX={}",
            self.base_url,
            SNAPSHOT_KEY,
            ttl.as_secs()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .body(payload)
            .send()
            .await
            .map_err(|e| PriceDataError::StoreUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PriceDataError::StoreUnavailable(format!(
                "set returned status {}",
                response.status()
            )));
        }

        let reply: SetResponse = response
            .json()
            .await
            .map_err(|e| PriceDataError::StoreUnavailable(e.to_string()))?;
        if let Some(error) = reply.error {
            return Err(PriceDataError::StoreUnavailable(error));
        }

        Ok(())
    }

    async fn get_snapshot(&self) -> Result<Option<PriceSnapshot>, PriceDataError> {
        let url = format!("{}/get/{}", self.base_url, SNAPSHOT_KEY);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| PriceDataError::StoreUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PriceDataError::StoreUnavailable(format!(
                "get returned status {}",
                response.status()
            )));
        }

        let reply: GetResponse = response
            .json()
            .await
            .map_err(|e| PriceDataError::StoreUnavailable(e.to_string()))?;

        let Some(raw) = reply.result else {
            return Ok(None);
        };

        match decode_record(&raw) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(err) => {
                warn!("Discarding undecodable stored snapshot: {err}");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SpotPrices;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn snapshot() -> PriceSnapshot {
        PriceSnapshot {
            prices: SpotPrices {
                gold_inr_per_gram: dec!(6430.14),
                silver_inr_per_gram: dec!(80.38),
            },
            last_updated: Utc.with_ymd_and_hms(2025, 3, 10, 11, 30, 0).unwrap(),
            next_update: Utc.with_ymd_and_hms(2025, 3, 10, 18, 0, 0).unwrap(),
            update_count: 42,
        }
    }

    #[test]
    fn decodes_a_plain_record() {
        let raw = serde_json::to_string(&snapshot()).unwrap();
        let decoded = decode_record(&raw).unwrap();
        assert_eq!(decoded, snapshot());
    }

    #[test]
    fn unwraps_a_double_encoded_record() {
        let inner = serde_json::to_string(&snapshot()).unwrap();
        let wrapped = serde_json::json!({ "value": inner, "ex": 86400 }).to_string();
        let decoded = decode_record(&wrapped).unwrap();
        assert_eq!(decoded, snapshot());
    }

    #[test]
    fn missing_update_count_defaults_to_zero() {
        let raw = r#"{
            "prices": { "goldInrPerGram": 6430.14, "silverInrPerGram": 80.38 },
            "lastUpdated": "2025-03-10T11:30:00Z",
            "nextUpdate": "2025-03-10T18:00:00Z"
        }"#;
        let decoded = decode_record(raw).unwrap();
        assert_eq!(decoded.update_count, 0);
    }

    #[test]
    fn garbage_is_a_malformed_record() {
        let err = decode_record("not json at all").unwrap_err();
        assert!(matches!(err, PriceDataError::MalformedRecord(_)));

        let err = decode_record(r#"{"value": "still not a snapshot"}"#).unwrap_err();
        assert!(matches!(err, PriceDataError::MalformedRecord(_)));
    }

    #[test]
    fn round_trip_preserves_numeric_fields() {
        let raw = serde_json::to_string(&snapshot()).unwrap();
        let decoded = decode_record(&raw).unwrap();
        assert_eq!(decoded.prices.gold_inr_per_gram, dec!(6430.14));
        assert_eq!(decoded.prices.silver_inr_per_gram, dec!(80.38));
        assert_eq!(decoded.update_count, 42);
    }
}
