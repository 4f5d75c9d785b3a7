use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use goldrate_core::{PriceDataError, PriceSnapshot, SpotPrices};

use crate::{
    config::Config,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

pub async fn healthz() -> &'static str {
    "ok"
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricesResponse {
    success: bool,
    prices: SpotPrices,
    last_updated: DateTime<Utc>,
    next_update: DateTime<Utc>,
    source: &'static str,
}

impl From<PriceSnapshot> for PricesResponse {
    fn from(snapshot: PriceSnapshot) -> Self {
        Self {
            success: true,
            prices: snapshot.prices,
            last_updated: snapshot.last_updated,
            next_update: snapshot.next_update,
            source: "cached",
        }
    }
}

/// Pure read path: serves the stored snapshot and never triggers a refresh.
/// Staleness beyond the TTL window degrades to 503 rather than a synchronous
/// fetch, keeping read latency decoupled from the upstream source.
async fn get_prices(State(state): State<Arc<AppState>>) -> ApiResult<Json<PricesResponse>> {
    let snapshot = state
        .price_service
        .cached_snapshot()
        .await?
        .ok_or(PriceDataError::NoDataAvailable)?;
    Ok(Json(PricesResponse::from(snapshot)))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    success: bool,
    message: &'static str,
    data: PriceSnapshot,
}

/// Scheduler trigger: runs one refresh cycle. Safe to invoke repeatedly; a
/// successful run fully replaces the stored snapshot.
async fn update_prices(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<RefreshResponse>> {
    authorize_trigger(&headers, state.cron_secret.as_deref())?;

    let snapshot = state
        .price_service
        .refresh()
        .await
        .map_err(ApiError::RefreshFailed)?;

    Ok(Json(RefreshResponse {
        success: true,
        message: "Prices updated successfully",
        data: snapshot,
    }))
}

/// The external scheduler sends no Authorization header and is trusted;
/// manual triggers must present the configured bearer secret. Acceptable
/// only because the write path is idempotent and non-destructive.
fn authorize_trigger(headers: &HeaderMap, secret: Option<&str>) -> Result<(), ApiError> {
    let Some(header) = headers.get(AUTHORIZATION) else {
        return Ok(());
    };
    let header = header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Unauthorized".to_string()))?;

    match secret {
        Some(secret) if header == format!("Bearer {secret}") => Ok(()),
        _ => Err(ApiError::Unauthorized("Unauthorized".to_string())),
    }
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .map(|o| o.parse().unwrap())
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    };

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/prices", get(get_prices))
        .route("/cron/update-prices", get(update_prices).post(update_prices));

    Router::new()
        .nest("/api", api)
        .with_state(state)
        .layer(cors)
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
