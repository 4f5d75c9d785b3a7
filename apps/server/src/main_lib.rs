use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use goldrate_core::{
    constants::{REFRESH_TIMEZONE, SNAPSHOT_TTL},
    GoldPriceOrgProvider, PriceCacheService, PriceCacheServiceTrait, UpstashRedisStore,
};

use crate::config::Config;

pub struct AppState {
    pub price_service: Arc<dyn PriceCacheServiceTrait>,
    pub cron_secret: Option<String>,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub fn build_state(config: &Config) -> Arc<AppState> {
    let provider = Arc::new(GoldPriceOrgProvider::new());
    let store = Arc::new(UpstashRedisStore::new(
        config.store_url.as_str(),
        config.store_token.as_str(),
    ));
    let price_service = Arc::new(PriceCacheService::new(
        provider,
        store,
        REFRESH_TIMEZONE,
        SNAPSHOT_TTL,
    ));

    Arc::new(AppState {
        price_service,
        cron_secret: config.cron_secret.clone(),
    })
}
