use std::{net::SocketAddr, time::Duration};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub store_url: String,
    pub store_token: String,
    /// Bearer secret for manual refresh triggers. The external scheduler is
    /// trusted and sends no header at all.
    pub cron_secret: Option<String>,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub scheduler_enabled: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("GR_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .expect("Invalid GR_LISTEN_ADDR");
        let store_url = std::env::var("UPSTASH_REDIS_URL").expect("UPSTASH_REDIS_URL must be set");
        let store_token =
            std::env::var("UPSTASH_REDIS_TOKEN").expect("UPSTASH_REDIS_TOKEN must be set");
        let cron_secret = std::env::var("CRON_SECRET").ok().filter(|s| !s.is_empty());
        let cors_allow = std::env::var("GR_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("GR_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let scheduler_enabled = std::env::var("GR_SCHEDULER_ENABLED")
            .map(|v| !matches!(v.trim(), "0" | "false" | "off"))
            .unwrap_or(true);
        Self {
            listen_addr,
            store_url,
            store_token,
            cron_secret,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            scheduler_enabled,
        }
    }
}
