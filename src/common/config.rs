use std::env;
use std::time::Duration;

pub const DEFAULT_NOTIFICATION_TIMEOUT_MS: u64 = 6000;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub notification_timeout_ms: u64,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            notification_timeout_ms: DEFAULT_NOTIFICATION_TIMEOUT_MS,
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();
        Self {
            host: env::var("LIBRARY_HOST").unwrap_or(defaults.host),
            port: env::var("LIBRARY_PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(defaults.port),
            notification_timeout_ms: env::var("NOTIFICATION_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.notification_timeout_ms),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }

    /// `host:port` of the books server.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn notification_timeout(&self) -> Duration {
        Duration::from_millis(self.notification_timeout_ms)
    }
}
