//! Client configuration

use std::time::Duration;

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "BOOKING_API_URL";

fn default_base_url() -> String {
    std::env::var(API_URL_ENV).unwrap_or_else(|_| {
        tracing::debug!("{} not set, using development default", API_URL_ENV);
        "http://127.0.0.1:8000".to_string()
    })
}

/// Configuration for connecting to the booking backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g., "http://localhost:8000")
    pub base_url: String,

    /// Request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_url_wins() {
        let config = ClientConfig::new("http://club.example:9000");
        assert_eq!(config.base_url, "http://club.example:9000");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
