//! HTTP implementation of [`ApiClient`] over reqwest.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use chirp_core::{defaults, ApiClient, Error, Notification, Result, TranslateRequest};

/// Configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Server base URL, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Serve notifications from the legacy `/main/notifications` path.
    pub legacy_notifications: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::BASE_URL.to_string(),
            timeout_secs: defaults::HTTP_TIMEOUT_SECS,
            legacy_notifications: false,
        }
    }
}

impl HttpConfig {
    /// Create config from environment variables (with defaults).
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | `CHIRP_BASE_URL` | `http://localhost:5000` | Server base URL |
    /// | `CHIRP_HTTP_TIMEOUT_SECS` | `30` | Per-request timeout |
    /// | `CHIRP_LEGACY_NOTIFICATIONS` | `false` | Use `/main/notifications` |
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("CHIRP_BASE_URL").unwrap_or_else(|_| defaults::BASE_URL.to_string());

        let timeout_secs = std::env::var("CHIRP_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::HTTP_TIMEOUT_SECS);

        let legacy_notifications = std::env::var("CHIRP_LEGACY_NOTIFICATIONS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Self {
            base_url,
            timeout_secs,
            legacy_notifications,
        }
    }

    /// Set the server base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Use the legacy notifications path.
    pub fn with_legacy_notifications(mut self, legacy: bool) -> Self {
        self.legacy_notifications = legacy;
        self
    }
}

/// Response body of the translation endpoint.
#[derive(Debug, Deserialize)]
struct TranslateResponse {
    text: String,
}

/// HTTP client for the chirp server API.
pub struct HttpApi {
    client: Client,
    config: HttpConfig,
}

impl HttpApi {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(HttpConfig::from_env())
    }

    fn notifications_url(&self) -> String {
        let path = if self.config.legacy_notifications {
            defaults::LEGACY_NOTIFICATIONS_PATH
        } else {
            defaults::NOTIFICATIONS_PATH
        };
        format!("{}{}", self.config.base_url, path)
    }
}

#[async_trait]
impl ApiClient for HttpApi {
    async fn notifications(&self, since: f64) -> Result<Vec<Notification>> {
        let start = Instant::now();

        let response = self
            .client
            .get(self.notifications_url())
            .query(&[("since", since)])
            .send()
            .await
            .map_err(|e| Error::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Request(format!(
                "notifications request failed with status {}",
                response.status()
            )));
        }

        let batch: Vec<Notification> = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;

        debug!(
            op = "notifications",
            since,
            batch_count = batch.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Fetched notifications"
        );

        Ok(batch)
    }

    async fn translate(&self, request: TranslateRequest) -> Result<String> {
        let start = Instant::now();

        let response = self
            .client
            .post(format!(
                "{}{}",
                self.config.base_url,
                defaults::TRANSLATE_PATH
            ))
            .form(&[
                ("text_to_translate", request.text.as_str()),
                ("source_language", request.source_language.as_str()),
                ("destination_language", request.destination_language.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Request(format!(
                "translate request failed with status {}",
                response.status()
            )));
        }

        let body: TranslateResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;

        debug!(
            op = "translate",
            source = %request.source_language,
            dest = %request.destination_language,
            duration_ms = start.elapsed().as_millis() as u64,
            "Translated text"
        );

        Ok(body.text)
    }

    async fn user_popup(&self, username: &str) -> Result<String> {
        let response = self
            .client
            .get(format!("{}/{}/popup", self.config.base_url, username))
            .send()
            .await
            .map_err(|e| Error::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Request(format!(
                "popup request for {} failed with status {}",
                username,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| Error::Request(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = HttpConfig::default();
        assert_eq!(config.base_url, defaults::BASE_URL);
        assert_eq!(config.timeout_secs, defaults::HTTP_TIMEOUT_SECS);
        assert!(!config.legacy_notifications);
    }

    #[test]
    fn test_config_builders() {
        let config = HttpConfig::default()
            .with_base_url("https://blog.example.org")
            .with_timeout_secs(5)
            .with_legacy_notifications(true);

        assert_eq!(config.base_url, "https://blog.example.org");
        assert_eq!(config.timeout_secs, 5);
        assert!(config.legacy_notifications);
    }

    #[test]
    fn test_notifications_url_variants() {
        let api = HttpApi::new(HttpConfig::default().with_base_url("http://s")).unwrap();
        assert_eq!(api.notifications_url(), "http://s/notifications");

        let api = HttpApi::new(
            HttpConfig::default()
                .with_base_url("http://s")
                .with_legacy_notifications(true),
        )
        .unwrap();
        assert_eq!(api.notifications_url(), "http://s/main/notifications");
    }
}
