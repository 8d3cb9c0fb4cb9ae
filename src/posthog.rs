// PostHog-compatible HTTP collaborator: feature flags via /decide, events via /capture
use crate::analytics::{AnalyticsError, AnalyticsSink, Properties};
use crate::variant::{FlagError, FlagProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Initialization error: {0}")]
    InitError(String),
}

#[derive(Debug, Clone)]
pub struct PostHogConfig {
    pub host: String,
    pub api_key: String,
    pub timeout_ms: u64,
}

impl Default for PostHogConfig {
    fn default() -> Self {
        Self {
            host: "https://us.i.posthog.com".to_string(),
            api_key: String::new(),
            timeout_ms: 5000,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct DecideResponse {
    #[serde(default, rename = "featureFlags")]
    feature_flags: HashMap<String, Value>,
}

pub struct PostHogClient {
    http: Client,
    config: PostHogConfig,
    distinct_id: String,
}

impl PostHogClient {
    pub fn new(config: PostHogConfig) -> Result<Self, ClientError> {
        if config.api_key.trim().is_empty() {
            return Err(ClientError::ConfigError("api_key must not be empty".into()));
        }
        if !config.host.starts_with("http://") && !config.host.starts_with("https://") {
            return Err(ClientError::ConfigError(format!(
                "host must be an http(s) URL: {}",
                config.host
            )));
        }

        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ClientError::InitError(e.to_string()))?;

        // Anonymous visitor id, one per session
        let distinct_id = format!("anon-{:016x}", rand::random::<u64>());
        debug!(%distinct_id, host = %config.host, "PostHog client created");

        Ok(Self {
            http,
            config,
            distinct_id,
        })
    }

    pub fn distinct_id(&self) -> &str {
        &self.distinct_id
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.host.trim_end_matches('/'), path)
    }

    fn decide_payload(&self) -> Value {
        json!({
            "api_key": self.config.api_key,
            "distinct_id": self.distinct_id,
        })
    }

    fn capture_payload(&self, event: &str, properties: Properties) -> Value {
        json!({
            "api_key": self.config.api_key,
            "event": event,
            "distinct_id": self.distinct_id,
            "properties": properties,
        })
    }
}

// Multivariate flags answer with a string, boolean flags with true/false.
// A disabled boolean flag counts as absent.
fn flag_value(body: &str, flag_name: &str) -> Result<Option<String>, FlagError> {
    let response: DecideResponse =
        serde_json::from_str(body).map_err(|e| FlagError::Other(e.to_string()))?;

    Ok(match response.feature_flags.get(flag_name) {
        Some(Value::String(variant)) => Some(variant.clone()),
        Some(Value::Bool(true)) => Some("true".to_string()),
        _ => None,
    })
}

#[async_trait]
impl FlagProvider for PostHogClient {
    async fn get_flag(&self, flag_name: &str) -> Result<Option<String>, FlagError> {
        let response = self
            .http
            .post(self.endpoint("decide/?v=3"))
            .json(&self.decide_payload())
            .send()
            .await
            .map_err(|e| FlagError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FlagError::ProviderError {
                status_code: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FlagError::NetworkError(e.to_string()))?;
        flag_value(&body, flag_name)
    }
}

#[async_trait]
impl AnalyticsSink for PostHogClient {
    async fn capture(&self, event: &str, properties: Properties) -> Result<(), AnalyticsError> {
        let response = self
            .http
            .post(self.endpoint("capture/"))
            .json(&self.capture_payload(event, properties))
            .send()
            .await
            .map_err(|e| AnalyticsError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalyticsError::Rejected {
                status_code: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> PostHogClient {
        PostHogClient::new(PostHogConfig {
            host: "https://eu.posthog.example/".to_string(),
            api_key: "phc_test".to_string(),
            timeout_ms: 1000,
        })
        .unwrap()
    }

    #[test]
    fn test_config_validation() {
        let missing_key = PostHogClient::new(PostHogConfig::default());
        assert!(matches!(missing_key, Err(ClientError::ConfigError(_))));

        let bad_host = PostHogClient::new(PostHogConfig {
            host: "posthog.local".to_string(),
            api_key: "phc_test".to_string(),
            ..Default::default()
        });
        assert!(matches!(bad_host, Err(ClientError::ConfigError(_))));
    }

    #[test]
    fn test_endpoints_and_payloads() {
        let client = client();
        assert!(client.distinct_id().starts_with("anon-"));
        assert_eq!(
            client.endpoint("decide/?v=3"),
            "https://eu.posthog.example/decide/?v=3"
        );

        let decide = client.decide_payload();
        assert_eq!(decide["api_key"], "phc_test");
        assert_eq!(decide["distinct_id"], client.distinct_id());

        let mut properties = Properties::new();
        properties.insert("variant".into(), json!("new"));
        let capture = client.capture_payload("button_clicked", properties);
        assert_eq!(capture["event"], "button_clicked");
        assert_eq!(capture["properties"]["variant"], "new");
    }

    #[test]
    fn test_flag_value_parsing() {
        let body = r#"{"featureFlags": {"new-ui-appeal": "new", "beta": true, "off": false}}"#;
        assert_eq!(flag_value(body, "new-ui-appeal").unwrap().as_deref(), Some("new"));
        assert_eq!(flag_value(body, "beta").unwrap().as_deref(), Some("true"));
        assert_eq!(flag_value(body, "off").unwrap(), None);
        assert_eq!(flag_value(body, "missing").unwrap(), None);

        assert_eq!(flag_value("{}", "new-ui-appeal").unwrap(), None);
        assert!(matches!(flag_value("<html>", "x"), Err(FlagError::Other(_))));
    }
}
