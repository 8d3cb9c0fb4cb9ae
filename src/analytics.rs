// Fire-and-forget analytics capture
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

pub const BUTTON_CLICKED: &str = "button_clicked";

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Capture rejected: {status_code} - {message}")]
    Rejected { status_code: u16, message: String },

    #[error("Other error: {0}")]
    Other(String),
}

pub type Properties = Map<String, Value>;

#[async_trait]
pub trait AnalyticsSink: Send + Sync + 'static {
    async fn capture(&self, event: &str, properties: Properties) -> Result<(), AnalyticsError>;
}

/// Sink that only writes events to the log.
#[derive(Debug, Default, Clone)]
pub struct LogSink;

#[async_trait]
impl AnalyticsSink for LogSink {
    async fn capture(&self, event: &str, properties: Properties) -> Result<(), AnalyticsError> {
        let properties = Value::Object(properties);
        info!(event, properties = %properties, "Analytics event");
        Ok(())
    }
}

// Spawns each capture so the caller never waits on, or sees a failure from, the sink.
#[derive(Clone)]
pub struct Analytics {
    sink: Arc<dyn AnalyticsSink>,
    runtime: Handle,
}

impl Analytics {
    pub fn new(sink: Arc<dyn AnalyticsSink>, runtime: Handle) -> Self {
        Self { sink, runtime }
    }

    pub fn capture(&self, event: &str, properties: Properties) {
        let sink = Arc::clone(&self.sink);
        let event = event.to_string();
        debug!(event = %event, "Queueing analytics event");

        self.runtime.spawn(async move {
            if let Err(e) = sink.capture(&event, properties).await {
                warn!(event = %event, error = %e, "Analytics capture failed");
            }
        });
    }
}


#[cfg(test)]
mod tests {
    use super::mock::RecordingSink;
    use super::*;
    use serde_json::json;

    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    fn props(variant: &str) -> Properties {
        let mut properties = Properties::new();
        properties.insert("variant".into(), json!(variant));
        properties
    }

    #[tokio::test]
    async fn test_capture_reaches_sink() {
        let sink = Arc::new(RecordingSink::default());
        let analytics = Analytics::new(sink.clone(), Handle::current());

        analytics.capture(BUTTON_CLICKED, props("new"));
        settle().await;

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, "button_clicked");
        assert_eq!(events[0].1.get("variant"), Some(&json!("new")));
    }

    #[tokio::test]
    async fn test_failures_are_swallowed() {
        let sink = Arc::new(RecordingSink::failing());
        let analytics = Analytics::new(sink.clone(), Handle::current());

        analytics.capture(BUTTON_CLICKED, props("control"));
        analytics.capture(BUTTON_CLICKED, props("control"));
        settle().await;

        assert_eq!(sink.events().len(), 2);
    }

    #[tokio::test]
    async fn test_log_sink_accepts_events() {
        let result = LogSink.capture(BUTTON_CLICKED, props("new")).await;
        assert!(result.is_ok());
    }
}
