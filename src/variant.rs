// Variant gate: one flag lookup per session decides control vs treatment UI.
// Any failure resolves to control.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum FlagError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Provider error: {status_code} - {message}")]
    ProviderError { status_code: u16, message: String },

    #[error("Flag lookup timed out after {0}ms")]
    Timeout(u64),

    #[error("Other error: {0}")]
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Unresolved,
    Control,
    Treatment,
}

impl Variant {
    pub fn is_treatment(&self) -> bool {
        matches!(self, Variant::Treatment)
    }

    // Value sent with analytics events. Unresolved is reported as control.
    pub fn analytics_label(&self) -> &'static str {
        match self {
            Variant::Treatment => "new",
            Variant::Control | Variant::Unresolved => "control",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Variant::Unresolved => "unresolved",
            Variant::Control => "control",
            Variant::Treatment => "treatment",
        };
        f.write_str(name)
    }
}

// External feature-flag service
#[async_trait]
pub trait FlagProvider: Send + Sync + 'static {
    async fn get_flag(&self, flag_name: &str) -> Result<Option<String>, FlagError>;
}

/// Provider that answers every lookup with a fixed value.
#[derive(Debug, Clone, Default)]
pub struct StaticFlagProvider {
    value: Option<String>,
}

impl StaticFlagProvider {
    pub fn new(value: Option<String>) -> Self {
        Self { value }
    }
}

#[async_trait]
impl FlagProvider for StaticFlagProvider {
    async fn get_flag(&self, _flag_name: &str) -> Result<Option<String>, FlagError> {
        Ok(self.value.clone())
    }
}

pub struct VariantGate {
    provider: Arc<dyn FlagProvider>,
    flag_name: String,
    treatment_value: String,
    timeout: Duration,
    resolved: OnceCell<Variant>,
}

impl VariantGate {
    pub fn new(
        provider: Arc<dyn FlagProvider>,
        flag_name: impl Into<String>,
        treatment_value: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            flag_name: flag_name.into(),
            treatment_value: treatment_value.into(),
            timeout,
            resolved: OnceCell::new(),
        }
    }

    pub fn variant(&self) -> Variant {
        self.resolved.get().copied().unwrap_or(Variant::Unresolved)
    }

    /// Query the provider once. Later and concurrent calls share the first answer.
    pub async fn resolve(&self) -> Variant {
        *self.resolved.get_or_init(|| self.query_provider()).await
    }

    async fn query_provider(&self) -> Variant {
        let lookup = self.provider.get_flag(&self.flag_name);
        let outcome = match tokio::time::timeout(self.timeout, lookup).await {
            Ok(result) => result,
            Err(_) => Err(FlagError::Timeout(self.timeout.as_millis() as u64)),
        };

        let variant = match outcome {
            Ok(Some(value)) if value == self.treatment_value => Variant::Treatment,
            Ok(_) => Variant::Control,
            Err(e) => {
                warn!(flag = %self.flag_name, error = %e, "Flag lookup failed, using control variant");
                Variant::Control
            }
        };

        info!(flag = %self.flag_name, %variant, "Variant resolved");
        variant
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, Copy)]
    pub enum ProviderMode {
        Answer,
        Fail,
        Hang,
    }

    pub struct MockFlagProvider {
        value: Option<String>,
        mode: ProviderMode,
        calls: AtomicUsize,
    }

    impl MockFlagProvider {
        pub fn answering(value: Option<&str>) -> Self {
            Self {
                value: value.map(str::to_string),
                mode: ProviderMode::Answer,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn with_mode(mode: ProviderMode) -> Self {
            Self {
                value: None,
                mode,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl FlagProvider for MockFlagProvider {
        async fn get_flag(&self, _flag_name: &str) -> Result<Option<String>, FlagError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.mode {
                ProviderMode::Answer => {
                    // Give concurrent resolvers a chance to race
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    Ok(self.value.clone())
                }
                ProviderMode::Fail => Err(FlagError::ProviderError {
                    status_code: 503,
                    message: "Service temporarily unavailable".to_string(),
                }),
                ProviderMode::Hang => {
                    std::future::pending::<()>().await;
                    Ok(None)
                }
            }
        }
    }
}
