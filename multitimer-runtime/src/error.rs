use thiserror::Error;

/// Errors raised while setting up a [`TimerRegistry`](crate::TimerRegistry).
///
/// Timer operations themselves are total; these only surface from loading
/// configuration and building the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid value '{value}' for '{key}': {reason}")]
    InvalidSetting {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("a Tokio runtime is required to drive timers: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

impl RegistryError {
    pub(crate) fn invalid(key: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
