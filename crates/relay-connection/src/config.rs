//! Connection client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConnectionError;
use crate::page::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageSizeLimits};

/// Configuration for a [`ConnectionClient`](crate::ConnectionClient).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionClientConfig {
    /// GraphQL endpoint URL.
    pub endpoint: String,

    /// Request timeout
    #[serde(default = "default_timeout", with = "duration_secs")]
    pub timeout: Duration,

    /// Page size when the caller does not ask for one
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Upper bound for any page request
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,

    /// Service name used in logs
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

const fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

const fn default_max_page_size() -> u32 {
    MAX_PAGE_SIZE
}

fn default_service_name() -> String {
    "relay".into()
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl ConnectionClientConfig {
    /// Configuration with defaults for everything but the endpoint.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: default_timeout(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            service_name: default_service_name(),
        }
    }

    /// Parse and validate a JSON configuration object.
    pub fn from_json(value: serde_json::Value) -> Result<Self, ConnectionError> {
        let config: Self = serde_json::from_value(value)
            .map_err(|err| ConnectionError::Config(format!("invalid config: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<(), ConnectionError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConnectionError::Config("endpoint is required".into()));
        }
        if self.default_page_size == 0 {
            return Err(ConnectionError::Config(
                "default_page_size must be at least 1".into(),
            ));
        }
        if self.max_page_size < self.default_page_size {
            return Err(ConnectionError::Config(format!(
                "max_page_size {} is below default_page_size {}",
                self.max_page_size, self.default_page_size
            )));
        }
        Ok(())
    }

    /// Page size limits derived from this configuration.
    #[must_use]
    pub const fn page_size_limits(&self) -> PageSizeLimits {
        PageSizeLimits {
            default: self.default_page_size,
            max: self.max_page_size,
        }
    }
}
