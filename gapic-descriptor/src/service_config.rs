//! gRPC service config: per-method timeouts and retry policies.

use std::{path::Path, time::Duration};

use gapic_core::StatusCode;
use serde::{Deserialize, Deserializer, de::Error as _};

use crate::error::{DescriptorError, Result, SourceContext};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    #[serde(default)]
    pub method_config: Vec<MethodConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodConfig {
    #[serde(default)]
    pub name: Vec<MethodName>,
    #[serde(default, deserialize_with = "deserialize_opt_duration")]
    pub timeout: Option<Duration>,
    #[serde(default)]
    pub retry_policy: Option<RetryPolicy>,
}

/// Selects one method, or every method of a service when `method` is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MethodName {
    pub service: String,
    #[serde(default)]
    pub method: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryPolicy {
    #[serde(default)]
    pub max_attempts: Option<u32>,
    #[serde(deserialize_with = "deserialize_duration")]
    pub initial_backoff: Duration,
    #[serde(deserialize_with = "deserialize_duration")]
    pub max_backoff: Duration,
    pub backoff_multiplier: f64,
    #[serde(default)]
    pub retryable_status_codes: Vec<StatusCode>,
}

impl ServiceConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| DescriptorError::io(path, e))?;
        Self::from_json(&content, &path.display().to_string())
    }

    pub fn from_json(content: &str, filename: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| SourceContext::new(content, filename).service_config_error(e))
    }

    /// The entry for `service`/`method`; an exact method entry beats a service-wide one.
    pub fn lookup(&self, service: &str, method: &str) -> Option<&MethodConfig> {
        let exact = self.method_config.iter().find(|config| {
            config
                .name
                .iter()
                .any(|n| n.service == service && n.method.as_deref() == Some(method))
        });
        exact.or_else(|| {
            self.method_config.iter().find(|config| {
                config
                    .name
                    .iter()
                    .any(|n| n.service == service && n.method.is_none())
            })
        })
    }

    /// Every name selector, for checking them against the loaded services.
    pub fn names(&self) -> impl Iterator<Item = &MethodName> {
        self.method_config.iter().flat_map(|config| config.name.iter())
    }
}

/// Parse a protobuf JSON duration such as `"0.100s"` or `"60s"`.
pub fn parse_duration(text: &str) -> Option<Duration> {
    let seconds = text.strip_suffix('s')?;
    let (whole, fraction) = seconds.split_once('.').unwrap_or((seconds, ""));
    if whole.is_empty() || fraction.len() > 9 {
        return None;
    }
    let secs: u64 = whole.parse().ok()?;
    let nanos = if fraction.is_empty() {
        0
    } else {
        let digits: u32 = fraction.parse().ok()?;
        digits * 10u32.pow(9 - fraction.len() as u32)
    };
    Some(Duration::new(secs, nanos))
}

fn deserialize_duration<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_duration(&text).ok_or_else(|| {
        D::Error::custom(format!("invalid duration '{text}', expected e.g. \"0.5s\""))
    })
}

fn deserialize_opt_duration<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_duration(deserializer).map(Some)
}
