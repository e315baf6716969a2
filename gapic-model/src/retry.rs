use std::time::Duration;

use gapic_core::StatusCode;
use serde::Serialize;

use crate::serde_helpers::serialize_duration;

/// Timeout used when the service config has no entry for a method.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Per-method retry and timeout defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrySettings {
    /// Sorted and deduplicated.
    pub retryable_codes: Vec<StatusCode>,
    #[serde(serialize_with = "serialize_duration")]
    pub initial_retry_delay: Duration,
    pub retry_delay_multiplier: f64,
    #[serde(serialize_with = "serialize_duration")]
    pub max_retry_delay: Duration,
    #[serde(serialize_with = "serialize_duration")]
    pub initial_rpc_timeout: Duration,
    pub rpc_timeout_multiplier: f64,
    #[serde(serialize_with = "serialize_duration")]
    pub max_rpc_timeout: Duration,
    #[serde(serialize_with = "serialize_duration")]
    pub total_timeout: Duration,
}

impl RetrySettings {
    /// A single attempt bounded by `timeout`.
    pub fn no_retry(timeout: Duration) -> Self {
        Self {
            retryable_codes: Vec::new(),
            initial_retry_delay: Duration::ZERO,
            retry_delay_multiplier: 1.0,
            max_retry_delay: Duration::ZERO,
            initial_rpc_timeout: timeout,
            rpc_timeout_multiplier: 1.0,
            max_rpc_timeout: timeout,
            total_timeout: timeout,
        }
    }

    /// Retry `codes` with exponential backoff inside an overall `timeout`.
    pub fn with_backoff(
        mut codes: Vec<StatusCode>,
        initial_delay: Duration,
        multiplier: f64,
        max_delay: Duration,
        timeout: Duration,
    ) -> Self {
        codes.sort();
        codes.dedup();
        Self {
            retryable_codes: codes,
            initial_retry_delay: initial_delay,
            retry_delay_multiplier: multiplier,
            max_retry_delay: max_delay,
            ..Self::no_retry(timeout)
        }
    }

    pub fn is_retrying(&self) -> bool {
        !self.retryable_codes.is_empty()
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self::no_retry(DEFAULT_TIMEOUT)
    }
}
