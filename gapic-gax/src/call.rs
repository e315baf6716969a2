//! Per-method call settings and per-call overrides.

use std::time::Duration;

use crate::Code;

/// Timeout used when a method has no configured settings.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Retry and timeout behavior of one method.
///
/// Generated settings types carry one of these per method; individual calls
/// may override parts of it with [`CallOptions`].
#[derive(Debug, Clone, PartialEq)]
pub struct CallSettings {
    /// Failures with these codes are retried; all others return at once.
    pub retryable_codes: Vec<Code>,
    pub initial_retry_delay: Duration,
    pub retry_delay_multiplier: f64,
    pub max_retry_delay: Duration,
    pub initial_rpc_timeout: Duration,
    pub rpc_timeout_multiplier: f64,
    pub max_rpc_timeout: Duration,
    /// Budget for all attempts together.
    pub total_timeout: Duration,
}

impl CallSettings {
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

    pub fn is_retrying(&self) -> bool {
        !self.retryable_codes.is_empty()
    }

    /// These settings with `options` applied on top.
    ///
    /// Each value set on `options` replaces the configured one. A call
    /// timeout then replaces the total budget and caps both rpc timeouts.
    pub fn merge(&self, options: &CallOptions) -> Self {
        let mut merged = self.clone();
        if let Some(delay) = options.initial_retry_delay {
            merged.initial_retry_delay = delay;
        }
        if let Some(multiplier) = options.retry_delay_multiplier {
            merged.retry_delay_multiplier = multiplier;
        }
        if let Some(delay) = options.max_retry_delay {
            merged.max_retry_delay = delay;
        }
        if let Some(timeout) = options.initial_rpc_timeout {
            merged.initial_rpc_timeout = timeout;
        }
        if let Some(multiplier) = options.rpc_timeout_multiplier {
            merged.rpc_timeout_multiplier = multiplier;
        }
        if let Some(timeout) = options.max_rpc_timeout {
            merged.max_rpc_timeout = timeout;
        }
        if let Some(timeout) = options.timeout {
            merged.total_timeout = timeout;
            merged.initial_rpc_timeout = merged.initial_rpc_timeout.min(timeout);
            merged.max_rpc_timeout = merged.max_rpc_timeout.min(timeout);
        }
        if let Some(codes) = &options.retryable_codes {
            merged.retryable_codes = codes.clone();
        }
        merged
    }
}

impl Default for CallSettings {
    fn default() -> Self {
        Self::no_retry(DEFAULT_TIMEOUT)
    }
}

/// How a long-running operation is polled until it finishes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollingSettings {
    pub initial_poll_delay: Duration,
    pub poll_delay_multiplier: f64,
    pub max_poll_delay: Duration,
    /// Bounds the first `GetOperation` call; later polls scale it.
    pub initial_rpc_timeout: Duration,
    pub rpc_timeout_multiplier: f64,
    pub max_rpc_timeout: Duration,
    /// Polling stops and the operation is cancelled past this budget.
    pub total_poll_timeout: Duration,
}

impl PollingSettings {
    /// The delay following `delay`, capped at the maximum.
    pub fn next_delay(&self, delay: Duration) -> Duration {
        scale(delay, self.poll_delay_multiplier, self.max_poll_delay)
    }

    /// The per-poll timeout following `timeout`, capped at the maximum.
    pub fn next_rpc_timeout(&self, timeout: Duration) -> Duration {
        scale(timeout, self.rpc_timeout_multiplier, self.max_rpc_timeout)
    }
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            initial_poll_delay: Duration::from_millis(5000),
            poll_delay_multiplier: 1.5,
            max_poll_delay: Duration::from_millis(45000),
            initial_rpc_timeout: DEFAULT_TIMEOUT,
            rpc_timeout_multiplier: 1.0,
            max_rpc_timeout: DEFAULT_TIMEOUT,
            total_poll_timeout: Duration::from_millis(300000),
        }
    }
}

/// Settings of a long-running method: the initial call and the polling that follows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OperationCallSettings {
    pub initial: CallSettings,
    pub polling: PollingSettings,
}

impl OperationCallSettings {
    pub fn merge(&self, options: &CallOptions) -> Self {
        Self {
            initial: self.initial.merge(options),
            polling: options.polling.unwrap_or(self.polling),
        }
    }
}

/// Overrides for a single call. Unset values fall back to the client's settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallOptions {
    /// Total budget for the call, retries included.
    pub timeout: Option<Duration>,
    pub retryable_codes: Option<Vec<Code>>,
    pub initial_retry_delay: Option<Duration>,
    pub retry_delay_multiplier: Option<f64>,
    pub max_retry_delay: Option<Duration>,
    pub initial_rpc_timeout: Option<Duration>,
    pub rpc_timeout_multiplier: Option<f64>,
    pub max_rpc_timeout: Option<Duration>,
    pub polling: Option<PollingSettings>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_retryable_codes(mut self, codes: impl IntoIterator<Item = Code>) -> Self {
        self.retryable_codes = Some(codes.into_iter().collect());
        self
    }

    /// Override the retry backoff: first delay, growth factor and cap.
    pub fn with_retry_delay(mut self, initial: Duration, multiplier: f64, max: Duration) -> Self {
        self.initial_retry_delay = Some(initial);
        self.retry_delay_multiplier = Some(multiplier);
        self.max_retry_delay = Some(max);
        self
    }

    /// Override the per-attempt timeout: first value, growth factor and cap.
    pub fn with_rpc_timeout(mut self, initial: Duration, multiplier: f64, max: Duration) -> Self {
        self.initial_rpc_timeout = Some(initial);
        self.rpc_timeout_multiplier = Some(multiplier);
        self.max_rpc_timeout = Some(max);
        self
    }

    pub fn with_polling(mut self, polling: PollingSettings) -> Self {
        self.polling = Some(polling);
        self
    }
}

/// `duration * factor`, capped at `max`; an out-of-range product yields `max`.
pub(crate) fn scale(duration: Duration, factor: f64, max: Duration) -> Duration {
    Duration::try_from_secs_f64(duration.as_secs_f64() * factor)
        .unwrap_or(max)
        .min(max)
}
