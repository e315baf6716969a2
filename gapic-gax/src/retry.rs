//! The retry loop every generated call runs through.

use std::time::Duration;

use crate::{CallSettings, Clock, Result, call::scale};

/// Run `call` under `settings`.
///
/// `call` receives the timeout for one attempt. Failures with a retryable
/// code are retried after a growing delay while the total budget allows
/// another attempt; the last failure is returned once it does not.
pub fn invoke<T>(
    settings: &CallSettings,
    clock: &dyn Clock,
    mut call: impl FnMut(Duration) -> Result<T>,
) -> Result<T> {
    let deadline = clock.now() + settings.total_timeout;
    let mut delay = settings.initial_retry_delay;
    let mut rpc_timeout = settings.initial_rpc_timeout;
    let mut attempt = 1u32;

    loop {
        let remaining = deadline.saturating_duration_since(clock.now());
        let status = match call(rpc_timeout.min(remaining)) {
            Ok(value) => return Ok(value),
            Err(status) => status,
        };
        if !settings.retryable_codes.contains(&status.code) {
            return Err(status);
        }
        if clock.now() + delay >= deadline {
            tracing::debug!(attempt, code = %status.code, "retry budget exhausted");
            return Err(status);
        }

        tracing::debug!(attempt, code = %status.code, ?delay, "retrying");
        clock.sleep(delay);
        delay = scale(
            delay,
            settings.retry_delay_multiplier,
            settings.max_retry_delay,
        );
        rpc_timeout = scale(
            rpc_timeout,
            settings.rpc_timeout_multiplier,
            settings.max_rpc_timeout,
        );
        attempt += 1;
    }
}
