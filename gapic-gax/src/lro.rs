//! Polling long-running operations to completion.
//!
//! [`OperationFuture`] is an explicit state machine:
//!
//! ```text
//! Pending → Polling(delay) → Polling(delay × multiplier) → … → Done
//!                 ↘ Expired (budget exceeded, operation cancelled)
//!     any non-terminal state → Cancelled (caller cancelled)
//! ```
//!
//! Each [`OperationFuture::poll`] call advances it by one step, so hosts can
//! drive it from a blocking loop ([`OperationFuture::wait`]) or schedule the
//! steps themselves.

use std::{
    marker::PhantomData,
    sync::Arc,
    time::{Duration, Instant},
};

use prost::Name;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::{
    Clock, PollingSettings, Result, Status,
    longrunning::{CancelOperationRequest, GetOperationRequest, Operation, operation},
    protobuf::AnyError,
};

/// The operations service every stub of a long-running method also speaks.
pub trait Operations: Send + Sync {
    fn get_operation(&self, request: &GetOperationRequest, timeout: Duration) -> Result<Operation>;

    fn cancel_operation(&self, request: &CancelOperationRequest, timeout: Duration) -> Result<()>;
}

impl<S: Operations + ?Sized> Operations for Arc<S> {
    fn get_operation(
        &self,
        request: &GetOperationRequest,
        timeout: Duration,
    ) -> Result<Operation> {
        (**self).get_operation(request, timeout)
    }

    fn cancel_operation(
        &self,
        request: &CancelOperationRequest,
        timeout: Duration,
    ) -> Result<()> {
        (**self).cancel_operation(request, timeout)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PollState {
    /// Not polled yet.
    Pending,
    /// The next poll happens after this delay.
    Polling(Duration),
    Done,
    /// Cancelled by the caller.
    Cancelled,
    /// The polling budget ran out and the operation was cancelled.
    Expired,
}

impl PollState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Cancelled | Self::Expired)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OperationError {
    /// The operation finished with an error.
    #[error("operation '{name}' failed: {status}")]
    Failed { name: String, status: Status },

    #[error("operation '{name}' was cancelled: {reason}")]
    Cancelled { name: String, reason: String },

    /// Polling itself failed, or the result could not be decoded.
    #[error("polling operation '{name}' failed: {status}")]
    Transport { name: String, status: Status },
}

/// A handle to a long-running operation with response type `R` and
/// metadata type `M`.
pub struct OperationFuture<R, M> {
    operation: Operation,
    operations: Box<dyn Operations>,
    polling: PollingSettings,
    clock: Arc<dyn Clock>,
    started: Instant,
    state: PollState,
    rpc_timeout: Duration,
    _types: PhantomData<fn() -> (R, M)>,
}

impl<R, M> OperationFuture<R, M>
where
    R: Name + DeserializeOwned + Default,
    M: Name + DeserializeOwned + Default,
{
    /// Track `operation`, as returned by the method that started it.
    pub fn new(
        operation: Operation,
        operations: impl Operations + 'static,
        polling: PollingSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let state = if operation.done {
            PollState::Done
        } else {
            PollState::Pending
        };
        Self {
            started: clock.now(),
            operation,
            operations: Box::new(operations),
            rpc_timeout: polling.initial_rpc_timeout,
            polling,
            clock,
            state,
            _types: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.operation.name
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    /// The operation as of the last poll.
    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    /// Metadata reported by the last poll, if any.
    pub fn metadata(&self) -> std::result::Result<Option<M>, OperationError> {
        self.operation
            .metadata
            .as_ref()
            .map(|any| any.unpack::<M>().map_err(|err| self.decode_error("metadata", err)))
            .transpose()
    }

    /// Advance by one step: sleep for the current delay and poll once.
    ///
    /// Each poll is bounded by the current rpc timeout and by what is left
    /// of the total budget, whichever is shorter.
    ///
    /// When the next poll would land past the total polling timeout the
    /// operation is cancelled instead and the state becomes
    /// [`PollState::Expired`]. Terminal states are returned unchanged.
    pub fn poll(&mut self) -> std::result::Result<PollState, OperationError> {
        self.state = match self.state {
            PollState::Pending => PollState::Polling(self.polling.initial_poll_delay),
            PollState::Polling(delay) => self.poll_after(delay)?,
            terminal => terminal,
        };
        Ok(self.state)
    }

    fn poll_after(&mut self, delay: Duration) -> std::result::Result<PollState, OperationError> {
        let elapsed = self.clock.now().saturating_duration_since(self.started);
        let budget = self.polling.total_poll_timeout;
        if elapsed + delay > budget {
            tracing::debug!(name = %self.operation.name, ?elapsed, "polling budget exceeded");
            if let Err(status) = self.cancel_remote(budget.saturating_sub(elapsed)) {
                tracing::warn!(name = %self.operation.name, %status, "cancel failed");
            }
            return Ok(PollState::Expired);
        }

        self.clock.sleep(delay);
        let request = GetOperationRequest {
            name: self.operation.name.clone(),
        };
        let timeout = self.rpc_timeout.min(budget - elapsed - delay);
        self.rpc_timeout = self.polling.next_rpc_timeout(self.rpc_timeout);
        self.operation = self
            .operations
            .get_operation(&request, timeout)
            .map_err(|status| OperationError::Transport {
                name: self.operation.name.clone(),
                status,
            })?;

        if self.operation.done {
            Ok(PollState::Done)
        } else {
            Ok(PollState::Polling(self.polling.next_delay(delay)))
        }
    }

    /// Ask the server to cancel the operation and stop polling.
    ///
    /// Cancelling a finished operation does nothing.
    pub fn cancel(&mut self) -> std::result::Result<(), OperationError> {
        if self.state.is_terminal() {
            return Ok(());
        }
        let elapsed = self.clock.now().saturating_duration_since(self.started);
        self.cancel_remote(self.polling.total_poll_timeout.saturating_sub(elapsed))
            .map_err(|status| OperationError::Transport {
                name: self.operation.name.clone(),
                status,
            })?;
        self.state = PollState::Cancelled;
        Ok(())
    }

    fn cancel_remote(&self, timeout: Duration) -> Result<()> {
        let request = CancelOperationRequest {
            name: self.operation.name.clone(),
        };
        self.operations.cancel_operation(&request, timeout)
    }

    /// Poll until the operation finishes, is cancelled or runs out of budget.
    pub fn wait(mut self) -> std::result::Result<R, OperationError> {
        loop {
            match self.poll()? {
                PollState::Done => return self.result(),
                PollState::Cancelled => return Err(self.cancelled("cancelled by caller")),
                PollState::Expired => {
                    let reason = format!(
                        "total polling timeout of {:?} exceeded",
                        self.polling.total_poll_timeout
                    );
                    return Err(self.cancelled(&reason));
                }
                PollState::Pending | PollState::Polling(_) => {}
            }
        }
    }

    fn result(&self) -> std::result::Result<R, OperationError> {
        match &self.operation.result {
            Some(operation::Result::Error(status)) => Err(OperationError::Failed {
                name: self.operation.name.clone(),
                status: Status::from(status),
            }),
            Some(operation::Result::Response(any)) => any
                .unpack::<R>()
                .map_err(|err| self.decode_error("response", err)),
            None if R::full_name() == "google.protobuf.Empty" => Ok(R::default()),
            None => Err(OperationError::Transport {
                name: self.operation.name.clone(),
                status: Status::internal("operation finished without a response"),
            }),
        }
    }

    fn cancelled(&self, reason: &str) -> OperationError {
        OperationError::Cancelled {
            name: self.operation.name.clone(),
            reason: reason.to_string(),
        }
    }

    fn decode_error(&self, what: &str, err: AnyError) -> OperationError {
        OperationError::Transport {
            name: self.operation.name.clone(),
            status: Status::internal(format!("failed to decode {what}: {err}")),
        }
    }
}
