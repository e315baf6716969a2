//! Call shapes and the metadata that only exists for some of them.

use std::{fmt, time::Duration};

use serde::Serialize;

use crate::{FieldType, serde_helpers::serialize_duration};

/// How a method is exposed to callers. Exactly one per method.
///
/// Pagination and operation metadata live inside their variants, so a
/// method can only carry them when it has that shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CallShape {
    Unary,
    ServerStreaming,
    ClientStreaming,
    Bidi,
    Paged(PaginationInfo),
    LongRunning(OperationInfo),
}

impl CallShape {
    /// Resolve the shape from the method's signals.
    ///
    /// Operation metadata wins over everything, then a pagination field set,
    /// then the streaming markers; anything else is unary.
    pub fn resolve(
        operation: Option<OperationInfo>,
        pagination: Option<PaginationInfo>,
        client_streaming: bool,
        server_streaming: bool,
    ) -> Self {
        if let Some(operation) = operation {
            return Self::LongRunning(operation);
        }
        if let Some(pagination) = pagination {
            return Self::Paged(pagination);
        }
        match (client_streaming, server_streaming) {
            (true, true) => Self::Bidi,
            (true, false) => Self::ClientStreaming,
            (false, true) => Self::ServerStreaming,
            (false, false) => Self::Unary,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Unary => "unary",
            Self::ServerStreaming => "server-streaming",
            Self::ClientStreaming => "client-streaming",
            Self::Bidi => "bidi-streaming",
            Self::Paged(_) => "paged",
            Self::LongRunning(_) => "long-running",
        }
    }

    pub fn pagination(&self) -> Option<&PaginationInfo> {
        match self {
            Self::Paged(info) => Some(info),
            _ => None,
        }
    }

    pub fn operation(&self) -> Option<&OperationInfo> {
        match self {
            Self::LongRunning(info) => Some(info),
            _ => None,
        }
    }

    pub fn is_streaming(&self) -> bool {
        matches!(self, Self::ServerStreaming | Self::ClientStreaming | Self::Bidi)
    }
}

impl fmt::Display for CallShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The fields a paged method threads through successive calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginationInfo {
    pub page_size_field: String,
    pub page_token_field: String,
    pub next_page_token_field: String,
    /// The repeated response field holding each page's elements.
    pub items_field: String,
    pub item_type: FieldType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationInfo {
    pub response_type: String,
    pub metadata_type: String,
    pub polling: PollingSettings,
}

/// How a long-running operation is polled until it completes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PollingSettings {
    #[serde(serialize_with = "serialize_duration")]
    pub initial_poll_delay: Duration,
    pub poll_delay_multiplier: f64,
    #[serde(serialize_with = "serialize_duration")]
    pub max_poll_delay: Duration,
    /// Bounds each poll; scaled by the multiplier after every poll.
    #[serde(serialize_with = "serialize_duration")]
    pub initial_rpc_timeout: Duration,
    pub rpc_timeout_multiplier: f64,
    #[serde(serialize_with = "serialize_duration")]
    pub max_rpc_timeout: Duration,
    #[serde(serialize_with = "serialize_duration")]
    pub total_poll_timeout: Duration,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            initial_poll_delay: Duration::from_millis(5000),
            poll_delay_multiplier: 1.5,
            max_poll_delay: Duration::from_millis(45000),
            initial_rpc_timeout: Duration::from_millis(60000),
            rpc_timeout_multiplier: 1.0,
            max_rpc_timeout: Duration::from_millis(60000),
            total_poll_timeout: Duration::from_millis(300000),
        }
    }
}

#[cfg(test)]
mod tests {
    use gapic_core::ScalarType;

    use super::*;

    fn pagination() -> PaginationInfo {
        PaginationInfo {
            page_size_field: "page_size".into(),
            page_token_field: "page_token".into(),
            next_page_token_field: "next_page_token".into(),
            items_field: "responses".into(),
            item_type: FieldType::Scalar(ScalarType::String),
        }
    }

    fn operation() -> OperationInfo {
        OperationInfo {
            response_type: "google.showcase.v1beta1.WaitResponse".into(),
            metadata_type: "google.showcase.v1beta1.WaitMetadata".into(),
            polling: PollingSettings::default(),
        }
    }

    #[test]
    fn test_operation_beats_pagination() {
        let shape = CallShape::resolve(Some(operation()), Some(pagination()), false, false);
        assert_eq!(shape.name(), "long-running");
        assert!(shape.pagination().is_none());
    }

    #[test]
    fn test_pagination_beats_streaming() {
        let shape = CallShape::resolve(None, Some(pagination()), false, true);
        assert_eq!(shape, CallShape::Paged(pagination()));
    }

    #[test]
    fn test_streaming_markers() {
        assert_eq!(CallShape::resolve(None, None, true, true), CallShape::Bidi);
        assert_eq!(CallShape::resolve(None, None, true, false), CallShape::ClientStreaming);
        assert_eq!(CallShape::resolve(None, None, false, true), CallShape::ServerStreaming);
        assert_eq!(CallShape::resolve(None, None, false, false), CallShape::Unary);
    }

    #[test]
    fn test_polling_defaults() {
        let polling = PollingSettings::default();
        assert_eq!(polling.initial_poll_delay, Duration::from_secs(5));
        assert_eq!(polling.max_poll_delay, Duration::from_secs(45));
        assert_eq!(polling.initial_rpc_timeout, Duration::from_secs(60));
        assert_eq!(polling.rpc_timeout_multiplier, 1.0);
        assert_eq!(polling.total_poll_timeout, Duration::from_secs(300));
    }
}
