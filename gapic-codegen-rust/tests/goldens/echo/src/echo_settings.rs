// This file is @generated by gapic. Do not edit.

//! Call settings of `google.showcase.v1beta1.Echo`.

use std::time::Duration;

use gapic_gax::{CallSettings, Code, OperationCallSettings, PollingSettings};

/// The host [`EchoClient`](crate::echo_client::EchoClient) talks to by default.
pub const DEFAULT_ENDPOINT: &str = "localhost:7469";

/// OAuth scopes requested by default.
pub const DEFAULT_SCOPES: &[&str] = &[];

/// Settings of [`EchoClient`](crate::echo_client::EchoClient).
///
/// Every method's settings can be overridden per call through its `_with_options` variant.
#[derive(Debug, Clone, PartialEq)]
pub struct EchoSettings {
    /// The service host, with an optional port.
    pub endpoint: String,
    pub scopes: Vec<String>,
    /// Settings of [`EchoClient::echo`](crate::echo_client::EchoClient::echo).
    pub echo: CallSettings,
    /// Settings of [`EchoClient::expand`](crate::echo_client::EchoClient::expand).
    pub expand: CallSettings,
    /// Settings of [`EchoClient::collect`](crate::echo_client::EchoClient::collect).
    pub collect: CallSettings,
    /// Settings of [`EchoClient::chat`](crate::echo_client::EchoClient::chat).
    pub chat: CallSettings,
    /// Settings of [`EchoClient::paged_expand`](crate::echo_client::EchoClient::paged_expand).
    pub paged_expand: CallSettings,
    /// Settings of [`EchoClient::wait`](crate::echo_client::EchoClient::wait).
    pub wait: OperationCallSettings,
    /// Settings of [`EchoClient::block`](crate::echo_client::EchoClient::block).
    pub block: CallSettings,
}

impl Default for EchoSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            scopes: DEFAULT_SCOPES.iter().map(|scope| scope.to_string()).collect(),
            echo: CallSettings {
                retryable_codes: vec![Code::Unknown, Code::Unavailable],
                initial_retry_delay: Duration::from_millis(100),
                retry_delay_multiplier: 2.0,
                max_retry_delay: Duration::from_millis(3000),
                initial_rpc_timeout: Duration::from_millis(10000),
                rpc_timeout_multiplier: 1.0,
                max_rpc_timeout: Duration::from_millis(10000),
                total_timeout: Duration::from_millis(10000),
            },
            expand: CallSettings::no_retry(Duration::from_millis(5000)),
            collect: CallSettings::no_retry(Duration::from_millis(5000)),
            chat: CallSettings::no_retry(Duration::from_millis(5000)),
            paged_expand: CallSettings::no_retry(Duration::from_millis(5000)),
            wait: OperationCallSettings {
                initial: CallSettings::no_retry(Duration::from_millis(5000)),
                polling: PollingSettings {
                    initial_poll_delay: Duration::from_millis(5000),
                    poll_delay_multiplier: 1.5,
                    max_poll_delay: Duration::from_millis(45000),
                    initial_rpc_timeout: Duration::from_millis(60000),
                    rpc_timeout_multiplier: 1.0,
                    max_rpc_timeout: Duration::from_millis(60000),
                    total_poll_timeout: Duration::from_millis(300000),
                },
            },
            block: CallSettings::no_retry(Duration::from_millis(5000)),
        }
    }
}
