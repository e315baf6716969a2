// This file is @generated by gapic. Do not edit.

//! Client library for the `google.showcase.v1beta1` API.
//!
//! # [`EchoClient`]
//!
//! This service is used showcase the four main types of rpcs - unary, server
//! side streaming, client side streaming, and bidirectional streaming. This
//! service also exposes methods that explicitly implement server delay, and
//! paginated calls.
//!
//! ```no_run
//! # use std::sync::Arc;
//! # fn sample(channel: Arc<dyn gapic_gax::GrpcChannel>) -> gapic_gax::Result<()> {
//! use google_showcase_v1beta1::EchoClient;
//! use google_showcase_v1beta1::model::EchoRequest;
//!
//! let client = EchoClient::grpc(channel);
//! let response = client.echo(EchoRequest::default())?;
//! println!("{response:?}");
//! # Ok(())
//! # }
//! ```

pub mod echo_client;
pub mod echo_settings;
/// Messages and enums, generated by `prost-build`.
pub mod model;
pub mod stub;

pub use echo_client::EchoClient;
pub use echo_settings::EchoSettings;
