// This file is @generated by gapic. Do not edit.

//! Transport stubs.
//!
//! Clients talk to a stub trait object; the gRPC and HTTP/JSON stubs here implement it over a
//! channel. Implement the trait yourself to fake a service in tests.

pub mod echo_stub;
pub mod grpc_echo_stub;
pub mod http_json_echo_stub;

pub use echo_stub::EchoStub;
pub use grpc_echo_stub::GrpcEchoStub;
pub use http_json_echo_stub::HttpJsonEchoStub;
