// This file is @generated by gapic. Do not edit.

//! Transport stubs.
//!
//! Clients talk to a stub trait object; the gRPC and HTTP/JSON stubs here implement it over a
//! channel. Implement the trait yourself to fake a service in tests.

pub mod library_service_stub;
pub mod grpc_library_service_stub;
pub mod http_json_library_service_stub;

pub use library_service_stub::LibraryServiceStub;
pub use grpc_library_service_stub::GrpcLibraryServiceStub;
pub use http_json_library_service_stub::HttpJsonLibraryServiceStub;
