// This file is @generated by gapic. Do not edit.

//! Client library for the `example.library.v1` API.
//!
//! # [`LibraryServiceClient`]
//!
//! Manages shelves of books.
//!
//! ```no_run
//! # use std::sync::Arc;
//! # fn sample(channel: Arc<dyn gapic_gax::GrpcChannel>) -> gapic_gax::Result<()> {
//! use example_library_v1::LibraryServiceClient;
//! use example_library_v1::model::CreateShelfRequest;
//!
//! let client = LibraryServiceClient::grpc(channel);
//! let response = client.create_shelf(CreateShelfRequest::default())?;
//! println!("{response:?}");
//! # Ok(())
//! # }
//! ```

pub mod library_service_client;
pub mod library_service_settings;
/// Messages and enums, generated by `prost-build`.
pub mod model;
pub mod resources;
pub mod stub;

pub use library_service_client::LibraryServiceClient;
pub use library_service_settings::LibraryServiceSettings;
