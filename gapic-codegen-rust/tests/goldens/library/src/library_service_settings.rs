// This file is @generated by gapic. Do not edit.

//! Call settings of `example.library.v1.LibraryService`.

use std::time::Duration;

use gapic_gax::CallSettings;

/// The host [`LibraryServiceClient`](crate::library_service_client::LibraryServiceClient) talks to
/// by default.
pub const DEFAULT_ENDPOINT: &str = "library.example.com";

/// OAuth scopes requested by default.
pub const DEFAULT_SCOPES: &[&str] = &["https://www.googleapis.com/auth/library"];

/// Settings of [`LibraryServiceClient`](crate::library_service_client::LibraryServiceClient).
///
/// Every method's settings can be overridden per call through its `_with_options` variant.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryServiceSettings {
    /// The service host, with an optional port.
    pub endpoint: String,
    pub scopes: Vec<String>,
    /// Settings of
    /// [`LibraryServiceClient::create_shelf`](crate::library_service_client::LibraryServiceClient::create_shelf).
    pub create_shelf: CallSettings,
    /// Settings of
    /// [`LibraryServiceClient::get_shelf`](crate::library_service_client::LibraryServiceClient::get_shelf).
    pub get_shelf: CallSettings,
    /// Settings of
    /// [`LibraryServiceClient::delete_shelf`](crate::library_service_client::LibraryServiceClient::delete_shelf).
    pub delete_shelf: CallSettings,
    /// Settings of
    /// [`LibraryServiceClient::merge_shelves`](crate::library_service_client::LibraryServiceClient::merge_shelves).
    pub merge_shelves: CallSettings,
    /// Settings of
    /// [`LibraryServiceClient::list_books`](crate::library_service_client::LibraryServiceClient::list_books).
    pub list_books: CallSettings,
    /// Settings of
    /// [`LibraryServiceClient::update_book`](crate::library_service_client::LibraryServiceClient::update_book).
    pub update_book: CallSettings,
}

impl Default for LibraryServiceSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            scopes: DEFAULT_SCOPES.iter().map(|scope| scope.to_string()).collect(),
            create_shelf: CallSettings::no_retry(Duration::from_millis(60000)),
            get_shelf: CallSettings::no_retry(Duration::from_millis(60000)),
            delete_shelf: CallSettings::no_retry(Duration::from_millis(60000)),
            merge_shelves: CallSettings::no_retry(Duration::from_millis(60000)),
            list_books: CallSettings::no_retry(Duration::from_millis(60000)),
            update_book: CallSettings::no_retry(Duration::from_millis(60000)),
        }
    }
}
