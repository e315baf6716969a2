// This file is @generated by gapic. Do not edit.

use std::fmt::Debug;
use std::time::Duration;

use gapic_gax::Result;

use crate::model::{
    Book, CreateShelfRequest, DeleteShelfRequest, GetShelfRequest, ListBooksRequest,
    ListBooksResponse, MergeShelvesRequest, Shelf, UpdateBookRequest,
};

/// The calls of [`LibraryServiceClient`](crate::library_service_client::LibraryServiceClient) as a
/// transport sees them.
///
/// Each call is a single attempt bounded by `timeout`; retries and pagination live in the client.
pub trait LibraryServiceStub: Send + Sync + Debug {
    /// Creates a shelf.
    fn create_shelf(&self, request: &CreateShelfRequest, timeout: Duration) -> Result<Shelf>;

    /// Gets a shelf.
    fn get_shelf(&self, request: &GetShelfRequest, timeout: Duration) -> Result<Shelf>;

    /// Deletes a shelf.
    fn delete_shelf(&self, request: &DeleteShelfRequest, timeout: Duration) -> Result<()>;

    /// Moves every book from one shelf onto another.
    fn merge_shelves(&self, request: &MergeShelvesRequest, timeout: Duration) -> Result<Shelf>;

    /// Lists books on a shelf.
    fn list_books(
        &self,
        request: &ListBooksRequest,
        timeout: Duration,
    ) -> Result<ListBooksResponse>;

    /// Updates a book.
    fn update_book(&self, request: &UpdateBookRequest, timeout: Duration) -> Result<Book>;
}
