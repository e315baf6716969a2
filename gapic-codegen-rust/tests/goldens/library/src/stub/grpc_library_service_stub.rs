// This file is @generated by gapic. Do not edit.

use std::sync::Arc;
use std::time::Duration;

use gapic_gax::{GrpcChannel, Result};
use gapic_gax::transport::{decode, encode};

use crate::model::{
    Book, CreateShelfRequest, DeleteShelfRequest, GetShelfRequest, ListBooksRequest,
    ListBooksResponse, MergeShelvesRequest, Shelf, UpdateBookRequest,
};
use crate::stub::LibraryServiceStub;

/// Calls `example.library.v1.LibraryService` over a gRPC channel.
#[derive(Debug, Clone)]
pub struct GrpcLibraryServiceStub {
    channel: Arc<dyn GrpcChannel>,
}

impl GrpcLibraryServiceStub {
    pub fn new(channel: Arc<dyn GrpcChannel>) -> Self {
        Self { channel }
    }
}

impl LibraryServiceStub for GrpcLibraryServiceStub {
    fn create_shelf(&self, request: &CreateShelfRequest, timeout: Duration) -> Result<Shelf> {
        let response = self.channel.unary(
            "/example.library.v1.LibraryService/CreateShelf",
            encode(request),
            timeout,
        )?;
        decode(&response)
    }

    fn get_shelf(&self, request: &GetShelfRequest, timeout: Duration) -> Result<Shelf> {
        let response = self.channel.unary(
            "/example.library.v1.LibraryService/GetShelf",
            encode(request),
            timeout,
        )?;
        decode(&response)
    }

    fn delete_shelf(&self, request: &DeleteShelfRequest, timeout: Duration) -> Result<()> {
        self.channel.unary(
            "/example.library.v1.LibraryService/DeleteShelf",
            encode(request),
            timeout,
        )?;
        Ok(())
    }

    fn merge_shelves(&self, request: &MergeShelvesRequest, timeout: Duration) -> Result<Shelf> {
        let response = self.channel.unary(
            "/example.library.v1.LibraryService/MergeShelves",
            encode(request),
            timeout,
        )?;
        decode(&response)
    }

    fn list_books(
        &self,
        request: &ListBooksRequest,
        timeout: Duration,
    ) -> Result<ListBooksResponse> {
        let response = self.channel.unary(
            "/example.library.v1.LibraryService/ListBooks",
            encode(request),
            timeout,
        )?;
        decode(&response)
    }

    fn update_book(&self, request: &UpdateBookRequest, timeout: Duration) -> Result<Book> {
        let response = self.channel.unary(
            "/example.library.v1.LibraryService/UpdateBook",
            encode(request),
            timeout,
        )?;
        decode(&response)
    }
}
