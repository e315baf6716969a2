// This file is @generated by gapic. Do not edit.

//! The client of `example.library.v1.LibraryService`.

use std::sync::Arc;

use gapic_gax::{
    CallOptions, Clock, GrpcChannel, HttpChannel, PageDescriptor, PagedResponse, Result,
    SystemClock, invoke,
};
use gapic_gax::protobuf::FieldMask;

use crate::library_service_settings::LibraryServiceSettings;
use crate::model::{
    Book, CreateShelfRequest, DeleteShelfRequest, GetShelfRequest, ListBooksRequest,
    ListBooksResponse, MergeShelvesRequest, Shelf, UpdateBookRequest,
};
use crate::resources::ShelfName;
use crate::stub::{GrpcLibraryServiceStub, HttpJsonLibraryServiceStub, LibraryServiceStub};

/// Manages shelves of books.
///
/// Cloning a client is cheap: clones share the stub and the clock. Calls block the current thread
/// until they complete.
#[derive(Debug, Clone)]
pub struct LibraryServiceClient {
    stub: Arc<dyn LibraryServiceStub>,
    settings: LibraryServiceSettings,
    clock: Arc<dyn Clock>,
}

impl LibraryServiceClient {
    /// A client over `stub` with the default settings.
    pub fn new(stub: Arc<dyn LibraryServiceStub>) -> Self {
        Self::with_settings(stub, LibraryServiceSettings::default())
    }

    pub fn with_settings(
        stub: Arc<dyn LibraryServiceStub>,
        settings: LibraryServiceSettings,
    ) -> Self {
        Self {
            stub,
            settings,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock retries and polling wait on.
    pub fn with_clock(self, clock: Arc<dyn Clock>) -> Self {
        Self { clock, ..self }
    }

    /// A client calling the service over gRPC.
    pub fn grpc(channel: Arc<dyn GrpcChannel>) -> Self {
        Self::new(Arc::new(GrpcLibraryServiceStub::new(channel)))
    }

    /// A client calling the service over HTTP/JSON.
    pub fn http_json(channel: Arc<dyn HttpChannel>) -> Self {
        Self::new(Arc::new(HttpJsonLibraryServiceStub::new(channel)))
    }

    pub fn settings(&self) -> &LibraryServiceSettings {
        &self.settings
    }

    /// Creates a shelf.
    pub fn create_shelf(&self, request: CreateShelfRequest) -> Result<Shelf> {
        self.create_shelf_with_options(request, CallOptions::default())
    }

    /// [`Self::create_shelf`] with per-call overrides of the settings.
    pub fn create_shelf_with_options(
        &self,
        request: CreateShelfRequest,
        options: CallOptions,
    ) -> Result<Shelf> {
        let settings = self.settings.create_shelf.merge(&options);
        invoke(
            &settings,
            self.clock.as_ref(),
            |timeout| self.stub.create_shelf(&request, timeout),
        )
    }

    /// Creates a shelf.
    pub fn create_shelf_by_shelf(&self, shelf: Shelf) -> Result<Shelf> {
        let request = CreateShelfRequest {
            shelf: Some(shelf),
            ..Default::default()
        };
        self.create_shelf(request)
    }

    /// Gets a shelf.
    pub fn get_shelf(&self, request: GetShelfRequest) -> Result<Shelf> {
        self.get_shelf_with_options(request, CallOptions::default())
    }

    /// [`Self::get_shelf`] with per-call overrides of the settings.
    pub fn get_shelf_with_options(
        &self,
        request: GetShelfRequest,
        options: CallOptions,
    ) -> Result<Shelf> {
        let settings = self.settings.get_shelf.merge(&options);
        invoke(
            &settings,
            self.clock.as_ref(),
            |timeout| self.stub.get_shelf(&request, timeout),
        )
    }

    /// Gets a shelf.
    pub fn get_shelf_by_name(&self, name: &ShelfName) -> Result<Shelf> {
        let request = GetShelfRequest {
            name: name.to_string(),
            ..Default::default()
        };
        self.get_shelf(request)
    }

    /// Deletes a shelf.
    pub fn delete_shelf(&self, request: DeleteShelfRequest) -> Result<()> {
        self.delete_shelf_with_options(request, CallOptions::default())
    }

    /// [`Self::delete_shelf`] with per-call overrides of the settings.
    pub fn delete_shelf_with_options(
        &self,
        request: DeleteShelfRequest,
        options: CallOptions,
    ) -> Result<()> {
        let settings = self.settings.delete_shelf.merge(&options);
        invoke(
            &settings,
            self.clock.as_ref(),
            |timeout| self.stub.delete_shelf(&request, timeout),
        )
    }

    /// Deletes a shelf.
    pub fn delete_shelf_by_name(&self, name: &ShelfName) -> Result<()> {
        let request = DeleteShelfRequest {
            name: name.to_string(),
            ..Default::default()
        };
        self.delete_shelf(request)
    }

    /// Moves every book from one shelf onto another.
    pub fn merge_shelves(&self, request: MergeShelvesRequest) -> Result<Shelf> {
        self.merge_shelves_with_options(request, CallOptions::default())
    }

    /// [`Self::merge_shelves`] with per-call overrides of the settings.
    pub fn merge_shelves_with_options(
        &self,
        request: MergeShelvesRequest,
        options: CallOptions,
    ) -> Result<Shelf> {
        let settings = self.settings.merge_shelves.merge(&options);
        invoke(
            &settings,
            self.clock.as_ref(),
            |timeout| self.stub.merge_shelves(&request, timeout),
        )
    }

    /// Moves every book from one shelf onto another.
    pub fn merge_shelves_by_name_and_other_shelf(
        &self,
        name: &ShelfName,
        other_shelf: &ShelfName,
    ) -> Result<Shelf> {
        let request = MergeShelvesRequest {
            name: name.to_string(),
            other_shelf: other_shelf.to_string(),
            ..Default::default()
        };
        self.merge_shelves(request)
    }

    /// Lists books on a shelf.
    pub fn list_books(&self, request: ListBooksRequest) -> PagedResponse<ListBooksDescriptor> {
        self.list_books_with_options(request, CallOptions::default())
    }

    /// [`Self::list_books`] with per-call overrides of the settings.
    pub fn list_books_with_options(
        &self,
        request: ListBooksRequest,
        options: CallOptions,
    ) -> PagedResponse<ListBooksDescriptor> {
        let settings = self.settings.list_books.merge(&options);
        let stub = Arc::clone(&self.stub);
        let clock = Arc::clone(&self.clock);
        PagedResponse::<ListBooksDescriptor>::new(request, move |request| {
            invoke(&settings, clock.as_ref(), |timeout| stub.list_books(&request, timeout))
        })
    }

    /// Lists books on a shelf.
    pub fn list_books_by_parent(&self, parent: &ShelfName) -> PagedResponse<ListBooksDescriptor> {
        let request = ListBooksRequest {
            parent: parent.to_string(),
            ..Default::default()
        };
        self.list_books(request)
    }

    /// Updates a book.
    pub fn update_book(&self, request: UpdateBookRequest) -> Result<Book> {
        self.update_book_with_options(request, CallOptions::default())
    }

    /// [`Self::update_book`] with per-call overrides of the settings.
    pub fn update_book_with_options(
        &self,
        request: UpdateBookRequest,
        options: CallOptions,
    ) -> Result<Book> {
        let settings = self.settings.update_book.merge(&options);
        invoke(
            &settings,
            self.clock.as_ref(),
            |timeout| self.stub.update_book(&request, timeout),
        )
    }

    /// Updates a book.
    pub fn update_book_by_book_and_update_mask(
        &self,
        book: Book,
        update_mask: FieldMask,
    ) -> Result<Book> {
        let request = UpdateBookRequest {
            book: Some(book),
            update_mask: Some(update_mask),
            ..Default::default()
        };
        self.update_book(request)
    }
}

/// Pages of [`LibraryServiceClient::list_books`].
#[derive(Debug)]
pub struct ListBooksDescriptor;

impl PageDescriptor for ListBooksDescriptor {
    type Request = ListBooksRequest;
    type Response = ListBooksResponse;
    type Item = Book;

    fn set_page_token(request: &mut ListBooksRequest, token: String) {
        request.page_token = token;
    }

    fn next_page_token(response: &ListBooksResponse) -> &str {
        &response.next_page_token
    }

    fn items(response: ListBooksResponse) -> Vec<Book> {
        response.books
    }
}
