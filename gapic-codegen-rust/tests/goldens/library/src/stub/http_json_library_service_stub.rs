// This file is @generated by gapic. Do not edit.

use std::sync::Arc;
use std::time::Duration;

use gapic_gax::{HttpChannel, HttpMethod, HttpRequest, Result};
use gapic_gax::http::{from_json, path_param, to_json};

use crate::model::{
    Book, CreateShelfRequest, DeleteShelfRequest, GetShelfRequest, ListBooksRequest,
    ListBooksResponse, MergeShelvesRequest, Shelf, UpdateBookRequest,
};
use crate::stub::LibraryServiceStub;

/// Calls `example.library.v1.LibraryService` over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpJsonLibraryServiceStub {
    channel: Arc<dyn HttpChannel>,
}

impl HttpJsonLibraryServiceStub {
    pub fn new(channel: Arc<dyn HttpChannel>) -> Self {
        Self { channel }
    }
}

impl LibraryServiceStub for HttpJsonLibraryServiceStub {
    fn create_shelf(&self, request: &CreateShelfRequest, timeout: Duration) -> Result<Shelf> {
        let http_request = HttpRequest {
            method: HttpMethod::Post,
            path: "/v1/shelves".to_string(),
            query: Vec::new(),
            body: Some(to_json(&request.shelf)?),
        };
        let response = self.channel.execute(http_request, timeout)?;
        from_json(&response)
    }

    fn get_shelf(&self, request: &GetShelfRequest, timeout: Duration) -> Result<Shelf> {
        let name = path_param("name", &request.name, "shelves/*")?;
        let http_request = HttpRequest {
            method: HttpMethod::Get,
            path: format!("/v1/{name}"),
            query: Vec::new(),
            body: None,
        };
        let response = self.channel.execute(http_request, timeout)?;
        from_json(&response)
    }

    fn delete_shelf(&self, request: &DeleteShelfRequest, timeout: Duration) -> Result<()> {
        let name = path_param("name", &request.name, "shelves/*")?;
        let http_request = HttpRequest {
            method: HttpMethod::Delete,
            path: format!("/v1/{name}"),
            query: Vec::new(),
            body: None,
        };
        self.channel.execute(http_request, timeout)?;
        Ok(())
    }

    fn merge_shelves(&self, request: &MergeShelvesRequest, timeout: Duration) -> Result<Shelf> {
        let name = path_param("name", &request.name, "shelves/*")?;
        let http_request = HttpRequest {
            method: HttpMethod::Post,
            path: format!("/v1/{name}:merge"),
            query: Vec::new(),
            body: Some(to_json(request)?),
        };
        let response = self.channel.execute(http_request, timeout)?;
        from_json(&response)
    }

    fn list_books(
        &self,
        request: &ListBooksRequest,
        timeout: Duration,
    ) -> Result<ListBooksResponse> {
        let parent = path_param("parent", &request.parent, "shelves/*")?;
        let mut query = Vec::new();
        if request.page_size != 0 {
            query.push(("pageSize".to_string(), request.page_size.to_string()));
        }
        if !request.page_token.is_empty() {
            query.push(("pageToken".to_string(), request.page_token.to_string()));
        }
        let http_request = HttpRequest {
            method: HttpMethod::Get,
            path: format!("/v1/{parent}/books"),
            query,
            body: None,
        };
        let response = self.channel.execute(http_request, timeout)?;
        from_json(&response)
    }

    fn update_book(&self, request: &UpdateBookRequest, timeout: Duration) -> Result<Book> {
        let book_name = path_param(
            "book.name",
            &request.book.as_ref().map(|book| book.name.to_string()).unwrap_or_default(),
            "shelves/*/books/*",
        )?;
        let http_request = HttpRequest {
            method: HttpMethod::Patch,
            path: format!("/v1/{book_name}"),
            query: Vec::new(),
            body: Some(to_json(&request.book)?),
        };
        let response = self.channel.execute(http_request, timeout)?;
        from_json(&response)
    }
}
