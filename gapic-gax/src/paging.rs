//! Lazy iteration over paginated list methods.

use std::vec;

use crate::Result;

/// Wires a paged method's request token, response token and resource field
/// into [`PagedResponse`].
pub trait PageDescriptor {
    type Request: Clone;
    type Response;
    type Item;

    fn set_page_token(request: &mut Self::Request, token: String);

    /// The token of the following page; empty on the last page.
    fn next_page_token(response: &Self::Response) -> &str;

    /// The resources carried by one page.
    fn items(response: Self::Response) -> Vec<Self::Item>;
}

enum Cursor {
    First,
    Next(String),
    Done,
}

type Fetch<D> = Box<
    dyn FnMut(<D as PageDescriptor>::Request) -> Result<<D as PageDescriptor>::Response> + Send,
>;

/// Every resource of a paged method, fetched one page at a time.
///
/// Pages are requested only when the previous one is used up. Iteration is
/// forward-only and ends after the page with an empty next-page token or
/// after the first error; starting over takes a new call.
pub struct PagedResponse<D: PageDescriptor> {
    request: D::Request,
    fetch: Fetch<D>,
    cursor: Cursor,
    buffered: vec::IntoIter<D::Item>,
}

impl<D: PageDescriptor> PagedResponse<D> {
    /// `fetch` performs one remote call for the given page request.
    pub fn new(
        request: D::Request,
        fetch: impl FnMut(D::Request) -> Result<D::Response> + Send + 'static,
    ) -> Self {
        Self {
            request,
            fetch: Box::new(fetch),
            cursor: Cursor::First,
            buffered: Vec::new().into_iter(),
        }
    }

    /// Iterate over whole pages instead of single resources.
    ///
    /// Resources already buffered from a started page are skipped.
    pub fn pages(self) -> Pages<D> {
        Pages(self)
    }

    fn next_page(&mut self) -> Option<Result<D::Response>> {
        let mut request = self.request.clone();
        match std::mem::replace(&mut self.cursor, Cursor::Done) {
            Cursor::Done => return None,
            Cursor::First => {}
            Cursor::Next(token) => D::set_page_token(&mut request, token),
        }

        let response = match (self.fetch)(request) {
            Ok(response) => response,
            Err(status) => return Some(Err(status)),
        };
        let token = D::next_page_token(&response);
        if !token.is_empty() {
            self.cursor = Cursor::Next(token.to_string());
        }
        Some(Ok(response))
    }
}

impl<D: PageDescriptor> Iterator for PagedResponse<D> {
    type Item = Result<D::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffered.next() {
                return Some(Ok(item));
            }
            match self.next_page()? {
                Ok(response) => self.buffered = D::items(response).into_iter(),
                Err(status) => return Some(Err(status)),
            }
        }
    }
}

/// Page-by-page view of a [`PagedResponse`].
pub struct Pages<D: PageDescriptor>(PagedResponse<D>);

impl<D: PageDescriptor> Iterator for Pages<D> {
    type Item = Result<D::Response>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next_page()
    }
}
