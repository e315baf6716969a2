// This file is @generated by gapic. Do not edit.

//! Resource names of this API.

use std::fmt::{Display, Formatter, Result};

use gapic_gax::ResourceNameError;

/// The name of a `library.example.com/Shelf` resource: `shelves/{shelf}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShelfName {
    pub shelf: String,
}

impl ShelfName {
    /// The name `shelves/{shelf}` with its variables filled in.
    pub fn of(shelf: impl Into<String>) -> Self {
        Self {
            shelf: shelf.into(),
        }
    }

    /// Parse a `library.example.com/Shelf` name.
    pub fn parse(name: &str) -> std::result::Result<Self, ResourceNameError> {
        let segments = name.split("/").collect::<Vec<_>>();
        match segments.as_slice() {
            ["shelves", shelf] if !shelf.is_empty() => Ok(Self {
                shelf: shelf.to_string(),
            }),
            _ => Err(ResourceNameError::new(name, "library.example.com/Shelf")),
        }
    }
}

impl Display for ShelfName {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "shelves/{}", self.shelf)
    }
}

/// The name of a `library.example.com/Book` resource: `shelves/{shelf}/books/{book}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookName {
    pub shelf: String,
    pub book: String,
}

impl BookName {
    /// The name `shelves/{shelf}/books/{book}` with its variables filled in.
    pub fn of(shelf: impl Into<String>, book: impl Into<String>) -> Self {
        Self {
            shelf: shelf.into(),
            book: book.into(),
        }
    }

    /// Parse a `library.example.com/Book` name.
    pub fn parse(name: &str) -> std::result::Result<Self, ResourceNameError> {
        let segments = name.split("/").collect::<Vec<_>>();
        match segments.as_slice() {
            ["shelves", shelf, "books", book] if !shelf.is_empty() && !book.is_empty() => Ok(Self {
                shelf: shelf.to_string(),
                book: book.to_string(),
            }),
            _ => Err(ResourceNameError::new(name, "library.example.com/Book")),
        }
    }
}

impl Display for BookName {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "shelves/{}/books/{}", self.shelf, self.book)
    }
}
