//! Errors shared by generated resource-name types.

use thiserror::Error;

/// A string that does not match any pattern of a resource type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{name}' is not a valid {resource_type} resource name")]
pub struct ResourceNameError {
    pub name: String,
    /// `library.example.com/Shelf`.
    pub resource_type: String,
}

impl ResourceNameError {
    pub fn new(name: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resource_type: resource_type.into(),
        }
    }
}
