//! Built-in lints.

mod duplicate_signature;
mod http_binding;
mod method_naming;
mod missing_documentation;
mod pagination_shape;
mod signature_field;
mod streaming_pagination;
mod unknown_config_method;

pub use duplicate_signature::DuplicateSignatureLint;
pub use http_binding::HttpBindingLint;
pub use method_naming::MethodNamingLint;
pub use missing_documentation::MissingDocumentationLint;
pub use pagination_shape::PaginationShapeLint;
pub use signature_field::SignatureFieldLint;
pub use streaming_pagination::StreamingPaginationLint;
pub use unknown_config_method::UnknownConfigMethodLint;
