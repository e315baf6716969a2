//! Built-in pipeline phases.
//!
//! - [`ValidatePhase`] - lints descriptors and configuration
//! - [`BuildPhase`] - derives the semantic model

mod build;
mod fields;
mod pagination;
mod validate;

pub use build::BuildPhase;
pub use validate::{
    DuplicateSignatureLint, HttpBindingLint, Lint, LintInfo, MethodNamingLint,
    MissingDocumentationLint, PaginationShapeLint, SignatureFieldLint, StreamingPaginationLint,
    UnknownConfigMethodLint, ValidatePhase,
};
