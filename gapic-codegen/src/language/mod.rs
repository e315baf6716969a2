//! Language-specific abstractions.
//!
//! This module provides traits and types for language back-ends:
//! - [`LanguageCodegen`] - Main trait for language code generators
//! - [`TypeMapper`] - Trait for mapping model types to language types
//! - [`NamingConvention`] - Language-specific naming rules
//! - [`GenerateResult`] - Result of code generation

mod naming;
mod traits;

pub use naming::{NamingConvention, RUST_NAMING, flattened_method_name};
pub use traits::{GenerateResult, LanguageCodegen, TypeMapper};
