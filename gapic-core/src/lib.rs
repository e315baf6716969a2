//! Core utilities and types for the gapic generator.
//!
//! This crate provides the pieces every other gapic crate leans on: the leaf
//! vocabulary types shared by loader and model, case conversion for
//! identifiers, and buffered materialization of generated files.

mod file;
mod types;
mod utils;

// File operations
pub use file::{File, WriteResult, materialize};
// Fundamental types
pub use types::{ScalarType, StatusCode, Transport};
// String utilities
pub use utils::{
    to_camel_case, to_kebab_case, to_pascal_case, to_screaming_snake_case, to_snake_case,
};
