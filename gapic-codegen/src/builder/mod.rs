//! Text building blocks for writers.
//!
//! - [`CodeBuilder`] - Mutable API for building indented code
//! - [`Indent`] - Indentation configuration

mod code_builder;
mod indent;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
