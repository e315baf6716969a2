//! Language-neutral code generation layer for gapic.
//!
//! This crate sits between the descriptor loader and the language back-ends.
//! It turns a [`DescriptorSet`](gapic_descriptor::DescriptorSet) into a
//! [`GapicContext`](gapic_model::GapicContext) and provides the tree that
//! composers build and writers render.
//!
//! # Module Organization
//!
//! - [`pipeline`] - Model building phases, lints, diagnostics and plugins
//! - [`ast`] - The closed syntax tree composers produce
//! - [`builder`] - Indentation-aware text building for writers
//! - [`generation`] - Import collection
//! - [`language`] - Back-end traits and naming conventions
//! - [`testing`] - Fixture APIs (feature-gated)

pub mod ast;
pub mod builder;
mod error;
pub mod generation;
pub mod language;
pub mod pipeline;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{CompositionError, Error, ModelBuildError, WriterError};
