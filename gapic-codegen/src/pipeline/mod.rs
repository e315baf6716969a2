//! Model-building pipeline.
//!
//! This module provides a [`Pipeline`] orchestrator that turns loaded
//! descriptors into a [`GapicContext`](gapic_model::GapicContext):
//!
//! - Explicit phase boundaries (validate → build)
//! - Plugin hooks for extensibility (before/after each phase)
//! - Unified diagnostics collection, failing once with every error
//! - Shared state via [`CompilationContext`]
//!
//! # Example
//!
//! ```ignore
//! use gapic_codegen::pipeline::Pipeline;
//!
//! let mut ctx = Pipeline::new().run(descriptors, service_config, config)?;
//! for diag in ctx.warnings() {
//!     eprintln!("{diag}");
//! }
//! let model = ctx.take_model()?;
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod snapshot;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity, method_location};
pub use phase::{Phase, PhaseInfo};
pub use plugin::Plugin;
pub use runner::Pipeline;
pub use snapshot::{PhaseSnapshot, SnapshotPlugin};
