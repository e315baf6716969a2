//! Compilation context passed through pipeline phases.

use eyre::{Result, eyre};
use gapic_descriptor::{DescriptorSet, GeneratorConfig, ServiceConfig};
use gapic_model::GapicContext;

use super::diagnostic::{Diagnostic, Severity};

/// Context passed through all pipeline phases.
///
/// Carries the loaded inputs and accumulates the model and diagnostics.
#[derive(Debug)]
pub struct CompilationContext {
    /// The loaded descriptor graph.
    pub descriptors: DescriptorSet,
    /// Retry and timeout defaults.
    pub service_config: ServiceConfig,
    /// Generator switches, polling overrides and extra resource patterns.
    pub config: GeneratorConfig,
    /// The semantic model (populated by BuildPhase).
    pub model: Option<GapicContext>,
    /// Diagnostics collected so far.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    pub fn new(
        descriptors: DescriptorSet,
        service_config: ServiceConfig,
        config: GeneratorConfig,
    ) -> Self {
        Self {
            descriptors,
            service_config,
            config,
            model: None,
            diagnostics: Vec::new(),
        }
    }

    /// Check if any error diagnostics have been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Check if any warning diagnostics have been recorded.
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    /// Count the number of error diagnostics.
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Count the number of warning diagnostics.
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Add a diagnostic.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Get all error diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    /// Get all warning diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    /// Take the model out of the context.
    ///
    /// # Errors
    ///
    /// Fails if BuildPhase has not run.
    pub fn take_model(&mut self) -> Result<GapicContext> {
        self.model
            .take()
            .ok_or_else(|| eyre!("model not built; did the build phase run?"))
    }
}
