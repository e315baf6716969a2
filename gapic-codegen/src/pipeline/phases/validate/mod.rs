//! Validate phase - runs lints over descriptors and configuration.

mod lint;
pub mod lints;

use eyre::Result;
pub use lint::{Lint, LintInfo};
pub use lints::{
    DuplicateSignatureLint, HttpBindingLint, MethodNamingLint, MissingDocumentationLint,
    PaginationShapeLint, SignatureFieldLint, StreamingPaginationLint, UnknownConfigMethodLint,
};

use crate::pipeline::{CompilationContext, Phase};

/// Phase that validates the loaded inputs using configurable lints.
pub struct ValidatePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ValidatePhase {
    /// Create a new validate phase with default lints.
    pub fn new() -> Self {
        Self {
            lints: vec![
                Box::new(DuplicateSignatureLint),
                Box::new(SignatureFieldLint),
                Box::new(HttpBindingLint),
                Box::new(PaginationShapeLint),
                Box::new(StreamingPaginationLint),
                Box::new(MethodNamingLint),
                Box::new(MissingDocumentationLint),
                Box::new(UnknownConfigMethodLint),
            ],
        }
    }

    /// Create a validate phase with no lints.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    /// Add a custom lint to the validation phase.
    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    /// Get the names of all lints that will be run.
    pub fn lint_names(&self) -> Vec<&'static str> {
        self.lints.iter().map(|l| l.name()).collect()
    }

    /// Get information about all lints that will be run.
    pub fn lint_info(&self) -> Vec<LintInfo> {
        self.lints.iter().map(|l| l.info()).collect()
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn description(&self) -> &'static str {
        "Lint descriptors, service config and generator config"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let mut found = Vec::new();
        for lint in &self.lints {
            let before = found.len();
            lint.check(ctx, &mut found);
            tracing::debug!(lint = lint.name(), findings = found.len() - before, "lint done");
        }
        ctx.diagnostics.extend(found);
        Ok(())
    }
}
