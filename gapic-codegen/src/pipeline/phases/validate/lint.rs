//! Lint trait for descriptor and configuration validation.

use crate::pipeline::{CompilationContext, Diagnostic};

/// Information about a lint.
#[derive(Debug, Clone)]
pub struct LintInfo {
    /// The lint name, also the rule reported in its diagnostics.
    pub name: &'static str,
    /// A human-readable description.
    pub description: &'static str,
}

/// A lint that checks the loaded inputs for issues.
///
/// Lints only report; they never stop the pipeline themselves.
pub trait Lint: Send + Sync {
    /// The name of this lint.
    fn name(&self) -> &'static str;

    /// A human-readable description of what this lint checks.
    fn description(&self) -> &'static str;

    /// Check the context and add any diagnostics.
    fn check(&self, ctx: &CompilationContext, diagnostics: &mut Vec<Diagnostic>);

    /// Get information about this lint.
    fn info(&self) -> LintInfo {
        LintInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
