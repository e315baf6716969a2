//! Lint for services and methods without a leading comment.

use super::super::Lint;
use crate::pipeline::{CompilationContext, Diagnostic, method_location};

/// Lint that warns on undocumented services and methods.
pub struct MissingDocumentationLint;

fn is_blank(doc: &Option<String>) -> bool {
    doc.as_deref().is_none_or(|d| d.trim().is_empty())
}

impl Lint for MissingDocumentationLint {
    fn name(&self) -> &'static str {
        "missing-documentation"
    }

    fn description(&self) -> &'static str {
        "Warn about services and methods without documentation"
    }

    fn check(&self, ctx: &CompilationContext, diagnostics: &mut Vec<Diagnostic>) {
        for service in ctx.descriptors.services() {
            if is_blank(&service.doc) {
                diagnostics.push(
                    Diagnostic::warning("validate", "service has no documentation")
                        .with_rule(self.name())
                        .at(&service.full_name),
                );
            }
            for method in service.methods.iter().filter(|m| is_blank(&m.doc)) {
                diagnostics.push(
                    Diagnostic::warning("validate", "method has no documentation")
                        .with_rule(self.name())
                        .at(method_location(&service.full_name, &method.name)),
                );
            }
        }
    }
}
