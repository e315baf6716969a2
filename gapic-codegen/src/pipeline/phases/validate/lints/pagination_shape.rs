//! Lint for methods that look paged but are missing part of the shape.

use super::super::Lint;
use crate::pipeline::{
    CompilationContext, Diagnostic, method_location,
    phases::pagination::{Pagination, detect},
};

/// Lint that errors when a page-token pair comes without a page-size field
/// or a repeated resource field.
pub struct PaginationShapeLint;

impl Lint for PaginationShapeLint {
    fn name(&self) -> &'static str {
        "pagination-shape"
    }

    fn description(&self) -> &'static str {
        "Check that methods with page tokens have a page size and a repeated field"
    }

    fn check(&self, ctx: &CompilationContext, diagnostics: &mut Vec<Diagnostic>) {
        for service in ctx.descriptors.services() {
            for method in &service.methods {
                if let Pagination::Malformed(reason) = detect(&ctx.descriptors, method) {
                    diagnostics.push(
                        Diagnostic::error("validate", reason)
                            .with_rule(self.name())
                            .at(method_location(&service.full_name, &method.name)),
                    );
                }
            }
        }
    }
}
