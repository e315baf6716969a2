//! Lint for signatures naming fields the request does not have.

use super::super::Lint;
use crate::pipeline::{
    CompilationContext, Diagnostic, method_location, phases::fields::resolve_field_path,
};

/// Lint that errors when a method signature names a missing request field.
pub struct SignatureFieldLint;

impl Lint for SignatureFieldLint {
    fn name(&self) -> &'static str {
        "signature-field"
    }

    fn description(&self) -> &'static str {
        "Check that every method signature field exists on the request"
    }

    fn check(&self, ctx: &CompilationContext, diagnostics: &mut Vec<Diagnostic>) {
        let set = &ctx.descriptors;
        for service in set.services() {
            for method in &service.methods {
                let fields = method.method_signatures.iter().flatten();
                for field in fields.filter(|f| !f.is_empty()) {
                    if let Err(reason) = resolve_field_path(set, &method.input_type, field) {
                        diagnostics.push(
                            Diagnostic::error(
                                "validate",
                                format!("method signature names '{}': {}", field, reason),
                            )
                            .with_rule(self.name())
                            .at(method_location(&service.full_name, &method.name)),
                        );
                    }
                }
            }
        }
    }
}
