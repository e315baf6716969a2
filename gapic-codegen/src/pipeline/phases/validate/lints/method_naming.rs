//! Lint for rpc names that are not UpperCamelCase.

use super::super::Lint;
use crate::pipeline::{CompilationContext, Diagnostic, method_location};

/// Lint that warns on rpc names that are not UpperCamelCase.
pub struct MethodNamingLint;

fn is_upper_camel_case(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
        && name.chars().all(|c| c.is_ascii_alphanumeric())
}

impl Lint for MethodNamingLint {
    fn name(&self) -> &'static str {
        "method-naming"
    }

    fn description(&self) -> &'static str {
        "Warn about rpc names that are not UpperCamelCase"
    }

    fn check(&self, ctx: &CompilationContext, diagnostics: &mut Vec<Diagnostic>) {
        for service in ctx.descriptors.services() {
            for method in &service.methods {
                if !is_upper_camel_case(&method.name) {
                    diagnostics.push(
                        Diagnostic::warning(
                            "validate",
                            format!("rpc name '{}' is not UpperCamelCase", method.name),
                        )
                        .with_rule(self.name())
                        .at(method_location(&service.full_name, &method.name)),
                    );
                }
            }
        }
    }
}
