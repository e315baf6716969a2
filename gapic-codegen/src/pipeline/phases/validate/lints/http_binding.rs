//! Lint for `google.api.http` bindings that cannot be honored.

use gapic_descriptor::HttpRule;
use gapic_model::PathTemplate;

use super::super::Lint;
use crate::pipeline::{
    CompilationContext, Diagnostic, method_location, phases::fields::resolve_field_path,
};

/// Lint that errors on malformed path templates and on path variables or
/// body fields absent from the request.
pub struct HttpBindingLint;

impl HttpBindingLint {
    fn check_rule(&self, rule: &HttpRule, request: &str, ctx: &CompilationContext) -> Vec<String> {
        let mut problems = Vec::new();
        match PathTemplate::parse(&rule.path) {
            Err(err) => problems.push(err.to_string()),
            Ok(template) => {
                for variable in template.variables() {
                    let path = variable.field_name();
                    if let Err(reason) = resolve_field_path(&ctx.descriptors, request, &path) {
                        problems.push(format!("path variable '{}': {}", path, reason));
                    }
                }
            }
        }
        if let Some(body) = rule.body.as_deref().filter(|b| *b != "*") {
            if let Err(reason) = resolve_field_path(&ctx.descriptors, request, body) {
                problems.push(format!("body '{}': {}", body, reason));
            }
        }
        problems
    }
}

impl Lint for HttpBindingLint {
    fn name(&self) -> &'static str {
        "http-binding"
    }

    fn description(&self) -> &'static str {
        "Check HTTP path templates, path variables and body fields"
    }

    fn check(&self, ctx: &CompilationContext, diagnostics: &mut Vec<Diagnostic>) {
        for service in ctx.descriptors.services() {
            for method in &service.methods {
                let Some(http) = &method.http else {
                    continue;
                };
                let rules = std::iter::once(http).chain(http.additional_bindings.iter());
                for rule in rules {
                    for problem in self.check_rule(rule, &method.input_type, ctx) {
                        diagnostics.push(
                            Diagnostic::error("validate", problem)
                                .with_rule(self.name())
                                .at(method_location(&service.full_name, &method.name)),
                        );
                    }
                }
            }
        }
    }
}
