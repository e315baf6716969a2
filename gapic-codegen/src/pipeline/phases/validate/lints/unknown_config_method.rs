//! Lint for configuration entries that point at nothing.

use gapic_descriptor::{DescriptorSet, ServiceDescriptor};

use super::super::Lint;
use crate::pipeline::{CompilationContext, Diagnostic};

/// Lint that warns when the service config or the generator config names a
/// service or method that is not being generated.
pub struct UnknownConfigMethodLint;

impl UnknownConfigMethodLint {
    fn warn(&self, location: &str, message: String) -> Diagnostic {
        Diagnostic::warning("validate", message)
            .with_rule(self.name())
            .at(location)
    }
}

fn find_service<'a>(set: &'a DescriptorSet, name: &str) -> Option<&'a ServiceDescriptor> {
    set.services().find(|s| s.full_name == name)
}

impl Lint for UnknownConfigMethodLint {
    fn name(&self) -> &'static str {
        "unknown-config-method"
    }

    fn description(&self) -> &'static str {
        "Warn about config entries for unknown services or methods"
    }

    fn check(&self, ctx: &CompilationContext, diagnostics: &mut Vec<Diagnostic>) {
        let set = &ctx.descriptors;

        for selector in ctx.service_config.names() {
            let Some(service) = find_service(set, &selector.service) else {
                diagnostics.push(self.warn(
                    "service config",
                    format!("unknown service '{}'", selector.service),
                ));
                continue;
            };
            if let Some(method) = &selector.method {
                if service.method(method).is_none() {
                    diagnostics.push(self.warn(
                        "service config",
                        format!("unknown method '{}.{}'", selector.service, method),
                    ));
                }
            }
        }

        for key in ctx.config.longrunning.keys() {
            let method = key
                .rsplit_once('.')
                .and_then(|(service, method)| find_service(set, service)?.method(method));
            match method {
                None => diagnostics.push(self.warn(
                    "gapic.toml",
                    format!("[longrunning] names unknown method '{}'", key),
                )),
                Some(method) if method.operation_info.is_none() => diagnostics.push(self.warn(
                    "gapic.toml",
                    format!("[longrunning] names '{}', which is not long-running", key),
                )),
                Some(_) => {}
            }
        }
    }
}
