//! Lint for streaming methods that also carry pagination fields.

use super::super::Lint;
use crate::pipeline::{
    CompilationContext, Diagnostic, method_location,
    phases::pagination::{Pagination, detect},
};

/// Lint that warns when a streaming method resolves to Paged.
///
/// Pagination outranks the streaming markers, so the method is generated as
/// a paged call and its stream is never exposed.
pub struct StreamingPaginationLint;

impl Lint for StreamingPaginationLint {
    fn name(&self) -> &'static str {
        "streaming-pagination"
    }

    fn description(&self) -> &'static str {
        "Warn about streaming methods that are generated as paged"
    }

    fn check(&self, ctx: &CompilationContext, diagnostics: &mut Vec<Diagnostic>) {
        for service in ctx.descriptors.services() {
            for method in &service.methods {
                let streaming = method.client_streaming || method.server_streaming;
                if !streaming || method.operation_info.is_some() {
                    continue;
                }
                if let Pagination::Paged(_) = detect(&ctx.descriptors, method) {
                    diagnostics.push(
                        Diagnostic::warning(
                            "validate",
                            "streaming method has pagination fields and is generated as paged; \
                             the streaming marker is ignored",
                        )
                        .with_rule(self.name())
                        .at(method_location(&service.full_name, &method.name)),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[test]
    fn test_streaming_paged_method_warns() {
        let ctx = testing::context(
            r#"
            syntax = "proto3";
            package p;
            service S {
              rpc List(ListRequest) returns (stream ListResponse);
            }
            message ListRequest { int32 page_size = 1; string page_token = 2; }
            message ListResponse { string next_page_token = 1; repeated string names = 2; }
        "#,
        );
        let mut diagnostics = Vec::new();
        StreamingPaginationLint.check(&ctx, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].severity.is_warning());
    }
}
