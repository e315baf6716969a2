//! Lint for repeated or colliding method signatures.

use std::collections::HashMap;

use super::super::Lint;
use crate::{
    language::{RUST_NAMING, flattened_method_name},
    pipeline::{CompilationContext, Diagnostic, method_location},
};

/// Members every generated client defines besides its rpc methods.
const CLIENT_MEMBERS: &[&str] =
    &["new", "with_settings", "with_clock", "grpc", "http_json", "settings"];

/// Lint that errors when a method declares the same signature twice, or when
/// two client members of one service would get the same function name.
///
/// Every rpc produces `name` and `name_with_options`; every signature produces
/// one flattened overload. All of them share a namespace with the client's own
/// constructors and accessors.
pub struct DuplicateSignatureLint;

impl DuplicateSignatureLint {
    fn collision(&self, location: &str, message: String) -> Diagnostic {
        Diagnostic::error("validate", message)
            .with_rule(self.name())
            .at(location)
    }
}

impl Lint for DuplicateSignatureLint {
    fn name(&self) -> &'static str {
        "duplicate-signature"
    }

    fn description(&self) -> &'static str {
        "Detect repeated method signatures and client member name collisions"
    }

    fn check(&self, ctx: &CompilationContext, diagnostics: &mut Vec<Diagnostic>) {
        for service in ctx.descriptors.services() {
            // member name -> what produced it first
            let mut produced: HashMap<String, String> = CLIENT_MEMBERS
                .iter()
                .map(|member| (member.to_string(), format!("the client's own '{member}'")))
                .collect();

            for method in &service.methods {
                let location = method_location(&service.full_name, &method.name);
                let name = RUST_NAMING.member_name(&method.name);
                for member in [format!("{name}_with_options"), name] {
                    if let Some(first) = produced.get(&member) {
                        let message = format!(
                            "rpc '{}' generates '{}', already produced by {}",
                            method.name, member, first
                        );
                        diagnostics.push(self.collision(&location, message));
                    } else {
                        produced.insert(member, format!("rpc '{}'", method.name));
                    }
                }
            }

            for method in &service.methods {
                let location = method_location(&service.full_name, &method.name);
                let mut seen: Vec<&Vec<String>> = Vec::new();

                for signature in method.method_signatures.iter().filter(|s| !s.is_empty()) {
                    let display = format!("{}({})", method.name, signature.join(", "));
                    if seen.contains(&signature) {
                        let message = format!("method signature '{}' is declared twice", display);
                        diagnostics.push(self.collision(&location, message));
                        continue;
                    }
                    seen.push(signature);

                    let name = flattened_method_name(&method.name, signature);
                    if let Some(first) = produced.get(&name) {
                        let message = format!(
                            "signature '{}' flattens to '{}', already produced by {}",
                            display, name, first
                        );
                        diagnostics.push(self.collision(&location, message));
                    } else {
                        produced.insert(name, format!("'{display}'"));
                    }
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
    fn test_no_duplicates() {
        let ctx = testing::context(testing::LIBRARY_PROTO);
        let mut diagnostics = Vec::new();
        DuplicateSignatureLint.check(&ctx, &mut diagnostics);
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
    }

    #[test]
    fn test_repeated_signature() {
        let ctx = testing::context(
            r#"
            syntax = "proto3";
            package p;
            import "google/api/client.proto";
            service S {
              rpc Get(GetRequest) returns (GetRequest) {
                option (google.api.method_signature) = "name";
                option (google.api.method_signature) = "name";
              }
            }
            message GetRequest { string name = 1; }
        "#,
        );
        let mut diagnostics = Vec::new();
        DuplicateSignatureLint.check(&ctx, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "method signature 'Get(name)' is declared twice");
        assert_eq!(diagnostics[0].location.as_deref(), Some("p.S/Get"));
    }

    #[test]
    fn test_flattened_name_collision() {
        let ctx = testing::context(
            r#"
            syntax = "proto3";
            package p;
            import "google/api/client.proto";
            service S {
              rpc Get(GetRequest) returns (GetRequest) {
                option (google.api.method_signature) = "shelf_by_name";
              }
              rpc GetByShelf(GetRequest) returns (GetRequest) {
                option (google.api.method_signature) = "name";
              }
            }
            message GetRequest { string name = 1; string shelf_by_name = 2; }
        "#,
        );
        let mut diagnostics = Vec::new();
        DuplicateSignatureLint.check(&ctx, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "signature 'GetByShelf(name)' flattens to 'get_by_shelf_by_name', already produced by \
             'Get(shelf_by_name)'"
        );
    }

    #[test]
    fn test_flattened_name_collides_with_rpc() {
        let ctx = testing::context(
            r#"
            syntax = "proto3";
            package p;
            import "google/api/client.proto";
            service S {
              rpc GetShelf(GetShelfRequest) returns (GetShelfRequest) {
                option (google.api.method_signature) = "name";
              }
              rpc GetShelfByName(GetShelfRequest) returns (GetShelfRequest);
            }
            message GetShelfRequest { string name = 1; }
        "#,
        );
        let mut diagnostics = Vec::new();
        DuplicateSignatureLint.check(&ctx, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "signature 'GetShelf(name)' flattens to 'get_shelf_by_name', already produced by \
             rpc 'GetShelfByName'"
        );
        assert_eq!(diagnostics[0].location.as_deref(), Some("p.S/GetShelf"));
    }

    #[test]
    fn test_rpc_collides_with_client_members() {
        let ctx = testing::context(
            r#"
            syntax = "proto3";
            package p;
            service S {
              rpc Settings(Empty) returns (Empty);
              rpc New(Empty) returns (Empty);
              rpc Get(Empty) returns (Empty);
              rpc GetWithOptions(Empty) returns (Empty);
            }
            message Empty {}
        "#,
        );
        let mut diagnostics = Vec::new();
        DuplicateSignatureLint.check(&ctx, &mut diagnostics);

        let messages: Vec<&str> = diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "rpc 'Settings' generates 'settings', already produced by the client's own \
                 'settings'",
                "rpc 'New' generates 'new', already produced by the client's own 'new'",
                "rpc 'GetWithOptions' generates 'get_with_options', already produced by rpc 'Get'",
            ]
        );
    }
}
