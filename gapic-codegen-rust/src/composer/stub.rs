//! The transport-neutral stub trait of each service, and `stub/mod.rs`.

use gapic_codegen::{
    CompositionError,
    ast::{
        Block, CompilationUnit, Item, MethodDecl, Module, ReExport, Receiver, Symbol, Trait,
        TypeRef, Visibility,
    },
};
use gapic_model::GapicContext;

use super::{Composer, ComposerOptions, MethodContext, method::gax_result, summary};
use crate::{naming::ServiceNames, type_mapper::RustTypeMapper};

pub(crate) struct StubComposer;

impl Composer for StubComposer {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn compose(
        &self,
        ctx: &GapicContext,
        options: &ComposerOptions,
    ) -> Result<Vec<CompilationUnit>, CompositionError> {
        let types = RustTypeMapper::new(ctx);
        let mut units = vec![stub_module(ctx, options)];
        for service in ctx.services() {
            let names = ServiceNames::new(service);
            let mut supertraits = vec![
                TypeRef::prelude("Send"),
                TypeRef::prelude("Sync"),
                TypeRef::path("std::fmt::Debug"),
            ];
            if service.has_long_running() {
                supertraits.push(TypeRef::path("gapic_gax::lro::Operations"));
            }
            let methods = service
                .methods
                .iter()
                .map(|method| {
                    let m = MethodContext::new(ctx, service, method, &names, &types);
                    let request = if m.shape().streams_requests(&method.shape) {
                        "requests"
                    } else {
                        "request"
                    };
                    m.stub_method(request, "timeout").doc_opt(summary(method.doc.as_deref()))
                })
                .collect();
            let stub = Trait {
                name: names.stub.clone(),
                doc: Some(format!(
                    "The calls of [`{}`](crate::{}::{}) as a transport sees them.\n\n\
                     Each call is a single attempt bounded by `timeout`; retries and \
                     pagination live in the client.",
                    names.client, names.client_module, names.client
                )),
                visibility: Visibility::Public,
                supertraits,
                methods,
            };
            units.push(
                CompilationUnit::new(
                    format!("src/stub/{}.rs", names.stub_module),
                    ["crate", "stub", names.stub_module.as_str()],
                )
                .item(Item::Trait(stub)),
            );
        }
        Ok(units)
    }
}

/// `get_operation` and `cancel_operation` of [`gapic_gax::lro::Operations`]
/// with the given bodies.
pub(crate) fn operations_methods(get: Block, cancel: Block) -> [MethodDecl; 2] {
    let method = |name: &str, request: &str, returns: TypeRef, body: Block| {
        MethodDecl::new(name)
            .receiver(Receiver::Ref)
            .param("request", TypeRef::reference(TypeRef::path(request)))
            .param("timeout", TypeRef::path("std::time::Duration"))
            .returns(gax_result(returns))
            .body(body)
    };
    [
        method(
            "get_operation",
            "gapic_gax::longrunning::GetOperationRequest",
            TypeRef::path("gapic_gax::longrunning::Operation"),
            get,
        ),
        method(
            "cancel_operation",
            "gapic_gax::longrunning::CancelOperationRequest",
            TypeRef::unit(),
            cancel,
        ),
    ]
}

/// `src/stub/mod.rs`: the per-service stub modules and their re-exports.
fn stub_module(ctx: &GapicContext, options: &ComposerOptions) -> CompilationUnit {
    let mut modules = Vec::new();
    let mut exports = Vec::new();
    for service in ctx.services() {
        let names = ServiceNames::new(service);
        let mut add = |module: &str, name: &str| {
            modules.push(Item::Module(Module {
                name: module.to_string(),
                doc: None,
                visibility: Visibility::Public,
            }));
            exports.push(Item::ReExport(ReExport {
                visibility: Visibility::Public,
                symbol: Symbol::new([module], name),
            }));
        };
        add(&names.stub_module, &names.stub);
        if options.transport.has_grpc() {
            add(&names.grpc_stub_module, &names.grpc_stub);
        }
        if options.transport.has_rest() {
            add(&names.http_stub_module, &names.http_stub);
        }
    }
    CompilationUnit::new("src/stub/mod.rs", ["crate", "stub"])
        .doc(
            "Transport stubs.\n\nClients talk to a stub trait object; the gRPC and HTTP/JSON \
             stubs here implement it over a channel. Implement the trait yourself to fake \
             a service in tests.",
        )
        .items(modules)
        .items(exports)
}
