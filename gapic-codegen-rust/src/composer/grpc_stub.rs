use gapic_codegen::{
    CompositionError,
    ast::{
        Block, Class, ClassKind, CompilationUnit, Expr, FieldDecl, Impl, Item, MethodDecl,
        Symbol, TypeRef,
    },
};
use gapic_model::{GapicContext, Service};

use super::{
    Composer, ComposerOptions, MethodContext,
    shape::{decode_response, own},
    stub::operations_methods,
};
use crate::{naming::ServiceNames, type_mapper::RustTypeMapper};

pub(crate) struct GrpcStubComposer;

impl Composer for GrpcStubComposer {
    fn name(&self) -> &'static str {
        "grpc-stub"
    }

    fn compose(
        &self,
        ctx: &GapicContext,
        options: &ComposerOptions,
    ) -> Result<Vec<CompilationUnit>, CompositionError> {
        if !options.transport.has_grpc() {
            return Ok(Vec::new());
        }
        let types = RustTypeMapper::new(ctx);
        Ok(ctx
            .services()
            .iter()
            .map(|service| grpc_stub(ctx, service, &types))
            .collect())
    }
}

fn channel_type() -> TypeRef {
    TypeRef::path("std::sync::Arc")
        .arg(TypeRef::Dyn(vec![TypeRef::path("gapic_gax::GrpcChannel")]))
}

fn grpc_stub(ctx: &GapicContext, service: &Service, types: &RustTypeMapper) -> CompilationUnit {
    let names = ServiceNames::new(service);
    let this = TypeRef::named(Symbol::local(&names.grpc_stub));

    let stub = Class::new(
        &names.grpc_stub,
        ClassKind::Named(vec![FieldDecl::new("channel", channel_type()).private()]),
    )
    .doc(format!("Calls `{}` over a gRPC channel.", service.full_name))
    .derive(Symbol::derive("Debug"))
    .derive(Symbol::derive("Clone"));

    let constructor = Impl::inherent(this.clone()).method(
        MethodDecl::new("new")
            .param("channel", channel_type())
            .returns(TypeRef::SelfType)
            .body(Block::tail(Expr::struct_lit(
                TypeRef::SelfType,
                vec![("channel".to_string(), Expr::local("channel"))],
            ))),
    );

    let calls = service.methods.iter().map(|method| {
        let m = MethodContext::new(ctx, service, method, &names, types);
        let request = if m.shape().streams_requests(&method.shape) {
            "requests"
        } else {
            "request"
        };
        m.stub_method(request, "timeout").body(m.shape().grpc_body(&m))
    });
    let implementation =
        Impl::of_trait(TypeRef::named(names.stub_symbol()), this.clone()).methods(calls);

    let mut unit = CompilationUnit::new(
        format!("src/stub/{}.rs", names.grpc_stub_module),
        ["crate", "stub", names.grpc_stub_module.as_str()],
    )
    .item(Item::Class(stub))
    .item(Item::Impl(constructor))
    .item(Item::Impl(implementation));

    if service.has_long_running() {
        let [get, cancel] = operations_methods(
            operation_call("GetOperation", false),
            operation_call("CancelOperation", true),
        );
        unit = unit.item(Item::Impl(
            Impl::of_trait(TypeRef::path("gapic_gax::lro::Operations"), this)
                .method(get)
                .method(cancel),
        ));
    }
    unit
}

fn operation_call(method: &str, empty: bool) -> Block {
    let call = own("channel")
        .method(
            "unary",
            vec![
                Expr::str(format!("/google.longrunning.Operations/{method}")),
                Expr::call(
                    Expr::path(Symbol::path("gapic_gax::transport::encode")),
                    vec![Expr::local("request")],
                ),
                Expr::local("timeout"),
            ],
        )
        .try_();
    decode_response(call, empty)
}
