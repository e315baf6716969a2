//! `<Service>Client`: the public entry point of each service.
//!
//! A client holds its stub behind a trait object together with its settings
//! and a clock. Every method comes as a pair, `m(request)` and
//! `m_with_options(request, options)`, plus one flattened overload per
//! method signature.

use gapic_codegen::{
    CompositionError,
    ast::{
        Block, Class, ClassKind, CompilationUnit, Expr, FieldDecl, Impl, Item, MethodDecl,
        Pattern, Receiver, Stmt, Symbol, TypeRef, Visibility,
    },
    language::{RUST_NAMING, TypeMapper, flattened_method_name},
};
use gapic_core::ScalarType;
use gapic_model::{
    Cardinality, Field, FieldType, GapicContext, Message, MethodSignature, ResourceName, Service,
};

use super::{Composer, ComposerOptions, MethodContext, summary};
use crate::{naming::ServiceNames, type_mapper::RustTypeMapper};

pub(crate) struct ClientComposer;

impl Composer for ClientComposer {
    fn name(&self) -> &'static str {
        "client"
    }

    fn compose(
        &self,
        ctx: &GapicContext,
        options: &ComposerOptions,
    ) -> Result<Vec<CompilationUnit>, CompositionError> {
        let types = RustTypeMapper::new(ctx);
        ctx.services()
            .iter()
            .map(|service| client_unit(ctx, service, options, &types))
            .collect()
    }
}

fn arc(inner: TypeRef) -> TypeRef {
    TypeRef::path("std::sync::Arc").arg(inner)
}

fn arc_dyn(path: &str) -> TypeRef {
    arc(TypeRef::Dyn(vec![TypeRef::path(path)]))
}

fn client_unit(
    ctx: &GapicContext,
    service: &Service,
    options: &ComposerOptions,
    types: &RustTypeMapper,
) -> Result<CompilationUnit, CompositionError> {
    let names = ServiceNames::new(service);
    let stub_type = TypeRef::Dyn(vec![TypeRef::named(names.stub_symbol())]);
    let settings_type = TypeRef::named(names.settings_symbol());

    let mut doc = summary(service.doc.as_deref())
        .unwrap_or_else(|| format!("A client of `{}`.", service.full_name));
    doc.push_str(
        "\n\nCloning a client is cheap: clones share the stub and the clock. \
         Calls block the current thread until they complete.",
    );
    let client = Class::new(
        &names.client,
        ClassKind::Named(vec![
            FieldDecl::new("stub", arc(stub_type.clone())).private(),
            FieldDecl::new("settings", settings_type.clone()).private(),
            FieldDecl::new("clock", arc_dyn("gapic_gax::Clock")).private(),
        ]),
    )
    .doc(doc)
    .derive(Symbol::derive("Debug"))
    .derive(Symbol::derive("Clone"));

    let mut methods = constructors(&names, options, stub_type, settings_type);
    let mut support = Vec::new();
    for method in &service.methods {
        let m = MethodContext::new(ctx, service, method, &names, types);
        methods.extend(call_pair(&m));
        if !m.shape().streams_requests(&method.shape) {
            for signature in &method.signatures {
                methods.push(flattened(&m, signature)?);
            }
        }
        support.extend(m.shape().support_items(&m)?);
    }

    let implementation =
        Impl::inherent(TypeRef::named(Symbol::local(&names.client))).methods(methods);
    Ok(CompilationUnit::new(
        format!("src/{}.rs", names.client_module),
        ["crate", names.client_module.as_str()],
    )
    .doc(format!("The client of `{}`.", service.full_name))
    .item(Item::Class(client))
    .item(Item::Impl(implementation))
    .items(support))
}

fn constructors(
    names: &ServiceNames,
    options: &ComposerOptions,
    stub_type: TypeRef,
    settings_type: TypeRef,
) -> Vec<MethodDecl> {
    let public = |name: &str| MethodDecl::new(name).visibility(Visibility::Public);
    let mut methods = vec![
        public("new")
            .doc("A client over `stub` with the default settings.")
            .param("stub", arc(stub_type.clone()))
            .returns(TypeRef::SelfType)
            .body(Block::tail(Expr::assoc_call(
                TypeRef::SelfType,
                "with_settings",
                vec![
                    Expr::local("stub"),
                    Expr::assoc_call(settings_type.clone(), "default", Vec::new()),
                ],
            ))),
        public("with_settings")
            .param("stub", arc(stub_type))
            .param("settings", settings_type.clone())
            .returns(TypeRef::SelfType)
            .body(Block::tail(Expr::struct_lit(
                TypeRef::SelfType,
                vec![
                    ("stub".to_string(), Expr::local("stub")),
                    ("settings".to_string(), Expr::local("settings")),
                    (
                        "clock".to_string(),
                        Expr::assoc_call(
                            TypeRef::path("std::sync::Arc"),
                            "new",
                            vec![Expr::path(Symbol::path("gapic_gax::SystemClock"))],
                        ),
                    ),
                ],
            ))),
        public("with_clock")
            .doc("Replace the clock retries and polling wait on.")
            .receiver(Receiver::Owned)
            .param("clock", arc_dyn("gapic_gax::Clock"))
            .returns(TypeRef::SelfType)
            .body(Block::tail(Expr::StructLit {
                ty: TypeRef::SelfType,
                fields: vec![("clock".to_string(), Expr::local("clock"))],
                rest: Some(Box::new(Expr::SelfValue)),
            })),
    ];
    let mut transport = |name: &str, doc: &str, channel: &str, stub: Symbol| {
        methods.push(
            public(name)
                .doc(doc)
                .param("channel", arc_dyn(channel))
                .returns(TypeRef::SelfType)
                .body(Block::tail(Expr::assoc_call(
                    TypeRef::SelfType,
                    "new",
                    vec![Expr::assoc_call(
                        TypeRef::path("std::sync::Arc"),
                        "new",
                        vec![Expr::assoc_call(
                            TypeRef::named(stub),
                            "new",
                            vec![Expr::local("channel")],
                        )],
                    )],
                ))),
        );
    };
    if options.transport.has_grpc() {
        transport(
            "grpc",
            "A client calling the service over gRPC.",
            "gapic_gax::GrpcChannel",
            names.grpc_stub_symbol(),
        );
    }
    if options.transport.has_rest() {
        transport(
            "http_json",
            "A client calling the service over HTTP/JSON.",
            "gapic_gax::HttpChannel",
            names.http_stub_symbol(),
        );
    }
    methods.push(
        public("settings")
            .receiver(Receiver::Ref)
            .returns(TypeRef::reference(settings_type))
            .body(Block::tail(Expr::SelfValue.field("settings").by_ref())),
    );
    methods
}

/// The request parameter of a method: `request: EchoRequest` or a request stream.
fn request_param(m: &MethodContext) -> (&'static str, TypeRef) {
    if m.shape().streams_requests(&m.method.shape) {
        ("requests", TypeRef::path("gapic_gax::RequestStream").arg(m.request_type()))
    } else {
        ("request", m.request_type())
    }
}

fn call_pair(m: &MethodContext) -> [MethodDecl; 2] {
    let shape = m.shape();
    let (request, request_type) = request_param(m);
    let returns = shape.client_returns(m);

    let call = MethodDecl::new(m.fn_name())
        .doc_opt(m.method.doc.as_deref().map(str::trim).map(str::to_string))
        .visibility(Visibility::Public)
        .receiver(Receiver::Ref)
        .param(request, request_type.clone())
        .returns(returns.clone())
        .body(Block::tail(Expr::SelfValue.method(
            m.with_options_name(),
            vec![
                Expr::local(request),
                Expr::assoc_call(TypeRef::path("gapic_gax::CallOptions"), "default", Vec::new()),
            ],
        )));

    let mut body = vec![Stmt::let_(
        "settings",
        Expr::SelfValue
            .field("settings")
            .field(m.fn_name())
            .method("merge", vec![Expr::local("options").by_ref()]),
    )];
    body.extend(shape.client_body(m));
    let with_options = MethodDecl::new(m.with_options_name())
        .doc(format!("[`Self::{}`] with per-call overrides of the settings.", m.fn_name()))
        .visibility(Visibility::Public)
        .receiver(Receiver::Ref)
        .param(request, request_type)
        .param("options", TypeRef::path("gapic_gax::CallOptions"))
        .returns(returns)
        .body(Block::new(body));
    [call, with_options]
}

/// One flattened argument: the parameter and the value it stores in the request.
pub(crate) struct FlatArg<'a> {
    pub param: String,
    pub ty: TypeRef,
    pub field: &'a Field,
    /// Set when the argument is taken as a typed resource name.
    pub resource: Option<&'a ResourceName>,
    value: Expr,
    /// Member names from the request down to the field.
    path: Vec<String>,
    oneof: Option<String>,
}

/// `get_shelf_by_name`.
pub(crate) fn flattened_name(m: &MethodContext, signature: &MethodSignature) -> String {
    let fields: Vec<String> = signature.args.iter().map(|arg| arg.field.clone()).collect();
    flattened_method_name(&m.method.name, &fields)
}

pub(crate) fn flat_args<'a>(
    m: &MethodContext<'a>,
    signature: &MethodSignature,
) -> Result<Vec<FlatArg<'a>>, CompositionError> {
    let request_message = m.input_message()?;
    let mut args = Vec::with_capacity(signature.args.len());
    for arg in &signature.args {
        let (path, field) = resolve_path(m, request_message, &arg.field)?;
        let param = RUST_NAMING.member_name(&arg.field.replace('.', "_"));
        let resource = arg
            .resource_type
            .as_deref()
            .and_then(|resource_type| m.ctx.resource_name(resource_type));
        let (ty, value) = match resource {
            Some(resource) => resource_arg(&param, m.types.resource_symbol(resource), field),
            None => plain_arg(m, &param, field),
        };
        let oneof = match (path.len(), field.oneof.as_deref()) {
            (1, Some(oneof)) => Some(oneof.to_string()),
            _ => None,
        };
        let value = match oneof {
            Some(_) => {
                let variant = m.types.oneof_variant(request_message, field).ok_or_else(|| {
                    CompositionError::UnknownField {
                        method: m.method.full_name.clone(),
                        field: arg.field.clone(),
                        message: request_message.full_name.clone(),
                    }
                })?;
                Expr::some(Expr::call(Expr::path(variant), vec![value]))
            }
            None => value,
        };
        args.push(FlatArg {
            param,
            ty,
            field,
            resource,
            value,
            path,
            oneof,
        });
    }
    Ok(args)
}

fn flattened(
    m: &MethodContext,
    signature: &MethodSignature,
) -> Result<MethodDecl, CompositionError> {
    let args = flat_args(m, signature)?;
    let mut fields = Vec::new();
    let mut assignments = Vec::new();
    for arg in &args {
        let member = match (&arg.oneof, arg.path.as_slice()) {
            (Some(oneof), _) => RUST_NAMING.member_name(oneof),
            (None, [member]) => member.clone(),
            (None, _) => {
                let target = nested_target(&arg.path);
                assignments.push(Stmt::Expr(Expr::assign(target, arg.value.clone())));
                continue;
            }
        };
        if fields.iter().any(|(name, _)| *name == member) {
            assignments.push(Stmt::Expr(Expr::assign(
                Expr::local("request").field(&member),
                arg.value.clone(),
            )));
        } else {
            fields.push((member, arg.value.clone()));
        }
    }

    let literal = Expr::StructLit {
        ty: m.request_type(),
        fields,
        rest: Some(Box::new(Expr::default_value())),
    };
    let mut body = vec![if assignments.is_empty() {
        Stmt::let_("request", literal)
    } else {
        Stmt::let_mut("request", literal)
    }];
    body.extend(assignments);
    body.push(Stmt::Tail(Expr::SelfValue.method(m.fn_name(), vec![Expr::local("request")])));

    let mut method = MethodDecl::new(flattened_name(m, signature))
        .doc_opt(summary(m.method.doc.as_deref()))
        .visibility(Visibility::Public)
        .receiver(Receiver::Ref);
    for arg in args {
        method = method.param(arg.param, arg.ty);
    }
    Ok(method.returns(m.shape().client_returns(m)).body(Block::new(body)))
}

/// Walk a dotted signature field down from the request message.
fn resolve_path<'a>(
    m: &MethodContext<'a>,
    request: &'a Message,
    dotted: &str,
) -> Result<(Vec<String>, &'a Field), CompositionError> {
    let unknown = |message: &Message| CompositionError::UnknownField {
        method: m.method.full_name.clone(),
        field: dotted.to_string(),
        message: message.full_name.clone(),
    };
    let segments: Vec<&str> = dotted.split('.').collect();
    let mut message = request;
    let mut path = Vec::with_capacity(segments.len());
    for (i, segment) in segments.iter().enumerate() {
        let field = message.field(segment).ok_or_else(|| unknown(message))?;
        path.push(RUST_NAMING.member_name(segment));
        if i + 1 == segments.len() {
            return Ok((path, field));
        }
        message = match &field.field_type {
            FieldType::Message(name) if !field.is_repeated() => m
                .ctx
                .message(name)
                .ok_or_else(|| CompositionError::UnknownMessage(name.clone()))?,
            _ => return Err(unknown(message)),
        };
    }
    Err(unknown(request))
}

/// `request.book.get_or_insert_with(Default::default).name`.
fn nested_target(path: &[String]) -> Expr {
    let default = Expr::assoc(TypeRef::prelude("Default"), "default");
    let mut target = Expr::local("request");
    if let Some((leaf, parents)) = path.split_last() {
        for parent in parents {
            target = target
                .field(parent)
                .method("get_or_insert_with", vec![default.clone()]);
        }
        target = target.field(leaf);
    }
    target
}

/// Resource-name arguments are taken by reference and stored as strings.
fn resource_arg(param: &str, resource: Symbol, field: &Field) -> (TypeRef, Expr) {
    let to_string = |value: Expr| value.method("to_string", Vec::new());
    if field.is_repeated() {
        let value = Expr::local(param)
            .method("iter", Vec::new())
            .method(
                "map",
                vec![Expr::closure(vec![Pattern::ident("name")], to_string(Expr::local("name")))],
            )
            .method("collect", Vec::new());
        return (TypeRef::reference(TypeRef::Slice(Box::new(TypeRef::named(resource)))), value);
    }
    (TypeRef::reference(TypeRef::named(resource)), to_string(Expr::local(param)))
}

fn plain_arg(m: &MethodContext, param: &str, field: &Field) -> (TypeRef, Expr) {
    let value = Expr::local(param);
    match (&field.field_type, field.cardinality) {
        (FieldType::Scalar(ScalarType::String), Cardinality::Singular) => (
            TypeRef::ImplTrait(vec![TypeRef::prelude("Into").arg(TypeRef::string())]),
            value.method("into", Vec::new()),
        ),
        (FieldType::Map { .. }, _) | (_, Cardinality::Repeated) => (m.types.field(field), value),
        (FieldType::Message(name), _) => (m.types.message(name), Expr::some(value)),
        (_, Cardinality::Optional) => {
            (m.types.field_type(&field.field_type), Expr::some(value))
        }
        (_, Cardinality::Singular) => (m.types.field_type(&field.field_type), value),
    }
}

#[cfg(test)]
mod tests {
    use gapic_codegen::testing;
    use gapic_core::Transport;

    use super::*;
    use crate::writer::RustWriter;

    fn render(model: &GapicContext, transport: Transport) -> String {
        let options = ComposerOptions {
            transport,
            samples: false,
        };
        let units = ClientComposer.compose(model, &options).unwrap();
        RustWriter::new().write(&units[0]).unwrap().content().to_string()
    }

    #[test]
    fn test_client_struct_and_constructors() {
        let content = render(&testing::echo_model(), Transport::Grpc);
        assert!(content.contains(
            "#[derive(Debug, Clone)]\npub struct EchoClient {\n    stub: Arc<dyn EchoStub>,\n    \
             settings: EchoSettings,\n    clock: Arc<dyn Clock>,\n}\n"
        ));
        assert!(content.contains(
            "    pub fn grpc(channel: Arc<dyn GrpcChannel>) -> Self {\n        \
             Self::new(Arc::new(GrpcEchoStub::new(channel)))\n    }\n"
        ));
        assert!(!content.contains("pub fn http_json("));
    }

    #[test]
    fn test_unary_pair_merges_options() {
        let content = render(&testing::echo_model(), Transport::GrpcRest);
        assert!(content.contains(
            "    pub fn echo(&self, request: EchoRequest) -> Result<EchoResponse> {\n        \
             self.echo_with_options(request, CallOptions::default())\n    }\n"
        ));
        assert!(content.contains("        let settings = self.settings.echo.merge(&options);\n"));
        assert!(content.contains("        invoke(\n            &settings,\n"));
    }

    #[test]
    fn test_request_streams_are_not_flattened() {
        let content = render(&testing::echo_model(), Transport::Grpc);
        assert!(content.contains(
            "    pub fn collect(&self, requests: RequestStream<EchoRequest>)"
        ));
        assert!(content.contains("self.stub.chat(requests, settings.total_timeout)"));
        assert!(content.contains("    pub fn expand_by_content_and_error(\n"));
        assert!(content.contains("        content: impl Into<String>,\n"));
        assert!(content.contains("        error: Status,\n"));
        assert!(content.contains("pub struct PagedExpandDescriptor;"));
        assert!(content.contains("-> Result<OperationFuture<WaitResponse, WaitMetadata>>"));
    }

    #[test]
    fn test_resource_arguments() {
        let content = render(&testing::library_model(), Transport::GrpcRest);
        assert!(content.contains(
            "    pub fn get_shelf_by_name(&self, name: &ShelfName) -> Result<Shelf> {\n        \
             let request = GetShelfRequest {\n            name: name.to_string(),\n            \
             ..Default::default()\n        };\n        self.get_shelf(request)\n    }\n"
        ));
        assert!(content.contains("    pub fn create_shelf_by_shelf(&self, shelf: Shelf)"));
        assert!(content.contains("            shelf: Some(shelf),\n"));
        assert!(content.contains("use crate::resources::ShelfName;"));
    }
}
