//! The HTTP/JSON stub: `google.api.http` bindings turned into requests.
//!
//! Path variables are validated against their pattern and percent-encoded,
//! the body is the whole request or one message field, and every remaining
//! scalar field travels as a query parameter when it differs from its
//! default.

use gapic_codegen::{
    CompositionError,
    ast::{
        BinOp, Block, Class, ClassKind, CompilationUnit, Expr, FieldDecl, Impl, Item, MethodDecl,
        Pattern, Stmt, Symbol, TypeRef,
    },
    language::RUST_NAMING,
};
use gapic_core::ScalarType;
use gapic_model::{
    BodyBinding, Cardinality, Field, FieldType, GapicContext, HttpBinding, Message, PathParam,
    PathTemplate, QueryParam, Segment, Service,
};

use super::{
    Composer, ComposerOptions, MethodContext,
    shape::{HttpExchange, decode_response, own},
    stub::operations_methods,
};
use crate::{
    naming::{ServiceNames, api_version},
    type_mapper::RustTypeMapper,
};

pub(crate) struct HttpStubComposer;

impl Composer for HttpStubComposer {
    fn name(&self) -> &'static str {
        "http-stub"
    }

    fn compose(
        &self,
        ctx: &GapicContext,
        options: &ComposerOptions,
    ) -> Result<Vec<CompilationUnit>, CompositionError> {
        if !options.transport.has_rest() {
            return Ok(Vec::new());
        }
        let types = RustTypeMapper::new(ctx);
        ctx.services()
            .iter()
            .map(|service| http_stub(ctx, service, &types))
            .collect()
    }
}

/// Locals the generated bodies bind themselves.
const RESERVED_LOCALS: &[&str] = &["request", "timeout", "query", "response", "stream"];

fn gax(name: &str) -> Symbol {
    Symbol::new(["gapic_gax"], name)
}

fn http_fn(name: &str) -> Expr {
    Expr::path(Symbol::new(["gapic_gax", "http"], name))
}

/// `Vec::new()`.
fn new_vec() -> Expr {
    Expr::assoc_call(TypeRef::prelude("Vec"), "new", Vec::new())
}

fn channel_type() -> TypeRef {
    TypeRef::path("std::sync::Arc").arg(TypeRef::Dyn(vec![TypeRef::named(gax("HttpChannel"))]))
}

fn http_stub(
    ctx: &GapicContext,
    service: &Service,
    types: &RustTypeMapper,
) -> Result<CompilationUnit, CompositionError> {
    let names = ServiceNames::new(service);
    let this = TypeRef::named(Symbol::local(&names.http_stub));

    let stub = Class::new(
        &names.http_stub,
        ClassKind::Named(vec![FieldDecl::new("channel", channel_type()).private()]),
    )
    .doc(format!("Calls `{}` over HTTP/JSON.", service.full_name))
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

    let mut calls = Vec::with_capacity(service.methods.len());
    for method in &service.methods {
        let m = MethodContext::new(ctx, service, method, &names, types);
        let exchange = m.shape().http_exchange(&method.shape);
        let call = match (&method.http, exchange) {
            (Some(binding), HttpExchange::Single | HttpExchange::Streamed) => {
                m.stub_method("request", "timeout").body(http_body(&m, binding, exchange)?)
            }
            _ => {
                let request = if m.shape().streams_requests(&method.shape) {
                    "_requests"
                } else {
                    "_request"
                };
                let status = Expr::assoc_call(
                    TypeRef::named(gax("Status")),
                    "unimplemented",
                    vec![Expr::str(format!("{} is not supported over HTTP/JSON", method.name))],
                );
                m.stub_method(request, "_timeout").body(Block::tail(Expr::err(status)))
            }
        };
        calls.push(call);
    }
    let implementation =
        Impl::of_trait(TypeRef::named(names.stub_symbol()), this.clone()).methods(calls);

    let mut unit = CompilationUnit::new(
        format!("src/stub/{}.rs", names.http_stub_module),
        ["crate", "stub", names.http_stub_module.as_str()],
    )
    .item(Item::Class(stub))
    .item(Item::Impl(constructor))
    .item(Item::Impl(implementation));

    if service.has_long_running() {
        let version = api_version(&service.package);
        let [get, cancel] = operations_methods(
            operation_call("Get", format!("/{version}/{{name}}"), false),
            operation_call("Post", format!("/{version}/{{name}}:cancel"), true),
        );
        unit = unit.item(Item::Impl(
            Impl::of_trait(TypeRef::path("gapic_gax::lro::Operations"), this)
                .method(get)
                .method(cancel),
        ));
    }
    Ok(unit)
}

fn http_body(
    m: &MethodContext,
    binding: &HttpBinding,
    exchange: HttpExchange,
) -> Result<Block, CompositionError> {
    let message = m.input_message()?;
    let mut stmts = Vec::new();

    let mut locals = Vec::new();
    for param in &binding.path_params {
        let local = path_local(param);
        let value = path_value(m, message, param)?;
        stmts.push(Stmt::let_(
            &local,
            Expr::call(
                http_fn("path_param"),
                vec![Expr::str(param.field_name()), value, Expr::str(&param.pattern)],
            )
            .try_(),
        ));
        locals.push((param.field_name(), local));
    }
    let path = format_path(m, &binding.template, &locals)?;

    let pushes = query_pushes(m, message, &binding.query_params);
    let query = if pushes.is_empty() {
        new_vec()
    } else {
        stmts.push(Stmt::let_mut("query", new_vec()));
        stmts.extend(pushes);
        Expr::local("query")
    };

    let body = match &binding.body {
        BodyBinding::None => Expr::path(Symbol::prelude("None")),
        BodyBinding::Wildcard => Expr::some(
            Expr::call(http_fn("to_json"), vec![Expr::local("request")]).try_(),
        ),
        BodyBinding::Field(name) => {
            let field = message.field(name).ok_or_else(|| unknown_field(m, message, name))?;
            if !matches!(field.field_type, FieldType::Message(_)) || field.is_repeated() {
                return Err(CompositionError::BodyNotMessage {
                    method: m.method.full_name.clone(),
                    field: name.clone(),
                });
            }
            let value = Expr::local("request").field(name).by_ref();
            Expr::some(Expr::call(http_fn("to_json"), vec![value]).try_())
        }
    };

    let http_request = Expr::struct_lit(
        TypeRef::named(gax("HttpRequest")),
        vec![
            (
                "method".to_string(),
                Expr::path(gax("HttpMethod").child(binding.method.variant())),
            ),
            ("path".to_string(), path),
            ("query".to_string(), query),
            ("body".to_string(), body),
        ],
    );
    stmts.push(Stmt::let_("http_request", http_request));

    let (execute, decode) = match exchange {
        HttpExchange::Streamed => ("execute_streaming", "from_json_stream"),
        _ => ("execute", "from_json"),
    };
    let call = own("channel")
        .method(execute, vec![Expr::local("http_request"), Expr::local("timeout")])
        .try_();
    if exchange == HttpExchange::Streamed {
        stmts.push(Stmt::let_("stream", call));
        stmts.push(Stmt::Tail(Expr::ok(Expr::call(
            http_fn(decode),
            vec![Expr::local("stream")],
        ))));
    } else if m.output_type().is_unit() {
        stmts.extend(decode_response(call, true).stmts);
    } else {
        stmts.push(Stmt::let_("response", call));
        stmts.push(Stmt::Tail(Expr::call(
            http_fn(decode),
            vec![Expr::local("response").by_ref()],
        )));
    }
    Ok(Block::new(stmts))
}

/// The local a path variable is bound to: `book.name` -> `book_name`.
fn path_local(param: &PathParam) -> String {
    let local = param.field_path.join("_");
    if RESERVED_LOCALS.contains(&local.as_str()) {
        format!("{local}_param")
    } else {
        local
    }
}

fn unknown_field(m: &MethodContext, message: &Message, field: &str) -> CompositionError {
    CompositionError::UnknownField {
        method: m.method.full_name.clone(),
        field: field.to_string(),
        message: message.full_name.clone(),
    }
}

fn unsupported(m: &MethodContext, param: &PathParam, kind: &'static str) -> CompositionError {
    CompositionError::UnsupportedPathField {
        method: m.method.full_name.clone(),
        variable: param.field_name(),
        kind,
    }
}

fn field_kind(field: &Field) -> Option<&'static str> {
    match (&field.field_type, field.cardinality) {
        (FieldType::Map { .. }, _) => Some("map"),
        (_, Cardinality::Repeated) => Some("repeated"),
        (FieldType::Message(_), _) => Some("message"),
        _ => None,
    }
}

/// The `&str` a path variable reads, walking nested messages for dotted paths:
/// `&request.name` or
/// `&request.book.as_ref().map(|book| book.name.to_string()).unwrap_or_default()`.
fn path_value(
    m: &MethodContext,
    message: &Message,
    param: &PathParam,
) -> Result<Expr, CompositionError> {
    let Some((leaf, parents)) = param.field_path.split_last() else {
        return Err(unsupported(m, param, "missing"));
    };

    let mut current = message;
    let mut value = Expr::local("request");
    let mut binding: Option<&str> = None;
    for name in parents {
        let field = current.field(name).ok_or_else(|| unknown_field(m, current, name))?;
        let FieldType::Message(type_name) = &field.field_type else {
            return Err(unsupported(m, param, "scalar parent"));
        };
        if field.is_repeated() {
            return Err(unsupported(m, param, "repeated"));
        }
        let next = m
            .ctx
            .message(type_name)
            .ok_or_else(|| CompositionError::UnknownMessage(type_name.clone()))?;
        let access = match binding {
            None => value.field(name.as_str()).method("as_ref", Vec::new()),
            Some(parent) => {
                let step = Expr::local(parent).field(name.as_str()).method("as_ref", Vec::new());
                value.method("and_then", vec![Expr::closure(vec![Pattern::ident(parent)], step)])
            }
        };
        value = access;
        binding = Some(name.as_str());
        current = next;
    }

    let field = current.field(leaf).ok_or_else(|| unknown_field(m, current, leaf))?;
    if let Some(kind) = field_kind(field) {
        return Err(unsupported(m, param, kind));
    }
    Ok(match binding {
        None if field.field_type.is_string() => value.field(leaf.as_str()).by_ref(),
        None => value.field(leaf.as_str()).method("to_string", Vec::new()).by_ref(),
        Some(parent) => value
            .method(
                "map",
                vec![Expr::closure(
                    vec![Pattern::ident(parent)],
                    Expr::local(parent).field(leaf.as_str()).method("to_string", Vec::new()),
                )],
            )
            .method("unwrap_or_default", Vec::new())
            .by_ref(),
    })
}

/// The URL path as a `format!` over the bound path locals.
fn format_path(
    m: &MethodContext,
    template: &PathTemplate,
    locals: &[(String, String)],
) -> Result<Expr, CompositionError> {
    let mut parts = Vec::with_capacity(template.segments().len());
    let mut captured = false;
    for segment in template.segments() {
        parts.push(match segment {
            Segment::Literal(text) => text.replace('{', "{{").replace('}', "}}"),
            Segment::Variable(variable) => {
                let name = variable.field_name();
                let local = locals
                    .iter()
                    .find(|(field, _)| *field == name)
                    .map(|(_, local)| local.clone())
                    .unwrap_or_else(|| name.replace('.', "_"));
                captured = true;
                format!("{{{local}}}")
            }
            Segment::Wildcard | Segment::MultiWildcard => {
                return Err(CompositionError::UnsupportedPathField {
                    method: m.method.full_name.clone(),
                    variable: template.as_str().to_string(),
                    kind: "unnamed wildcard",
                });
            }
        });
    }
    let mut path = parts.join("/");
    if template.has_leading_slash() {
        path.insert(0, '/');
    }
    if let Some(verb) = template.verb() {
        path = format!("{path}:{verb}");
    }
    Ok(if captured {
        Expr::macro_call("format", vec![Expr::str(path)])
    } else {
        Expr::str(path).method("to_string", Vec::new())
    })
}

/// `query.push(("pageSize".to_string(), value.to_string()));`
fn push(json_name: &str, value: Expr) -> Stmt {
    Stmt::Expr(Expr::local("query").method(
        "push",
        vec![Expr::Tuple(vec![
            Expr::str(json_name).method("to_string", Vec::new()),
            value.method("to_string", Vec::new()),
        ])],
    ))
}

/// Statements appending every non-default query field.
///
/// Message, map and bytes fields have no query-string form and are skipped.
fn query_pushes(m: &MethodContext, message: &Message, params: &[QueryParam]) -> Vec<Stmt> {
    let mut stmts = Vec::new();
    for param in params {
        let Some(field) = message.field(&param.field_name) else {
            continue;
        };
        let scalar = match &field.field_type {
            FieldType::Scalar(ScalarType::Bytes)
            | FieldType::Message(_)
            | FieldType::Map { .. } => continue,
            FieldType::Scalar(scalar) => Some(*scalar),
            FieldType::Enum(_) => None,
        };
        let json_name = param.json_name.as_str();
        let access = Expr::local("request").field(&field.name);

        let variant = m.types.oneof_variant(message, field);
        if let (Some(oneof), Some(variant)) = (&field.oneof, variant) {
            let pattern = Pattern::tuple_struct(
                Symbol::prelude("Some"),
                vec![Pattern::tuple_struct(variant, vec![Pattern::ident("value")])],
            );
            stmts.push(Stmt::Expr(Expr::if_let(
                pattern,
                Expr::local("request").field(RUST_NAMING.member_name(oneof)).by_ref(),
                Block::new(vec![push(json_name, Expr::local("value"))]),
            )));
            continue;
        }
        let stmt = match field.cardinality {
            Cardinality::Repeated => Expr::for_loop(
                Pattern::ident("value"),
                access.by_ref(),
                Block::new(vec![push(json_name, Expr::local("value"))]),
            ),
            Cardinality::Optional => Expr::if_let(
                Pattern::tuple_struct(Symbol::prelude("Some"), vec![Pattern::ident("value")]),
                access.by_ref(),
                Block::new(vec![push(json_name, Expr::local("value"))]),
            ),
            Cardinality::Singular => Expr::if_(
                non_default(access.clone(), scalar),
                Block::new(vec![push(json_name, access)]),
            ),
        };
        stmts.push(Stmt::Expr(stmt));
    }
    stmts
}

/// `!request.name.is_empty()`, `request.flag`, `request.size != 0`.
fn non_default(access: Expr, scalar: Option<ScalarType>) -> Expr {
    match scalar {
        Some(ScalarType::String) => Expr::not(access.method("is_empty", Vec::new())),
        Some(ScalarType::Bool) => access,
        Some(ScalarType::Double | ScalarType::Float) => {
            Expr::binary(BinOp::Ne, access, Expr::float(0.0))
        }
        _ => Expr::binary(BinOp::Ne, access, Expr::int(0)),
    }
}

/// `get_operation` and `cancel_operation` against the operations collection.
fn operation_call(method: &str, path: String, empty: bool) -> Block {
    let name = Expr::call(
        http_fn("path_param"),
        vec![
            Expr::str("name"),
            Expr::local("request").field("name").by_ref(),
            Expr::str("operations/**"),
        ],
    )
    .try_();
    let http_request = Expr::struct_lit(
        TypeRef::named(gax("HttpRequest")),
        vec![
            ("method".to_string(), Expr::path(gax("HttpMethod").child(method))),
            ("path".to_string(), Expr::macro_call("format", vec![Expr::str(path)])),
            ("query".to_string(), new_vec()),
            ("body".to_string(), Expr::path(Symbol::prelude("None"))),
        ],
    );
    let call = own("channel")
        .method("execute", vec![Expr::local("http_request"), Expr::local("timeout")])
        .try_();
    let mut stmts = vec![Stmt::let_("name", name), Stmt::let_("http_request", http_request)];
    if empty {
        stmts.extend(decode_response(call, true).stmts);
    } else {
        stmts.push(Stmt::let_("response", call));
        stmts.push(Stmt::Tail(Expr::call(
            http_fn("from_json"),
            vec![Expr::local("response").by_ref()],
        )));
    }
    Block::new(stmts)
}
