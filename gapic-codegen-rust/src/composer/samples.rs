//! Runnable snippets, one per method and one per flattened signature.
//!
//! Samples are written from outside the generated crate, so every type is
//! spelled through the crate name rather than `crate::`.

use gapic_codegen::{
    CompositionError,
    ast::{Block, CompilationUnit, Expr, Item, MethodDecl, Stmt, Symbol, TypeRef, Visibility},
    language::RUST_NAMING,
};
use gapic_core::ScalarType;
use gapic_model::{Cardinality, Field, FieldType, GapicContext, Message, ResourceName, Service};

use super::{
    Composer, ComposerOptions, MethodContext,
    client::{FlatArg, flat_args, flattened_name},
    resources::primary_constructor,
};
use crate::{
    naming::{ServiceNames, api_version, host_label},
    type_mapper::RustTypeMapper,
};

const DISCLAIMER: [&str; 4] = [
    "This snippet has been automatically generated and should be regarded as a code template \
     only.",
    "It will require modifications to work:",
    "- It may require correct/in-range values for request initialization.",
    "- It may require specifying an endpoint when creating the client.",
];

pub(crate) struct SampleComposer;

impl Composer for SampleComposer {
    fn name(&self) -> &'static str {
        "samples"
    }

    fn compose(
        &self,
        ctx: &GapicContext,
        options: &ComposerOptions,
    ) -> Result<Vec<CompilationUnit>, CompositionError> {
        if !options.samples {
            return Ok(Vec::new());
        }
        let types = RustTypeMapper::external(ctx);
        let mut units = Vec::new();
        for service in ctx.services() {
            let names = ServiceNames::new(service);
            for method in &service.methods {
                let m = MethodContext::new(ctx, service, method, &names, &types);
                units.push(request_sample(&m)?);
                if m.shape().streams_requests(&method.shape) {
                    continue;
                }
                for signature in &method.signatures {
                    let args = flat_args(&m, signature)?;
                    units.push(flattened_sample(&m, &flattened_name(&m, signature), &args));
                }
            }
        }
        Ok(units)
    }
}

/// `library_v1_generated_library_service_client_get_shelf_by_name`.
fn region_tag(service: &Service, names: &ServiceNames, sample: &str) -> String {
    format!(
        "{}_{}_generated_{}_{sample}",
        host_label(service.default_host.as_deref(), &service.package),
        api_version(&service.package),
        names.client_module,
    )
}

fn sample_unit(m: &MethodContext, sample: &str, mut body: Vec<Stmt>) -> CompilationUnit {
    let client = Symbol::new([m.ctx.api().crate_ident()], m.names.client.as_str());
    body.push(Stmt::Tail(Expr::ok(Expr::Tuple(Vec::new()))));
    let function = MethodDecl::new(format!("sample_{sample}"))
        .visibility(Visibility::Public)
        .param("client", TypeRef::reference(TypeRef::named(client)))
        .returns(TypeRef::result(
            TypeRef::unit(),
            TypeRef::boxed(TypeRef::Dyn(vec![TypeRef::path("std::error::Error")])),
        ))
        .body(Block::new(body));
    CompilationUnit::new(
        format!("samples/{}/{sample}.rs", m.names.client_module),
        ["samples", m.names.client_module.as_str(), sample],
    )
    .notice(DISCLAIMER)
    .region_tag(region_tag(m.service, m.names, sample))
    .item(Item::Function(function))
}

/// `client.method(args)`.
fn client_call(method: String, args: Vec<Expr>) -> Expr {
    Expr::local("client").method(method, args)
}

/// `ShelfName::of("[SHELF]")`.
fn resource_placeholder(types: &RustTypeMapper, resource: &ResourceName) -> Expr {
    let (constructor, variables) = primary_constructor(resource);
    let args = variables
        .iter()
        .map(|variable| Expr::str(format!("[{}]", variable.to_uppercase())))
        .collect();
    Expr::assoc_call(TypeRef::named(types.resource_symbol(resource)), constructor, args)
}

/// A placeholder for a required request field, or `None` to leave it defaulted.
fn field_placeholder(m: &MethodContext, field: &Field) -> Option<Expr> {
    let resource = field
        .resource_reference
        .as_ref()
        .filter(|reference| !reference.child)
        .and_then(|reference| m.ctx.resource_name(&reference.type_name));
    match (&field.field_type, field.cardinality) {
        (_, Cardinality::Repeated) | (FieldType::Map { .. }, _) => None,
        (FieldType::Scalar(ScalarType::String), Cardinality::Singular) => {
            let value = match resource {
                Some(resource) => resource_placeholder(m.types, resource),
                None => Expr::str(format!("[{}]", field.name.to_uppercase())),
            };
            Some(value.method("to_string", Vec::new()))
        }
        (FieldType::Message(_), _) => Some(Expr::some(Expr::default_value())),
        _ => None,
    }
}

fn request_value(m: &MethodContext, message: &Message) -> Expr {
    let fields: Vec<(String, Expr)> = message
        .fields
        .iter()
        .filter(|field| field.required && field.oneof.is_none())
        .filter_map(|field| {
            let value = field_placeholder(m, field)?;
            Some((RUST_NAMING.member_name(&field.name), value))
        })
        .collect();
    if fields.is_empty() {
        return Expr::assoc_call(m.request_type(), "default", Vec::new());
    }
    Expr::StructLit {
        ty: m.request_type(),
        fields,
        rest: Some(Box::new(Expr::default_value())),
    }
}

fn request_sample(m: &MethodContext) -> Result<CompilationUnit, CompositionError> {
    let shape = m.shape();
    let message = m.input_message()?;
    let mut body = Vec::new();
    let call = if shape.streams_requests(&m.method.shape) {
        body.push(Stmt::let_(
            "requests",
            Expr::macro_call("vec", vec![request_value(m, message)]),
        ));
        let stream = Expr::assoc_call(
            TypeRef::prelude("Box"),
            "new",
            vec![Expr::local("requests").method("into_iter", Vec::new())],
        );
        client_call(m.fn_name(), vec![stream])
    } else {
        body.push(Stmt::let_("request", request_value(m, message)));
        client_call(m.fn_name(), vec![Expr::local("request")])
    };
    body.extend(shape.sample_statements(&m.method.shape, call));
    Ok(sample_unit(m, &m.fn_name(), body))
}

fn flattened_sample(m: &MethodContext, name: &str, args: &[FlatArg]) -> CompilationUnit {
    let mut body = Vec::new();
    let mut call_args = Vec::new();
    for arg in args {
        let local = Expr::local(&arg.param);
        match arg.resource {
            Some(resource) if arg.field.is_repeated() => {
                let value = resource_placeholder(m.types, resource);
                body.push(Stmt::let_(&arg.param, Expr::macro_call("vec", vec![value])));
                call_args.push(local.by_ref());
            }
            Some(resource) => {
                body.push(Stmt::let_(&arg.param, resource_placeholder(m.types, resource)));
                call_args.push(local.by_ref());
            }
            None => {
                body.push(plain_placeholder(arg));
                call_args.push(local);
            }
        }
    }
    let call = client_call(name.to_string(), call_args);
    body.extend(m.shape().sample_statements(&m.method.shape, call));
    sample_unit(m, name, body)
}

fn plain_placeholder(arg: &FlatArg) -> Stmt {
    match (&arg.ty, &arg.field.field_type) {
        (TypeRef::ImplTrait(_), _) => Stmt::let_(
            &arg.param,
            Expr::str(format!("[{}]", arg.field.name.to_uppercase())),
        ),
        (TypeRef::Named { .. }, FieldType::Message(_)) if !arg.field.is_repeated() => {
            Stmt::let_(&arg.param, Expr::assoc_call(arg.ty.clone(), "default", Vec::new()))
        }
        _ => Stmt::let_typed(&arg.param, arg.ty.clone(), Expr::default_value()),
    }
}
