//! Typed resource names: `src/resources.rs`.
//!
//! A resource with one pattern becomes a struct with one field per variable;
//! several patterns become an enum with one struct-like variant each.

use gapic_codegen::{
    CompositionError,
    ast::{
        BinOp, Block, Class, ClassKind, CompilationUnit, Enum, Expr, FieldDecl, Impl, Item, Lit,
        MatchArm, MethodDecl, Pattern, Receiver, Stmt, Symbol, TypeRef, Variant, VariantKind,
        Visibility,
    },
    language::RUST_NAMING,
};
use gapic_model::{GapicContext, PathTemplate, ResourceName, Segment};

use super::{Composer, ComposerOptions};

pub(crate) struct ResourceNameComposer;

impl Composer for ResourceNameComposer {
    fn name(&self) -> &'static str {
        "resources"
    }

    fn compose(
        &self,
        ctx: &GapicContext,
        _options: &ComposerOptions,
    ) -> Result<Vec<CompilationUnit>, CompositionError> {
        if ctx.resource_names().is_empty() {
            return Ok(Vec::new());
        }
        let items = ctx.resource_names().values().flat_map(|resource| {
            if resource.is_multi_pattern() {
                enum_items(resource)
            } else {
                struct_items(resource)
            }
        });
        Ok(vec![
            CompilationUnit::new("src/resources.rs", ["crate", "resources"])
                .doc("Resource names of this API.")
                .items(items),
        ])
    }
}

/// The constructor a sample uses: `ShelfName::of` or `BookName::shelf_book`.
pub(crate) fn primary_constructor(resource: &ResourceName) -> (String, Vec<String>) {
    let Some(pattern) = resource.patterns.first() else {
        return ("of".to_string(), Vec::new());
    };
    let name = if resource.is_multi_pattern() {
        constructor_name(pattern)
    } else {
        "of".to_string()
    };
    (name, pattern.variable_names())
}

fn constructor_name(pattern: &PathTemplate) -> String {
    RUST_NAMING.member_name(&ResourceName::variant_name(pattern))
}

fn field_names(pattern: &PathTemplate) -> Vec<String> {
    pattern
        .variable_names()
        .iter()
        .map(|name| RUST_NAMING.member_name(name))
        .collect()
}

fn into_string() -> TypeRef {
    TypeRef::ImplTrait(vec![TypeRef::prelude("Into").arg(TypeRef::string())])
}

/// `fn of(shelf: impl Into<String>) -> Self { Self { shelf: shelf.into() } }`.
fn constructor(name: &str, doc: String, target: TypeRef, fields: &[String]) -> MethodDecl {
    let mut method = MethodDecl::new(name).doc(doc).visibility(Visibility::Public);
    for field in fields {
        method = method.param(field, into_string());
    }
    let values = fields
        .iter()
        .map(|field| (field.clone(), Expr::local(field).method("into", Vec::new())))
        .collect();
    method
        .returns(TypeRef::SelfType)
        .body(Block::tail(Expr::struct_lit(target, values)))
}

/// The `parse` arm of one pattern: split segments matched by a slice pattern,
/// guarded against empty captures.
fn parse_arm(pattern: &PathTemplate, target: TypeRef) -> MatchArm {
    let slice = pattern
        .segments()
        .iter()
        .map(|segment| match segment {
            Segment::Variable(variable) => {
                Pattern::ident(RUST_NAMING.member_name(&variable.field_name()))
            }
            Segment::Literal(literal) => Pattern::Lit(Lit::Str(literal.clone())),
            Segment::Wildcard | Segment::MultiWildcard => Pattern::Wildcard,
        })
        .collect();
    let fields = field_names(pattern);
    let guard = fields
        .iter()
        .map(|field| Expr::not(Expr::local(field).method("is_empty", Vec::new())))
        .reduce(|all, next| Expr::binary(BinOp::And, all, next));
    let values = fields
        .iter()
        .map(|field| (field.clone(), Expr::local(field).method("to_string", Vec::new())))
        .collect();
    let arm = MatchArm::new(Pattern::Slice(slice), Expr::ok(Expr::struct_lit(target, values)));
    match guard {
        Some(guard) => arm.guard(guard),
        None => arm,
    }
}

fn parse_method(resource: &ResourceName, arms: Vec<MatchArm>) -> MethodDecl {
    let error = TypeRef::path("gapic_gax::ResourceNameError");
    let fallback = MatchArm::new(
        Pattern::Wildcard,
        Expr::err(Expr::assoc_call(
            error.clone(),
            "new",
            vec![Expr::local("name"), Expr::str(&resource.resource_type)],
        )),
    );
    let segments = Expr::local("name")
        .method("split", vec![Expr::str("/")])
        .method_turbofish("collect", vec![TypeRef::vec(TypeRef::Generic("_".into()))], Vec::new());
    MethodDecl::new("parse")
        .doc(format!("Parse a `{}` name.", resource.resource_type))
        .visibility(Visibility::Public)
        .param("name", TypeRef::str_ref())
        .returns(TypeRef::result(TypeRef::SelfType, error))
        .body(Block::new(vec![
            Stmt::let_("segments", segments),
            Stmt::Tail(Expr::match_(
                Expr::local("segments").method("as_slice", Vec::new()),
                arms.into_iter().chain([fallback]).collect(),
            )),
        ]))
}

/// `shelves/{shelf}` becomes the format string `shelves/{}`.
fn format_string(pattern: &PathTemplate) -> String {
    pattern
        .segments()
        .iter()
        .map(|segment| match segment {
            Segment::Variable(_) => "{}".to_string(),
            other => other.to_string().replace('{', "{{").replace('}', "}}"),
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn write_call(pattern: &PathTemplate, values: Vec<Expr>) -> Expr {
    let mut args = vec![Expr::local("f"), Expr::str(format_string(pattern))];
    args.extend(values);
    Expr::macro_call("write", args)
}

fn display_impl(target: &str, body: Expr) -> Impl {
    Impl::of_trait(TypeRef::path("std::fmt::Display"), TypeRef::named(Symbol::local(target)))
        .method(
            MethodDecl::new("fmt")
                .receiver(Receiver::Ref)
                .param(
                    "f",
                    TypeRef::reference_mut(
                        TypeRef::path("std::fmt::Formatter").arg(TypeRef::Generic("'_".into())),
                    ),
                )
                .returns(TypeRef::path("std::fmt::Result"))
                .body(Block::tail(body)),
        )
}

fn derives(class: Class) -> Class {
    ["Debug", "Clone", "PartialEq", "Eq", "Hash"]
        .into_iter()
        .fold(class, |class, name| class.derive(Symbol::derive(name)))
}

fn struct_items(resource: &ResourceName) -> Vec<Item> {
    let Some(pattern) = resource.patterns.first() else {
        return Vec::new();
    };
    let fields = field_names(pattern);
    let class = derives(
        Class::new(
            &resource.type_name,
            ClassKind::Named(
                fields.iter().map(|field| FieldDecl::new(field, TypeRef::string())).collect(),
            ),
        )
        .doc(format!("The name of a `{}` resource: `{pattern}`.", resource.resource_type)),
    );

    let methods = Impl::inherent(TypeRef::named(Symbol::local(&resource.type_name)))
        .method(constructor(
            "of",
            format!("The name `{pattern}` with its variables filled in."),
            TypeRef::SelfType,
            &fields,
        ))
        .method(parse_method(resource, vec![parse_arm(pattern, TypeRef::SelfType)]));

    let values = fields
        .iter()
        .map(|field| Expr::SelfValue.field(field))
        .collect();
    vec![
        Item::Class(class),
        Item::Impl(methods),
        Item::Impl(display_impl(&resource.type_name, write_call(pattern, values))),
    ]
}

fn enum_items(resource: &ResourceName) -> Vec<Item> {
    let this = Symbol::local("Self");
    let variants = resource
        .patterns
        .iter()
        .map(|pattern| Variant {
            name: ResourceName::variant_name(pattern),
            doc: Some(format!("`{pattern}`.")),
            kind: VariantKind::Named(
                field_names(pattern)
                    .iter()
                    .map(|field| FieldDecl::new(field, TypeRef::string()))
                    .collect(),
            ),
        })
        .collect();
    let declaration = Enum {
        name: resource.type_name.clone(),
        doc: Some(format!(
            "The name of a `{}` resource, in any of its patterns.",
            resource.resource_type
        )),
        visibility: Visibility::Public,
        derives: ["Debug", "Clone", "PartialEq", "Eq", "Hash"]
            .into_iter()
            .map(Symbol::derive)
            .collect(),
        attrs: Vec::new(),
        variants,
    };

    let variant_type = |pattern: &PathTemplate| {
        TypeRef::named(this.child(ResourceName::variant_name(pattern)))
    };
    let constructors = resource.patterns.iter().map(|pattern| {
        constructor(
            &constructor_name(pattern),
            format!("The name `{pattern}`."),
            variant_type(pattern),
            &field_names(pattern),
        )
    });
    let arms = resource
        .patterns
        .iter()
        .map(|pattern| parse_arm(pattern, variant_type(pattern)))
        .collect();
    let methods = Impl::inherent(TypeRef::named(Symbol::local(&resource.type_name)))
        .methods(constructors)
        .method(parse_method(resource, arms));

    let display = Expr::match_(
        Expr::SelfValue,
        resource
            .patterns
            .iter()
            .map(|pattern| {
                let fields = field_names(pattern);
                let values = fields.iter().map(Expr::local).collect();
                MatchArm::new(
                    Pattern::Struct {
                        path: this.child(ResourceName::variant_name(pattern)),
                        fields,
                    },
                    write_call(pattern, values),
                )
            })
            .collect(),
    );
    vec![
        Item::Enum(declaration),
        Item::Impl(methods),
        Item::Impl(display_impl(&resource.type_name, display)),
    ]
}
