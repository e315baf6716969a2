use gapic_codegen::{
    CompositionError,
    ast::{
        Block, Class, ClassKind, Expr, Impl, Item, MethodDecl, Pattern, Stmt, Symbol, TypeRef,
    },
    language::{RUST_NAMING, TypeMapper},
};
use gapic_model::{CallShape, FieldType};

use super::{ShapeComposer, arc_clone, grpc_unary_body, invoke_stub, own, print_each};
use crate::composer::{MethodContext, method::gax_result};

/// List methods, exposed as a lazy iterator over every resource.
pub(crate) struct PagedComposer;

/// `ListBooksDescriptor`.
fn descriptor_name(m: &MethodContext) -> String {
    format!("{}Descriptor", RUST_NAMING.type_name(&m.method.name))
}

impl ShapeComposer for PagedComposer {
    fn name(&self) -> &'static str {
        "paged"
    }

    fn handles(&self, shape: &CallShape) -> bool {
        matches!(shape, CallShape::Paged(_))
    }

    fn stub_returns(&self, m: &MethodContext) -> TypeRef {
        gax_result(m.output_type())
    }

    fn client_returns(&self, m: &MethodContext) -> TypeRef {
        TypeRef::path("gapic_gax::PagedResponse")
            .arg(TypeRef::named(Symbol::local(descriptor_name(m))))
    }

    fn client_body(&self, m: &MethodContext) -> Vec<Stmt> {
        let fetch = Expr::move_closure(
            vec![Pattern::ident("request")],
            Expr::Block(Block::tail(invoke_stub(
                m,
                Expr::local("settings"),
                Expr::local("stub"),
                Expr::local("clock"),
            ))),
        );
        vec![
            Stmt::let_("stub", arc_clone("stub")),
            Stmt::let_("clock", arc_clone("clock")),
            Stmt::Tail(Expr::assoc_call(
                self.client_returns(m),
                "new",
                vec![Expr::local("request"), fetch],
            )),
        ]
    }

    fn support_items(&self, m: &MethodContext) -> Result<Vec<Item>, CompositionError> {
        let Some(info) = m.method.shape.pagination() else {
            return Ok(Vec::new());
        };
        let name = descriptor_name(m);
        let item_type = match &info.item_type {
            FieldType::Map { key, value } => {
                TypeRef::Tuple(vec![m.types.scalar(*key), m.types.field_type(value)])
            }
            other => m.types.field_type(other),
        };
        let mut items = Expr::local("response").field(&info.items_field);
        if matches!(info.item_type, FieldType::Map { .. }) {
            items = items.method("into_iter", Vec::new()).method("collect", Vec::new());
        }

        let descriptor = Class::new(&name, ClassKind::Unit)
            .doc(format!(
                "Pages of [`{}::{}`].",
                m.names.client,
                m.fn_name()
            ))
            .derive(Symbol::derive("Debug"));
        let page_token = Expr::local("request").field(&info.page_token_field);
        let next_page_token = Expr::local("response").field(&info.next_page_token_field);
        let implementation = Impl::of_trait(
            TypeRef::path("gapic_gax::PageDescriptor"),
            TypeRef::named(Symbol::local(&name)),
        )
        .assoc_type("Request", m.request_type())
        .assoc_type("Response", m.output_type())
        .assoc_type("Item", item_type.clone())
        .method(
            MethodDecl::new("set_page_token")
                .param("request", TypeRef::reference_mut(m.request_type()))
                .param("token", TypeRef::string())
                .body(Block::new(vec![Stmt::Expr(Expr::assign(
                    page_token,
                    Expr::local("token"),
                ))])),
        )
        .method(
            MethodDecl::new("next_page_token")
                .param("response", TypeRef::reference(m.output_type()))
                .returns(TypeRef::str_ref())
                .body(Block::tail(next_page_token.by_ref())),
        )
        .method(
            MethodDecl::new("items")
                .param("response", m.output_type())
                .returns(TypeRef::vec(item_type))
                .body(Block::tail(items)),
        );
        Ok(vec![Item::Class(descriptor), Item::Impl(implementation)])
    }

    fn grpc_body(&self, m: &MethodContext) -> Block {
        grpc_unary_body(m)
    }

    fn sample_statements(&self, _shape: &CallShape, call: Expr) -> Vec<Stmt> {
        vec![print_each(call, "item")]
    }
}
