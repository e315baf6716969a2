use gapic_codegen::ast::{Block, Expr, Stmt, TypeRef};
use gapic_model::CallShape;

use super::{ShapeComposer, grpc_unary_body, invoke_stub, own, print_debug};
use crate::composer::{MethodContext, method::gax_result};

/// One request, one response, retried under the method's settings.
pub(crate) struct UnaryComposer;

impl ShapeComposer for UnaryComposer {
    fn name(&self) -> &'static str {
        "unary"
    }

    fn handles(&self, shape: &CallShape) -> bool {
        matches!(shape, CallShape::Unary)
    }

    fn stub_returns(&self, m: &MethodContext) -> TypeRef {
        gax_result(m.output_type())
    }

    fn client_returns(&self, m: &MethodContext) -> TypeRef {
        gax_result(m.output_type())
    }

    fn client_body(&self, m: &MethodContext) -> Vec<Stmt> {
        vec![Stmt::Tail(invoke_stub(m, Expr::local("settings"), own("stub"), own("clock")))]
    }

    fn grpc_body(&self, m: &MethodContext) -> Block {
        grpc_unary_body(m)
    }

    fn sample_statements(&self, _shape: &CallShape, call: Expr) -> Vec<Stmt> {
        vec![Stmt::let_("response", call.try_()), print_debug("response")]
    }
}
