use gapic_codegen::{
    ast::{Block, Expr, Stmt, TypeRef},
    language::TypeMapper,
};
use gapic_model::CallShape;

use super::{ShapeComposer, arc_clone, grpc_unary_body, invoke_stub, own, print_debug};
use crate::composer::{MethodContext, method::gax_result};

/// Methods returning `google.longrunning.Operation`, wrapped in a future
/// that polls the operations service until the typed response is ready.
pub(crate) struct LroComposer;

impl ShapeComposer for LroComposer {
    fn name(&self) -> &'static str {
        "long-running"
    }

    fn handles(&self, shape: &CallShape) -> bool {
        matches!(shape, CallShape::LongRunning(_))
    }

    fn stub_returns(&self, _m: &MethodContext) -> TypeRef {
        gax_result(TypeRef::path("gapic_gax::longrunning::Operation"))
    }

    fn client_returns(&self, m: &MethodContext) -> TypeRef {
        let future = TypeRef::path("gapic_gax::lro::OperationFuture");
        let future = match m.method.shape.operation() {
            Some(info) => future
                .arg(m.types.message(&info.response_type))
                .arg(m.types.message(&info.metadata_type)),
            None => future.arg(TypeRef::unit()).arg(TypeRef::unit()),
        };
        gax_result(future)
    }

    fn client_body(&self, m: &MethodContext) -> Vec<Stmt> {
        let start = invoke_stub(
            m,
            Expr::local("settings").field("initial"),
            own("stub"),
            own("clock"),
        );
        let future = Expr::assoc_call(
            TypeRef::path("gapic_gax::lro::OperationFuture"),
            "new",
            vec![
                Expr::local("operation"),
                arc_clone("stub"),
                Expr::local("settings").field("polling"),
                arc_clone("clock"),
            ],
        );
        vec![Stmt::let_("operation", start.try_()), Stmt::Tail(Expr::ok(future))]
    }

    fn grpc_body(&self, m: &MethodContext) -> Block {
        grpc_unary_body(m)
    }

    fn sample_statements(&self, _shape: &CallShape, call: Expr) -> Vec<Stmt> {
        vec![
            Stmt::let_("operation", call.try_()),
            Stmt::let_("response", Expr::local("operation").method("wait", Vec::new()).try_()),
            print_debug("response"),
        ]
    }
}
