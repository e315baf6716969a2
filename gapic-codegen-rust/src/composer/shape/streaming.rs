use gapic_codegen::ast::{Block, Expr, Stmt, Symbol, TypeRef};
use gapic_model::CallShape;

use super::{
    HttpExchange, ShapeComposer, decode_response, invoke_stub, own, print_debug, print_each,
};
use crate::composer::{MethodContext, method::gax_result};

/// Server, client and bidirectional streaming.
///
/// Only server streams are retried: once a request stream has been handed
/// to the channel it cannot be replayed.
pub(crate) struct StreamingComposer;

fn server_stream(m: &MethodContext) -> TypeRef {
    TypeRef::path("gapic_gax::ServerStream").arg(m.output_type())
}

fn transport_fn(name: &str) -> Expr {
    Expr::path(Symbol::new(["gapic_gax", "transport"], name))
}

impl ShapeComposer for StreamingComposer {
    fn name(&self) -> &'static str {
        "streaming"
    }

    fn handles(&self, shape: &CallShape) -> bool {
        shape.is_streaming()
    }

    fn streams_requests(&self, shape: &CallShape) -> bool {
        matches!(shape, CallShape::ClientStreaming | CallShape::Bidi)
    }

    fn stub_returns(&self, m: &MethodContext) -> TypeRef {
        match m.method.shape {
            CallShape::ClientStreaming => gax_result(m.output_type()),
            _ => gax_result(server_stream(m)),
        }
    }

    fn client_returns(&self, m: &MethodContext) -> TypeRef {
        self.stub_returns(m)
    }

    fn client_body(&self, m: &MethodContext) -> Vec<Stmt> {
        let call = if self.streams_requests(&m.method.shape) {
            own("stub").method(
                m.fn_name(),
                vec![
                    Expr::local("requests"),
                    Expr::local("settings").field("total_timeout"),
                ],
            )
        } else {
            invoke_stub(m, Expr::local("settings"), own("stub"), own("clock"))
        };
        vec![Stmt::Tail(call)]
    }

    fn grpc_body(&self, m: &MethodContext) -> Block {
        let (channel_fn, request) = match m.method.shape {
            CallShape::ClientStreaming => ("client_streaming", "requests"),
            CallShape::Bidi => ("bidi_streaming", "requests"),
            _ => ("server_streaming", "request"),
        };
        let encoder = if request == "requests" { "encode_stream" } else { "encode" };
        let call = own("channel")
            .method(
                channel_fn,
                vec![
                    Expr::str(m.method.grpc_path()),
                    Expr::call(transport_fn(encoder), vec![Expr::local(request)]),
                    Expr::local("timeout"),
                ],
            )
            .try_();
        if matches!(m.method.shape, CallShape::ClientStreaming) {
            return decode_response(call, m.output_type().is_unit());
        }
        Block::new(vec![
            Stmt::let_("stream", call),
            Stmt::Tail(Expr::ok(Expr::call(
                transport_fn("decode_stream"),
                vec![Expr::local("stream")],
            ))),
        ])
    }

    fn http_exchange(&self, shape: &CallShape) -> HttpExchange {
        match shape {
            CallShape::ServerStreaming => HttpExchange::Streamed,
            _ => HttpExchange::Unsupported,
        }
    }

    fn sample_statements(&self, shape: &CallShape, call: Expr) -> Vec<Stmt> {
        match shape {
            CallShape::ClientStreaming => {
                vec![Stmt::let_("response", call.try_()), print_debug("response")]
            }
            _ => vec![print_each(call.try_(), "response")],
        }
    }
}
