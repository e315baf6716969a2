//! Per-shape client code.
//!
//! Every call shape has exactly one composer here; [`for_shape`] is the
//! only dispatch point, so adding a shape fails to compile until it is
//! handled.

mod lro;
mod paged;
mod streaming;
mod unary;

use gapic_codegen::{
    CompositionError,
    ast::{Block, Expr, Item, Pattern, Stmt, Symbol, TypeRef},
};
use gapic_model::CallShape;

pub(crate) use lro::LroComposer;
pub(crate) use paged::PagedComposer;
pub(crate) use streaming::StreamingComposer;
pub(crate) use unary::UnaryComposer;

use super::MethodContext;

/// How a shape travels over HTTP/JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HttpExchange {
    /// One request, one JSON response.
    Single,
    /// One request, a stream of JSON responses.
    Streamed,
    /// Request streams have no HTTP/JSON mapping.
    Unsupported,
}

/// The client-facing half of one call shape.
pub(crate) trait ShapeComposer: Send + Sync {
    fn name(&self) -> &'static str;

    fn handles(&self, shape: &CallShape) -> bool;

    /// Whether requests arrive as a [`RequestStream`](gapic_gax::RequestStream).
    fn streams_requests(&self, _shape: &CallShape) -> bool {
        false
    }

    fn stub_returns(&self, m: &MethodContext) -> TypeRef;

    fn client_returns(&self, m: &MethodContext) -> TypeRef;

    /// The `_with_options` body after `settings` has been bound.
    fn client_body(&self, m: &MethodContext) -> Vec<Stmt>;

    /// Items the client module needs next to the client.
    fn support_items(&self, _m: &MethodContext) -> Result<Vec<Item>, CompositionError> {
        Ok(Vec::new())
    }

    fn grpc_body(&self, m: &MethodContext) -> Block;

    fn http_exchange(&self, _shape: &CallShape) -> HttpExchange {
        HttpExchange::Single
    }

    /// Sample statements consuming `call`, the client call expression.
    fn sample_statements(&self, shape: &CallShape, call: Expr) -> Vec<Stmt>;
}

pub(crate) static SHAPE_COMPOSERS: [&dyn ShapeComposer; 4] =
    [&UnaryComposer, &PagedComposer, &StreamingComposer, &LroComposer];

pub(crate) fn for_shape(shape: &CallShape) -> &'static dyn ShapeComposer {
    match shape {
        CallShape::Unary => &UnaryComposer,
        CallShape::Paged(_) => &PagedComposer,
        CallShape::ServerStreaming | CallShape::ClientStreaming | CallShape::Bidi => {
            &StreamingComposer
        }
        CallShape::LongRunning(_) => &LroComposer,
    }
}

/// `invoke(&settings, self.clock.as_ref(), |timeout| self.stub.m(&request, timeout))`,
/// with `settings` naming the bound settings expression.
pub(crate) fn invoke_stub(m: &MethodContext, settings: Expr, stub: Expr, clock: Expr) -> Expr {
    let call = stub.method(
        m.fn_name(),
        vec![Expr::local("request").by_ref(), Expr::local("timeout")],
    );
    Expr::call(
        Expr::path(Symbol::path("gapic_gax::invoke")),
        vec![
            settings.by_ref(),
            clock.method("as_ref", Vec::new()),
            Expr::closure(vec![Pattern::ident("timeout")], call),
        ],
    )
}

/// `self.stub` and `self.clock`.
pub(crate) fn own(field: &str) -> Expr {
    Expr::SelfValue.field(field)
}

/// `Arc::clone(&self.field)`.
pub(crate) fn arc_clone(field: &str) -> Expr {
    Expr::assoc_call(TypeRef::path("std::sync::Arc"), "clone", vec![own(field).by_ref()])
}

/// `self.channel.unary(path, encode(request), timeout)?` decoded into the output type.
pub(crate) fn grpc_unary_body(m: &MethodContext) -> Block {
    let call = own("channel")
        .method(
            "unary",
            vec![
                Expr::str(m.method.grpc_path()),
                Expr::call(
                    Expr::path(Symbol::path("gapic_gax::transport::encode")),
                    vec![Expr::local("request")],
                ),
                Expr::local("timeout"),
            ],
        )
        .try_();
    decode_response(call, m.output_type().is_unit())
}

/// Bind `call` and decode it, or discard it when the output is `()`.
pub(crate) fn decode_response(call: Expr, empty: bool) -> Block {
    if empty {
        return Block::new(vec![Stmt::Expr(call), Stmt::Tail(Expr::ok(Expr::Tuple(Vec::new())))]);
    }
    Block::new(vec![
        Stmt::let_("response", call),
        Stmt::Tail(Expr::call(
            Expr::path(Symbol::path("gapic_gax::transport::decode")),
            vec![Expr::local("response").by_ref()],
        )),
    ])
}

/// `println!("{name:?}");`
pub(crate) fn print_debug(name: &str) -> Stmt {
    Stmt::Expr(Expr::macro_call("println", vec![Expr::str(format!("{{{name}:?}}"))]))
}

/// `for item in items { let item = item?; println!("{item:?}"); }`
pub(crate) fn print_each(items: Expr, name: &str) -> Stmt {
    Stmt::Expr(Expr::for_loop(
        Pattern::ident(name),
        items,
        Block::new(vec![Stmt::let_(name, Expr::local(name).try_()), print_debug(name)]),
    ))
}

/// Run `f` over `method` of the first service in `model`.
#[cfg(test)]
pub(crate) fn with_method<T>(
    model: &gapic_model::GapicContext,
    method: &str,
    f: impl FnOnce(&MethodContext) -> T,
) -> T {
    let service = &model.services()[0];
    let names = crate::naming::ServiceNames::new(service);
    let types = crate::type_mapper::RustTypeMapper::new(model);
    let method = service.method(method).unwrap();
    f(&MethodContext::new(model, service, method, &names, &types))
}
