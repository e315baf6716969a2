use gapic_codegen::{
    CompositionError,
    ast::{MethodDecl, Receiver, TypeRef},
    language::TypeMapper,
};
use gapic_model::{GapicContext, Message, Method, Service};

use super::shape::{self, ShapeComposer};
use crate::{
    naming::{ServiceNames, method_name},
    type_mapper::RustTypeMapper,
};

/// Everything a composer needs to know about one method.
pub(crate) struct MethodContext<'a> {
    pub ctx: &'a GapicContext,
    pub service: &'a Service,
    pub method: &'a Method,
    pub names: &'a ServiceNames,
    pub types: &'a RustTypeMapper<'a>,
}

impl<'a> MethodContext<'a> {
    pub fn new(
        ctx: &'a GapicContext,
        service: &'a Service,
        method: &'a Method,
        names: &'a ServiceNames,
        types: &'a RustTypeMapper<'a>,
    ) -> Self {
        Self {
            ctx,
            service,
            method,
            names,
            types,
        }
    }

    pub fn fn_name(&self) -> String {
        method_name(self.method)
    }

    pub fn with_options_name(&self) -> String {
        format!("{}_with_options", self.fn_name())
    }

    pub fn shape(&self) -> &'static dyn ShapeComposer {
        shape::for_shape(&self.method.shape)
    }

    pub fn request_type(&self) -> TypeRef {
        self.types.message(&self.method.input_type)
    }

    /// The response message as declared, before any shape wraps it.
    pub fn output_type(&self) -> TypeRef {
        self.types.message(&self.method.output_type)
    }

    pub fn input_message(&self) -> Result<&'a Message, CompositionError> {
        self.ctx
            .message(&self.method.input_type)
            .ok_or_else(|| CompositionError::UnknownMessage(self.method.input_type.clone()))
    }

    /// The stub signature for this method, without a body.
    pub fn stub_method(&self, request: &str, timeout: &str) -> MethodDecl {
        let shape = self.shape();
        let request_type = if shape.streams_requests(&self.method.shape) {
            TypeRef::path("gapic_gax::RequestStream").arg(self.request_type())
        } else {
            TypeRef::reference(self.request_type())
        };
        MethodDecl::new(self.fn_name())
            .receiver(Receiver::Ref)
            .param(request, request_type)
            .param(timeout, TypeRef::path("std::time::Duration"))
            .returns(shape.stub_returns(self))
    }
}

/// `gapic_gax::Result<T>`.
pub(crate) fn gax_result(ok: TypeRef) -> TypeRef {
    TypeRef::path("gapic_gax::Result").arg(ok)
}

#[cfg(test)]
mod tests {
    use gapic_codegen::{ast::Param, testing};

    use super::*;
    use crate::composer::shape::with_method;

    #[test]
    fn test_names() {
        with_method(&testing::echo_model(), "PagedExpand", |m| {
            assert_eq!(m.fn_name(), "paged_expand");
            assert_eq!(m.with_options_name(), "paged_expand_with_options");
            assert_eq!(m.shape().name(), "paged");
            assert_eq!(m.input_message().unwrap().name, "PagedExpandRequest");
        });
    }

    #[test]
    fn test_stub_method_borrows_single_requests() {
        let stub = with_method(&testing::echo_model(), "Echo", |m| m.stub_method("request", "t"));
        assert_eq!(stub.name, "echo");
        assert_eq!(stub.receiver, Some(Receiver::Ref));
        assert_eq!(
            stub.params,
            vec![
                Param::new(
                    "request",
                    TypeRef::reference(TypeRef::path("crate::model::EchoRequest"))
                ),
                Param::new("t", TypeRef::path("std::time::Duration")),
            ]
        );
        assert_eq!(
            stub.returns,
            Some(gax_result(TypeRef::path("crate::model::EchoResponse")))
        );
        assert!(stub.body.is_none());
    }

    #[test]
    fn test_stub_method_takes_request_streams() {
        let stub = with_method(&testing::echo_model(), "Chat", |m| {
            m.stub_method("requests", "timeout")
        });
        assert_eq!(
            stub.params[0].ty,
            TypeRef::path("gapic_gax::RequestStream")
                .arg(TypeRef::path("crate::model::EchoRequest"))
        );
    }
}
