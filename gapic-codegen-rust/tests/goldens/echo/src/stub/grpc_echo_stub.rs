// This file is @generated by gapic. Do not edit.

use std::sync::Arc;
use std::time::Duration;

use gapic_gax::{GrpcChannel, RequestStream, Result, ServerStream};
use gapic_gax::longrunning::{CancelOperationRequest, GetOperationRequest, Operation};
use gapic_gax::lro::Operations;
use gapic_gax::transport::{decode, decode_stream, encode, encode_stream};

use crate::model::{
    BlockRequest, BlockResponse, EchoRequest, EchoResponse, ExpandRequest, PagedExpandRequest,
    PagedExpandResponse, WaitRequest,
};
use crate::stub::EchoStub;

/// Calls `google.showcase.v1beta1.Echo` over a gRPC channel.
#[derive(Debug, Clone)]
pub struct GrpcEchoStub {
    channel: Arc<dyn GrpcChannel>,
}

impl GrpcEchoStub {
    pub fn new(channel: Arc<dyn GrpcChannel>) -> Self {
        Self { channel }
    }
}

impl EchoStub for GrpcEchoStub {
    fn echo(&self, request: &EchoRequest, timeout: Duration) -> Result<EchoResponse> {
        let response = self.channel.unary(
            "/google.showcase.v1beta1.Echo/Echo",
            encode(request),
            timeout,
        )?;
        decode(&response)
    }

    fn expand(
        &self,
        request: &ExpandRequest,
        timeout: Duration,
    ) -> Result<ServerStream<EchoResponse>> {
        let stream = self.channel.server_streaming(
            "/google.showcase.v1beta1.Echo/Expand",
            encode(request),
            timeout,
        )?;
        Ok(decode_stream(stream))
    }

    fn collect(
        &self,
        requests: RequestStream<EchoRequest>,
        timeout: Duration,
    ) -> Result<EchoResponse> {
        let response = self.channel.client_streaming(
            "/google.showcase.v1beta1.Echo/Collect",
            encode_stream(requests),
            timeout,
        )?;
        decode(&response)
    }

    fn chat(
        &self,
        requests: RequestStream<EchoRequest>,
        timeout: Duration,
    ) -> Result<ServerStream<EchoResponse>> {
        let stream = self.channel.bidi_streaming(
            "/google.showcase.v1beta1.Echo/Chat",
            encode_stream(requests),
            timeout,
        )?;
        Ok(decode_stream(stream))
    }

    fn paged_expand(
        &self,
        request: &PagedExpandRequest,
        timeout: Duration,
    ) -> Result<PagedExpandResponse> {
        let response = self.channel.unary(
            "/google.showcase.v1beta1.Echo/PagedExpand",
            encode(request),
            timeout,
        )?;
        decode(&response)
    }

    fn wait(&self, request: &WaitRequest, timeout: Duration) -> Result<Operation> {
        let response = self.channel.unary(
            "/google.showcase.v1beta1.Echo/Wait",
            encode(request),
            timeout,
        )?;
        decode(&response)
    }

    fn block(&self, request: &BlockRequest, timeout: Duration) -> Result<BlockResponse> {
        let response = self.channel.unary(
            "/google.showcase.v1beta1.Echo/Block",
            encode(request),
            timeout,
        )?;
        decode(&response)
    }
}

impl Operations for GrpcEchoStub {
    fn get_operation(&self, request: &GetOperationRequest, timeout: Duration) -> Result<Operation> {
        let response = self.channel.unary(
            "/google.longrunning.Operations/GetOperation",
            encode(request),
            timeout,
        )?;
        decode(&response)
    }

    fn cancel_operation(&self, request: &CancelOperationRequest, timeout: Duration) -> Result<()> {
        self.channel.unary(
            "/google.longrunning.Operations/CancelOperation",
            encode(request),
            timeout,
        )?;
        Ok(())
    }
}
