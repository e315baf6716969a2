// This file is @generated by gapic. Do not edit.

//! The client of `google.showcase.v1beta1.Echo`.

use std::sync::Arc;

use gapic_gax::{
    CallOptions, Clock, GrpcChannel, HttpChannel, PageDescriptor, PagedResponse, RequestStream,
    Result, ServerStream, SystemClock, invoke,
};
use gapic_gax::lro::OperationFuture;
use gapic_gax::rpc::Status;

use crate::echo_settings::EchoSettings;
use crate::model::{
    BlockRequest, BlockResponse, EchoRequest, EchoResponse, ExpandRequest, PagedExpandRequest,
    PagedExpandResponse, WaitMetadata, WaitRequest, WaitResponse,
};
use crate::stub::{EchoStub, GrpcEchoStub, HttpJsonEchoStub};

/// This service is used showcase the four main types of rpcs - unary, server side streaming, client
/// side streaming, and bidirectional streaming. This service also exposes methods that explicitly
/// implement server delay, and paginated calls.
///
/// Cloning a client is cheap: clones share the stub and the clock. Calls block the current thread
/// until they complete.
#[derive(Debug, Clone)]
pub struct EchoClient {
    stub: Arc<dyn EchoStub>,
    settings: EchoSettings,
    clock: Arc<dyn Clock>,
}

impl EchoClient {
    /// A client over `stub` with the default settings.
    pub fn new(stub: Arc<dyn EchoStub>) -> Self {
        Self::with_settings(stub, EchoSettings::default())
    }

    pub fn with_settings(stub: Arc<dyn EchoStub>, settings: EchoSettings) -> Self {
        Self {
            stub,
            settings,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock retries and polling wait on.
    pub fn with_clock(self, clock: Arc<dyn Clock>) -> Self {
        Self { clock, ..self }
    }

    /// A client calling the service over gRPC.
    pub fn grpc(channel: Arc<dyn GrpcChannel>) -> Self {
        Self::new(Arc::new(GrpcEchoStub::new(channel)))
    }

    /// A client calling the service over HTTP/JSON.
    pub fn http_json(channel: Arc<dyn HttpChannel>) -> Self {
        Self::new(Arc::new(HttpJsonEchoStub::new(channel)))
    }

    pub fn settings(&self) -> &EchoSettings {
        &self.settings
    }

    /// This method simply echoes the request. This method showcases unary RPCs.
    pub fn echo(&self, request: EchoRequest) -> Result<EchoResponse> {
        self.echo_with_options(request, CallOptions::default())
    }

    /// [`Self::echo`] with per-call overrides of the settings.
    pub fn echo_with_options(
        &self,
        request: EchoRequest,
        options: CallOptions,
    ) -> Result<EchoResponse> {
        let settings = self.settings.echo.merge(&options);
        invoke(
            &settings,
            self.clock.as_ref(),
            |timeout| self.stub.echo(&request, timeout),
        )
    }

    /// This method splits the given content into words and will pass each word
    /// back through the stream. This method showcases server-side streaming RPCs.
    pub fn expand(&self, request: ExpandRequest) -> Result<ServerStream<EchoResponse>> {
        self.expand_with_options(request, CallOptions::default())
    }

    /// [`Self::expand`] with per-call overrides of the settings.
    pub fn expand_with_options(
        &self,
        request: ExpandRequest,
        options: CallOptions,
    ) -> Result<ServerStream<EchoResponse>> {
        let settings = self.settings.expand.merge(&options);
        invoke(
            &settings,
            self.clock.as_ref(),
            |timeout| self.stub.expand(&request, timeout),
        )
    }

    /// This method splits the given content into words and will pass each word back through the
    /// stream. This method showcases server-side streaming RPCs.
    pub fn expand_by_content_and_error(
        &self,
        content: impl Into<String>,
        error: Status,
    ) -> Result<ServerStream<EchoResponse>> {
        let request = ExpandRequest {
            content: content.into(),
            error: Some(error),
            ..Default::default()
        };
        self.expand(request)
    }

    /// This method will collect the words given to it. When the stream is closed
    /// by the client, this method will return the a concatenation of the strings
    /// passed to it. This method showcases client-side streaming RPCs.
    pub fn collect(&self, requests: RequestStream<EchoRequest>) -> Result<EchoResponse> {
        self.collect_with_options(requests, CallOptions::default())
    }

    /// [`Self::collect`] with per-call overrides of the settings.
    pub fn collect_with_options(
        &self,
        requests: RequestStream<EchoRequest>,
        options: CallOptions,
    ) -> Result<EchoResponse> {
        let settings = self.settings.collect.merge(&options);
        self.stub.collect(requests, settings.total_timeout)
    }

    /// This method, upon receiving a request on the stream, will pass the same
    /// content back on the stream. This method showcases bidirectional
    /// streaming RPCs.
    pub fn chat(&self, requests: RequestStream<EchoRequest>) -> Result<ServerStream<EchoResponse>> {
        self.chat_with_options(requests, CallOptions::default())
    }

    /// [`Self::chat`] with per-call overrides of the settings.
    pub fn chat_with_options(
        &self,
        requests: RequestStream<EchoRequest>,
        options: CallOptions,
    ) -> Result<ServerStream<EchoResponse>> {
        let settings = self.settings.chat.merge(&options);
        self.stub.chat(requests, settings.total_timeout)
    }

    /// This is similar to the Expand method but instead of returning a stream of
    /// expanded words, this method returns a paged list of expanded words.
    pub fn paged_expand(
        &self,
        request: PagedExpandRequest,
    ) -> PagedResponse<PagedExpandDescriptor> {
        self.paged_expand_with_options(request, CallOptions::default())
    }

    /// [`Self::paged_expand`] with per-call overrides of the settings.
    pub fn paged_expand_with_options(
        &self,
        request: PagedExpandRequest,
        options: CallOptions,
    ) -> PagedResponse<PagedExpandDescriptor> {
        let settings = self.settings.paged_expand.merge(&options);
        let stub = Arc::clone(&self.stub);
        let clock = Arc::clone(&self.clock);
        PagedResponse::<PagedExpandDescriptor>::new(request, move |request| {
            invoke(
                &settings,
                clock.as_ref(),
                |timeout| stub.paged_expand(&request, timeout),
            )
        })
    }

    /// This method will wait for the requested amount of time and then return.
    /// This method showcases how a client handles a request timeout.
    pub fn wait(
        &self,
        request: WaitRequest,
    ) -> Result<OperationFuture<WaitResponse, WaitMetadata>> {
        self.wait_with_options(request, CallOptions::default())
    }

    /// [`Self::wait`] with per-call overrides of the settings.
    pub fn wait_with_options(
        &self,
        request: WaitRequest,
        options: CallOptions,
    ) -> Result<OperationFuture<WaitResponse, WaitMetadata>> {
        let settings = self.settings.wait.merge(&options);
        let operation = invoke(
            &settings.initial,
            self.clock.as_ref(),
            |timeout| self.stub.wait(&request, timeout),
        )?;
        Ok(OperationFuture::new(
            operation,
            Arc::clone(&self.stub),
            settings.polling,
            Arc::clone(&self.clock),
        ))
    }

    /// This method will block (wait) for the requested amount of time
    /// and then return the response or error.
    /// This method showcases how a client handles delays or retries.
    pub fn block(&self, request: BlockRequest) -> Result<BlockResponse> {
        self.block_with_options(request, CallOptions::default())
    }

    /// [`Self::block`] with per-call overrides of the settings.
    pub fn block_with_options(
        &self,
        request: BlockRequest,
        options: CallOptions,
    ) -> Result<BlockResponse> {
        let settings = self.settings.block.merge(&options);
        invoke(
            &settings,
            self.clock.as_ref(),
            |timeout| self.stub.block(&request, timeout),
        )
    }
}

/// Pages of [`EchoClient::paged_expand`].
#[derive(Debug)]
pub struct PagedExpandDescriptor;

impl PageDescriptor for PagedExpandDescriptor {
    type Request = PagedExpandRequest;
    type Response = PagedExpandResponse;
    type Item = EchoResponse;

    fn set_page_token(request: &mut PagedExpandRequest, token: String) {
        request.page_token = token;
    }

    fn next_page_token(response: &PagedExpandResponse) -> &str {
        &response.next_page_token
    }

    fn items(response: PagedExpandResponse) -> Vec<EchoResponse> {
        response.responses
    }
}
