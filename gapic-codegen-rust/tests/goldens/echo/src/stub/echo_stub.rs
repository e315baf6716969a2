// This file is @generated by gapic. Do not edit.

use std::fmt::Debug;
use std::time::Duration;

use gapic_gax::{RequestStream, Result, ServerStream};
use gapic_gax::longrunning::Operation;
use gapic_gax::lro::Operations;

use crate::model::{
    BlockRequest, BlockResponse, EchoRequest, EchoResponse, ExpandRequest, PagedExpandRequest,
    PagedExpandResponse, WaitRequest,
};

/// The calls of [`EchoClient`](crate::echo_client::EchoClient) as a transport sees them.
///
/// Each call is a single attempt bounded by `timeout`; retries and pagination live in the client.
pub trait EchoStub: Send + Sync + Debug + Operations {
    /// This method simply echoes the request. This method showcases unary RPCs.
    fn echo(&self, request: &EchoRequest, timeout: Duration) -> Result<EchoResponse>;

    /// This method splits the given content into words and will pass each word back through the
    /// stream. This method showcases server-side streaming RPCs.
    fn expand(
        &self,
        request: &ExpandRequest,
        timeout: Duration,
    ) -> Result<ServerStream<EchoResponse>>;

    /// This method will collect the words given to it. When the stream is closed by the client,
    /// this method will return the a concatenation of the strings passed to it. This method
    /// showcases client-side streaming RPCs.
    fn collect(
        &self,
        requests: RequestStream<EchoRequest>,
        timeout: Duration,
    ) -> Result<EchoResponse>;

    /// This method, upon receiving a request on the stream, will pass the same content back on the
    /// stream. This method showcases bidirectional streaming RPCs.
    fn chat(
        &self,
        requests: RequestStream<EchoRequest>,
        timeout: Duration,
    ) -> Result<ServerStream<EchoResponse>>;

    /// This is similar to the Expand method but instead of returning a stream of expanded words,
    /// this method returns a paged list of expanded words.
    fn paged_expand(
        &self,
        request: &PagedExpandRequest,
        timeout: Duration,
    ) -> Result<PagedExpandResponse>;

    /// This method will wait for the requested amount of time and then return. This method
    /// showcases how a client handles a request timeout.
    fn wait(&self, request: &WaitRequest, timeout: Duration) -> Result<Operation>;

    /// This method will block (wait) for the requested amount of time and then return the response
    /// or error. This method showcases how a client handles delays or retries.
    fn block(&self, request: &BlockRequest, timeout: Duration) -> Result<BlockResponse>;
}
