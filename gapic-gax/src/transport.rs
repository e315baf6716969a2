//! The channels generated stubs send requests through.

use std::{fmt, time::Duration};

use crate::{RequestStream, Result, ServerStream, Status};

/// A gRPC connection. Messages cross it already encoded.
///
/// `path` is the full method path: `/google.showcase.v1beta1.Echo/Echo`.
pub trait GrpcChannel: Send + Sync + fmt::Debug {
    fn unary(&self, path: &str, request: Vec<u8>, timeout: Duration) -> Result<Vec<u8>>;

    fn server_streaming(
        &self,
        path: &str,
        request: Vec<u8>,
        timeout: Duration,
    ) -> Result<ServerStream<Vec<u8>>>;

    fn client_streaming(
        &self,
        path: &str,
        requests: RequestStream<Vec<u8>>,
        timeout: Duration,
    ) -> Result<Vec<u8>>;

    fn bidi_streaming(
        &self,
        path: &str,
        requests: RequestStream<Vec<u8>>,
        timeout: Duration,
    ) -> Result<ServerStream<Vec<u8>>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// One HTTP/JSON request. `path` is relative to the endpoint and already encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP/JSON connection.
pub trait HttpChannel: Send + Sync + fmt::Debug {
    /// Send `request` and return the response body.
    fn execute(&self, request: HttpRequest, timeout: Duration) -> Result<String>;

    /// Send `request` and return each JSON message of the streamed response body.
    fn execute_streaming(
        &self,
        request: HttpRequest,
        timeout: Duration,
    ) -> Result<ServerStream<String>>;
}

pub fn encode<M: prost::Message>(message: &M) -> Vec<u8> {
    message.encode_to_vec()
}

pub fn decode<M: prost::Message + Default>(bytes: &[u8]) -> Result<M> {
    M::decode(bytes).map_err(|err| Status::internal(format!("failed to decode response: {err}")))
}

pub fn encode_stream<M: prost::Message + 'static>(
    requests: RequestStream<M>,
) -> RequestStream<Vec<u8>> {
    Box::new(requests.map(|request| request.encode_to_vec()))
}

pub fn decode_stream<M: prost::Message + Default + 'static>(
    responses: ServerStream<Vec<u8>>,
) -> ServerStream<M> {
    responses.try_map(|bytes| decode(&bytes))
}
