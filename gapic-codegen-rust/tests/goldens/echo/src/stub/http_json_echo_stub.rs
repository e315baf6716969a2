// This file is @generated by gapic. Do not edit.

use std::sync::Arc;
use std::time::Duration;

use gapic_gax::{HttpChannel, HttpMethod, HttpRequest, RequestStream, Result, ServerStream, Status};
use gapic_gax::http::{from_json, from_json_stream, path_param, to_json};
use gapic_gax::longrunning::{CancelOperationRequest, GetOperationRequest, Operation};
use gapic_gax::lro::Operations;

use crate::model::{
    BlockRequest, BlockResponse, EchoRequest, EchoResponse, ExpandRequest, PagedExpandRequest,
    PagedExpandResponse, WaitRequest,
};
use crate::stub::EchoStub;

/// Calls `google.showcase.v1beta1.Echo` over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpJsonEchoStub {
    channel: Arc<dyn HttpChannel>,
}

impl HttpJsonEchoStub {
    pub fn new(channel: Arc<dyn HttpChannel>) -> Self {
        Self { channel }
    }
}

impl EchoStub for HttpJsonEchoStub {
    fn echo(&self, request: &EchoRequest, timeout: Duration) -> Result<EchoResponse> {
        let http_request = HttpRequest {
            method: HttpMethod::Post,
            path: "/v1beta1/echo:echo".to_string(),
            query: Vec::new(),
            body: Some(to_json(request)?),
        };
        let response = self.channel.execute(http_request, timeout)?;
        from_json(&response)
    }

    fn expand(
        &self,
        request: &ExpandRequest,
        timeout: Duration,
    ) -> Result<ServerStream<EchoResponse>> {
        let http_request = HttpRequest {
            method: HttpMethod::Post,
            path: "/v1beta1/echo:expand".to_string(),
            query: Vec::new(),
            body: Some(to_json(request)?),
        };
        let stream = self.channel.execute_streaming(http_request, timeout)?;
        Ok(from_json_stream(stream))
    }

    fn collect(
        &self,
        _requests: RequestStream<EchoRequest>,
        _timeout: Duration,
    ) -> Result<EchoResponse> {
        Err(Status::unimplemented("Collect is not supported over HTTP/JSON"))
    }

    fn chat(
        &self,
        _requests: RequestStream<EchoRequest>,
        _timeout: Duration,
    ) -> Result<ServerStream<EchoResponse>> {
        Err(Status::unimplemented("Chat is not supported over HTTP/JSON"))
    }

    fn paged_expand(
        &self,
        request: &PagedExpandRequest,
        timeout: Duration,
    ) -> Result<PagedExpandResponse> {
        let http_request = HttpRequest {
            method: HttpMethod::Post,
            path: "/v1beta1/echo:pagedExpand".to_string(),
            query: Vec::new(),
            body: Some(to_json(request)?),
        };
        let response = self.channel.execute(http_request, timeout)?;
        from_json(&response)
    }

    fn wait(&self, request: &WaitRequest, timeout: Duration) -> Result<Operation> {
        let http_request = HttpRequest {
            method: HttpMethod::Post,
            path: "/v1beta1/echo:wait".to_string(),
            query: Vec::new(),
            body: Some(to_json(request)?),
        };
        let response = self.channel.execute(http_request, timeout)?;
        from_json(&response)
    }

    fn block(&self, request: &BlockRequest, timeout: Duration) -> Result<BlockResponse> {
        let http_request = HttpRequest {
            method: HttpMethod::Post,
            path: "/v1beta1/echo:block".to_string(),
            query: Vec::new(),
            body: Some(to_json(request)?),
        };
        let response = self.channel.execute(http_request, timeout)?;
        from_json(&response)
    }
}

impl Operations for HttpJsonEchoStub {
    fn get_operation(&self, request: &GetOperationRequest, timeout: Duration) -> Result<Operation> {
        let name = path_param("name", &request.name, "operations/**")?;
        let http_request = HttpRequest {
            method: HttpMethod::Get,
            path: format!("/v1beta1/{name}"),
            query: Vec::new(),
            body: None,
        };
        let response = self.channel.execute(http_request, timeout)?;
        from_json(&response)
    }

    fn cancel_operation(&self, request: &CancelOperationRequest, timeout: Duration) -> Result<()> {
        let name = path_param("name", &request.name, "operations/**")?;
        let http_request = HttpRequest {
            method: HttpMethod::Post,
            path: format!("/v1beta1/{name}:cancel"),
            query: Vec::new(),
            body: None,
        };
        self.channel.execute(http_request, timeout)?;
        Ok(())
    }
}
