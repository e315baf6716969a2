//! Runtime behavior against an in-memory echo server, driven the way generated
//! clients drive it.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use gapic_gax::{
    CallSettings, Code, GrpcChannel, ManualClock, PageDescriptor, PagedResponse, PollingSettings,
    RequestStream, Result, ServerStream, Status, invoke,
    longrunning::{CancelOperationRequest, GetOperationRequest, Operation, operation},
    http::from_json,
    lro::{OperationError, OperationFuture, Operations},
    protobuf::{Any, Timestamp},
    transport::{decode, decode_stream, encode, encode_stream},
};
use prost::Name;
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, prost::Message)]
struct ExpandRequest {
    #[prost(string, tag = "1")]
    content: String,
}

#[derive(Clone, PartialEq, prost::Message)]
struct EchoResponse {
    #[prost(string, tag = "1")]
    content: String,
}

#[derive(Clone, PartialEq, prost::Message)]
struct PagedExpandRequest {
    #[prost(string, tag = "1")]
    content: String,
    #[prost(int32, tag = "2")]
    page_size: i32,
    #[prost(string, tag = "3")]
    page_token: String,
}

#[derive(Clone, PartialEq, prost::Message)]
struct PagedExpandResponse {
    #[prost(message, repeated, tag = "1")]
    responses: Vec<EchoResponse>,
    #[prost(string, tag = "2")]
    next_page_token: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
struct WaitResponse {
    #[prost(string, tag = "1")]
    content: String,
}

impl Name for WaitResponse {
    const NAME: &'static str = "WaitResponse";
    const PACKAGE: &'static str = "google.showcase.v1beta1";
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct WaitMetadata {
    #[prost(message, optional, tag = "1")]
    end_time: Option<Timestamp>,
}

impl Name for WaitMetadata {
    const NAME: &'static str = "WaitMetadata";
    const PACKAGE: &'static str = "google.showcase.v1beta1";
}

const PAGED_EXPAND: &str = "/google.showcase.v1beta1.Echo/PagedExpand";
const EXPAND: &str = "/google.showcase.v1beta1.Echo/Expand";
const COLLECT: &str = "/google.showcase.v1beta1.Echo/Collect";

/// Echo server semantics over the gRPC channel interface.
#[derive(Debug, Default)]
struct FakeEcho {
    calls: Mutex<Vec<String>>,
}

impl FakeEcho {
    fn paged_expand(request: PagedExpandRequest) -> Result<PagedExpandResponse> {
        let words: Vec<&str> = request.content.split(' ').collect();
        let start: usize = match request.page_token.as_str() {
            "" => 0,
            token => token
                .parse()
                .map_err(|_| Status::invalid_argument("invalid page token"))?,
        };
        let end = (start + request.page_size.max(1) as usize).min(words.len());
        Ok(PagedExpandResponse {
            responses: words[start..end]
                .iter()
                .map(|word| EchoResponse {
                    content: word.to_string(),
                })
                .collect(),
            next_page_token: if end < words.len() {
                end.to_string()
            } else {
                String::new()
            },
        })
    }
}

impl GrpcChannel for FakeEcho {
    fn unary(&self, path: &str, request: Vec<u8>, _: Duration) -> Result<Vec<u8>> {
        self.calls.lock().unwrap().push(path.to_string());
        match path {
            PAGED_EXPAND => Ok(encode(&Self::paged_expand(decode(&request)?)?)),
            _ => Err(Status::unimplemented(path)),
        }
    }

    fn server_streaming(
        &self,
        path: &str,
        request: Vec<u8>,
        _: Duration,
    ) -> Result<ServerStream<Vec<u8>>> {
        self.calls.lock().unwrap().push(path.to_string());
        let request: ExpandRequest = decode(&request)?;
        let words: Vec<Vec<u8>> = request
            .content
            .split(' ')
            .map(|word| {
                encode(&EchoResponse {
                    content: word.to_string(),
                })
            })
            .collect();
        Ok(ServerStream::new(words.into_iter().map(Ok)))
    }

    fn client_streaming(
        &self,
        path: &str,
        requests: RequestStream<Vec<u8>>,
        _: Duration,
    ) -> Result<Vec<u8>> {
        self.calls.lock().unwrap().push(path.to_string());
        let words = requests
            .map(|bytes| decode::<ExpandRequest>(&bytes).map(|request| request.content))
            .collect::<Result<Vec<_>>>()?;
        Ok(encode(&EchoResponse {
            content: words.join(" "),
        }))
    }

    fn bidi_streaming(
        &self,
        path: &str,
        _: RequestStream<Vec<u8>>,
        _: Duration,
    ) -> Result<ServerStream<Vec<u8>>> {
        Err(Status::unimplemented(path))
    }
}

struct PagedExpandDescriptor;

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

fn paged_expand(
    channel: Arc<FakeEcho>,
    request: PagedExpandRequest,
) -> PagedResponse<PagedExpandDescriptor> {
    let clock = Arc::new(ManualClock::new());
    PagedResponse::new(request, move |request: PagedExpandRequest| {
        invoke(&CallSettings::default(), clock.as_ref(), |timeout| {
            decode(&channel.unary(PAGED_EXPAND, encode(&request), timeout)?)
        })
    })
}

#[test]
fn test_paged_expand_pages_and_values() {
    let channel = Arc::new(FakeEcho::default());
    let content = "A series of words that will be sent back one by one";
    let request = PagedExpandRequest {
        content: content.to_string(),
        page_size: 2,
        page_token: "1".to_string(),
    };

    let pages: Vec<PagedExpandResponse> = paged_expand(channel.clone(), request)
        .pages()
        .collect::<Result<_>>()
        .unwrap();

    // 11 words after the first one, two per page
    assert_eq!(pages.len(), 6);
    assert!(pages.iter().all(|page| page.responses.len() <= 2));
    let words: Vec<String> = pages
        .into_iter()
        .flat_map(|page| page.responses)
        .map(|response| response.content)
        .collect();
    assert_eq!(words.join(" "), "series of words that will be sent back one by one");
    assert_eq!(channel.calls.lock().unwrap().len(), 6);
}

#[test]
fn test_paged_expand_eight_remaining_values() {
    let channel = Arc::new(FakeEcho::default());
    let request = PagedExpandRequest {
        content: "skip one two three four five six seven eight".to_string(),
        page_size: 2,
        page_token: "1".to_string(),
    };

    let pages = paged_expand(channel.clone(), request.clone()).pages().count();
    let values: Vec<String> = paged_expand(channel, request)
        .map(|response| response.unwrap().content)
        .collect();

    assert_eq!(pages, 4);
    assert_eq!(values.len(), 8);
    assert_eq!(values.join(" "), "one two three four five six seven eight");
}

#[test]
fn test_paged_expand_is_lazy() {
    let channel = Arc::new(FakeEcho::default());
    let request = PagedExpandRequest {
        content: "a b c d e f".to_string(),
        page_size: 2,
        page_token: String::new(),
    };

    let mut values = paged_expand(channel.clone(), request);
    assert!(channel.calls.lock().unwrap().is_empty());

    values.next();
    values.next();
    assert_eq!(channel.calls.lock().unwrap().len(), 1);
    values.next();
    assert_eq!(channel.calls.lock().unwrap().len(), 2);
}

#[test]
fn test_expand_streams_every_word() {
    let channel = FakeEcho::default();
    let content = "Testing the entire response is the same";
    let request = ExpandRequest {
        content: content.to_string(),
    };

    let stream: ServerStream<EchoResponse> = decode_stream(
        channel
            .server_streaming(EXPAND, encode(&request), Duration::from_secs(5))
            .unwrap(),
    );
    let responses: Vec<String> = stream.map(|response| response.unwrap().content).collect();

    assert_eq!(responses.len(), 7);
    assert_eq!(responses.join(" "), content);
}

#[test]
fn test_collect_joins_streamed_requests() {
    let channel = FakeEcho::default();
    let requests: RequestStream<ExpandRequest> = Box::new(
        ["The", "rain", "in", "Spain"]
            .into_iter()
            .map(|word| ExpandRequest {
                content: word.to_string(),
            }),
    );

    let response: EchoResponse = decode(
        &channel
            .client_streaming(COLLECT, encode_stream(requests), Duration::from_secs(5))
            .unwrap(),
    )
    .unwrap();

    assert_eq!(response.content, "The rain in Spain");
}

#[test]
fn test_retry_stops_on_non_retryable_status() {
    let channel = FakeEcho::default();
    let clock = ManualClock::new();
    let settings = CallSettings {
        retryable_codes: vec![Code::Unavailable],
        ..CallSettings::default()
    };

    let result: Result<EchoResponse> = invoke(&settings, &clock, |timeout| {
        decode(&channel.unary("/google.showcase.v1beta1.Echo/Block", Vec::new(), timeout)?)
    });

    assert_eq!(result.unwrap_err().code, Code::Unimplemented);
    assert_eq!(channel.calls.lock().unwrap().len(), 1);
}

/// An operation server whose `Wait` finishes at a fixed point on the clock.
#[derive(Debug)]
struct FakeWait {
    clock: Arc<ManualClock>,
    end_time: Duration,
    cancelled: Mutex<bool>,
}

impl Operations for FakeWait {
    fn get_operation(&self, request: &GetOperationRequest, _: Duration) -> Result<Operation> {
        let done = self.clock.elapsed() >= self.end_time;
        let response = WaitResponse {
            content: "content".to_string(),
        };
        Ok(Operation {
            name: request.name.clone(),
            metadata: None,
            done,
            result: done.then(|| {
operation::Result::Response(Any::pack(&response))
            }),
        })
    }

    fn cancel_operation(&self, _: &CancelOperationRequest, _: Duration) -> Result<()> {
        *self.cancelled.lock().unwrap() = true;
        Ok(())
    }
}

fn wait_server(end_time: Duration) -> (Arc<FakeWait>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let server = Arc::new(FakeWait {
        clock: clock.clone(),
        end_time,
        cancelled: Mutex::new(false),
    });
    (server, clock)
}

#[test]
fn test_wait_succeeds_within_default_polling() {
    let polling = PollingSettings::default();
    let (server, clock) = wait_server(Duration::from_secs(10));
    let operation = Operation {
        name: "operations/wait".to_string(),
        ..Operation::default()
    };

    let future: OperationFuture<WaitResponse, WaitMetadata> =
        OperationFuture::new(operation, server.clone(), polling, clock);

    assert_eq!(future.wait().unwrap().content, "content");
    assert!(!*server.cancelled.lock().unwrap());
}

#[test]
fn test_wait_total_timeout_cancels() {
    let polling = PollingSettings {
        initial_poll_delay: Duration::from_millis(1000),
        poll_delay_multiplier: 1.5,
        max_poll_delay: Duration::from_millis(45000),
        initial_rpc_timeout: Duration::from_millis(5000),
        rpc_timeout_multiplier: 1.0,
        max_rpc_timeout: Duration::from_millis(5000),
        total_poll_timeout: Duration::from_millis(5000),
    };
    let (server, clock) = wait_server(Duration::from_millis(10000));
    let operation = Operation {
        name: "operations/wait".to_string(),
        ..Operation::default()
    };

    let future: OperationFuture<WaitResponse, WaitMetadata> =
        OperationFuture::new(operation, server.clone(), polling, clock.clone());
    let result = future.wait();

    assert!(matches!(result, Err(OperationError::Cancelled { .. })), "{result:?}");
    assert!(*server.cancelled.lock().unwrap());
    assert!(clock.elapsed() <= Duration::from_millis(5000));
}

/// The same `Wait` operation served as HTTP/JSON bodies.
#[derive(Debug)]
struct JsonWait {
    bodies: Mutex<Vec<&'static str>>,
}

impl Operations for JsonWait {
    fn get_operation(&self, _: &GetOperationRequest, _: Duration) -> Result<Operation> {
        let body = self.bodies.lock().unwrap().remove(0);
        from_json(body)
    }

    fn cancel_operation(&self, _: &CancelOperationRequest, _: Duration) -> Result<()> {
        Ok(())
    }
}

#[test]
fn test_wait_over_http_json() {
    let clock = Arc::new(ManualClock::new());
    let server = JsonWait {
        bodies: Mutex::new(vec![
            r#"{"name":"operations/wait","done":false,"metadata":{
                "@type":"type.googleapis.com/google.showcase.v1beta1.WaitMetadata",
                "endTime":"2024-05-01T12:30:00Z"}}"#,
            r#"{"name":"operations/wait","done":true,"response":{
                "@type":"type.googleapis.com/google.showcase.v1beta1.WaitResponse",
                "content":"content"}}"#,
        ]),
    };
    let operation = Operation {
        name: "operations/wait".to_string(),
        ..Operation::default()
    };
    let mut future: OperationFuture<WaitResponse, WaitMetadata> =
        OperationFuture::new(operation, server, PollingSettings::default(), clock);

    future.poll().unwrap();
    future.poll().unwrap();
    let metadata = future.metadata().unwrap().unwrap();
    assert_eq!(metadata.end_time.unwrap().seconds, 1_714_566_600);

    assert_eq!(future.wait().unwrap().content, "content");
}

#[test]
fn test_wait_over_http_json_rejects_other_response_types() {
    let clock = Arc::new(ManualClock::new());
    let server = JsonWait {
        bodies: Mutex::new(vec![
            r#"{"name":"operations/wait","done":true,"response":{
                "@type":"type.googleapis.com/google.showcase.v1beta1.EchoResponse",
                "content":"content"}}"#,
        ]),
    };
    let operation = Operation {
        name: "operations/wait".to_string(),
        ..Operation::default()
    };
    let future: OperationFuture<WaitResponse, WaitMetadata> =
        OperationFuture::new(operation, server, PollingSettings::default(), clock);

    let err = future.wait().unwrap_err();

    assert!(err.to_string().contains("google.showcase.v1beta1.EchoResponse"), "{err}");
}
