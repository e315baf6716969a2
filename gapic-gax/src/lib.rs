//! Runtime support for client libraries generated by gapic.
//!
//! Generated clients are thin: each method builds its request, applies its
//! [`CallSettings`] through [`invoke`], and hands the result to one of the
//! call-shape types defined here.
//!
//! | Call shape | Returned type |
//! |---|---|
//! | unary | the response message |
//! | paged | [`PagedResponse`] over a [`PageDescriptor`] |
//! | server streaming | [`ServerStream`] |
//! | client / bidi streaming | takes a [`RequestStream`] |
//! | long-running | [`lro::OperationFuture`] |
//!
//! Stubs talk to a [`GrpcChannel`] or an [`HttpChannel`]; bringing an actual
//! network stack is up to the application. All waiting goes through a
//! [`Clock`], so tests can drive retries and polling with [`ManualClock`].

mod call;
mod clock;
pub mod http;
pub mod longrunning;
pub mod lro;
mod paging;
pub mod protobuf;
mod resource;
mod retry;
pub mod rpc;
mod status;
mod streaming;
pub mod transport;

pub use call::{CallOptions, CallSettings, DEFAULT_TIMEOUT, OperationCallSettings, PollingSettings};
pub use clock::{Clock, ManualClock, SystemClock};
pub use paging::{PageDescriptor, PagedResponse, Pages};
pub use resource::ResourceNameError;
pub use retry::invoke;
pub use status::{Code, Result, Status};
pub use streaming::{RequestStream, ServerStream, StreamCanceller};
pub use transport::{GrpcChannel, HttpChannel, HttpMethod, HttpRequest};
