//! Semantic model types for the gapic generator.
//!
//! This crate holds the language-neutral description of an API surface that
//! every composer reads: services, methods with their resolved call shape,
//! pagination, operation and retry metadata, HTTP bindings and resource
//! names.
//!
//! # Architecture
//!
//! ```text
//! .proto → gapic-descriptor (loading) → gapic-model (GapicContext) → composers → writer
//! ```
//!
//! The types are plain data: language-agnostic, immutable once built, and
//! `Serialize` so pipeline snapshots can dump them.

mod context;
mod http;
mod message;
mod resource;
mod retry;
mod serde_helpers;
mod service;
mod shape;
mod template;

pub use context::{ApiInfo, GapicContext, GeneratorOptions};
pub use http::{BodyBinding, HttpBinding, HttpMethod, PathParam, QueryParam};
pub use message::{Cardinality, Field, FieldType, Message, ResourceReference};
pub use resource::ResourceName;
pub use retry::{DEFAULT_TIMEOUT, RetrySettings};
pub use service::{Method, MethodSignature, Service, SignatureArg};
pub use shape::{CallShape, OperationInfo, PaginationInfo, PollingSettings};
pub use template::{PathTemplate, Segment, TemplateError, Variable};
