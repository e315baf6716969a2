//! Descriptor loading for the gapic generator.
//!
//! Compiles `.proto` sources (plus built-in copies of the API annotation
//! files) or decodes a prebuilt descriptor set, interprets the API
//! annotations, and reads the two side inputs: the gRPC service config and
//! `gapic.toml`.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod annotations;
mod builtin;
mod config;
mod descriptor;
mod error;
mod loader;
mod service_config;

pub use config::{GeneratorConfig, GeneratorSection, PollingOverride, ResourceConfig};
pub use descriptor::*;
pub use error::{DescriptorError, Result, SourceContext};
pub use loader::Loader;
pub use service_config::{MethodConfig, MethodName, RetryPolicy, ServiceConfig, parse_duration};
