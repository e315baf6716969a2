//! Composers turn the semantic model into compilation units.
//!
//! Each composer owns one kind of artifact and is a pure function of the
//! context. Per-method client code is delegated to the [`shape`] composer
//! registered for the method's call shape.

mod client;
mod grpc_stub;
mod http_stub;
mod lib_rs;
mod method;
mod resources;
mod samples;
mod settings;
pub(crate) mod shape;
mod stub;

use gapic_codegen::{CompositionError, ast::CompilationUnit};
use gapic_core::Transport;
use gapic_model::GapicContext;

pub(crate) use method::MethodContext;

/// Switches that decide which units are composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposerOptions {
    pub transport: Transport,
    pub samples: bool,
}

impl ComposerOptions {
    pub fn from_context(ctx: &GapicContext) -> Self {
        let options = ctx.options();
        Self {
            transport: options.transport,
            samples: options.samples,
        }
    }
}

/// Produces the compilation units of one artifact kind.
pub trait Composer: Send + Sync {
    fn name(&self) -> &'static str;

    fn compose(
        &self,
        ctx: &GapicContext,
        options: &ComposerOptions,
    ) -> Result<Vec<CompilationUnit>, CompositionError>;
}

/// Every composer, in output order.
pub fn composers() -> Vec<Box<dyn Composer>> {
    vec![
        Box::new(lib_rs::LibComposer),
        Box::new(resources::ResourceNameComposer),
        Box::new(settings::SettingsComposer),
        Box::new(stub::StubComposer),
        Box::new(grpc_stub::GrpcStubComposer),
        Box::new(http_stub::HttpStubComposer),
        Box::new(client::ClientComposer),
        Box::new(samples::SampleComposer),
    ]
}

/// The first paragraph of a doc comment, joined onto one line.
pub(crate) fn summary(doc: Option<&str>) -> Option<String> {
    let paragraph: Vec<&str> = doc?
        .lines()
        .map(str::trim)
        .skip_while(|line| line.is_empty())
        .take_while(|line| !line.is_empty())
        .collect();
    (!paragraph.is_empty()).then(|| paragraph.join(" "))
}
