//! The aggregate root every composer reads.

use gapic_core::Transport;
use indexmap::IndexMap;
use serde::Serialize;

use crate::{Message, ResourceName, Service};

/// Identity of the generated API surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiInfo {
    /// Proto package of the services, `google.showcase.v1beta1`.
    pub package: String,
    /// Name of the generated crate, `google-showcase-v1beta1`.
    pub crate_name: String,
}

impl ApiInfo {
    /// The crate name as a Rust path segment.
    pub fn crate_ident(&self) -> String {
        self.crate_name.replace('-', "_")
    }
}

/// Switches that change what gets generated, not how the API behaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratorOptions {
    pub transport: Transport,
    pub samples: bool,
    pub copyright: Option<String>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            transport: Transport::GrpcRest,
            samples: true,
            copyright: None,
        }
    }
}

/// Everything known about one API surface.
///
/// Built once per run and read-only afterwards: there are no setters, and
/// composers only ever receive `&GapicContext`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapicContext {
    api: ApiInfo,
    services: Vec<Service>,
    messages: IndexMap<String, Message>,
    resource_names: IndexMap<String, ResourceName>,
    options: GeneratorOptions,
}

impl GapicContext {
    pub fn new(
        api: ApiInfo,
        services: Vec<Service>,
        messages: IndexMap<String, Message>,
        resource_names: IndexMap<String, ResourceName>,
        options: GeneratorOptions,
    ) -> Self {
        Self {
            api,
            services,
            messages,
            resource_names,
            options,
        }
    }

    pub fn api(&self) -> &ApiInfo {
        &self.api
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn service(&self, name: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.name == name)
    }

    pub fn messages(&self) -> &IndexMap<String, Message> {
        &self.messages
    }

    pub fn message(&self, full_name: &str) -> Option<&Message> {
        self.messages.get(full_name)
    }

    /// Resource names keyed by resource type, in declaration order.
    pub fn resource_names(&self) -> &IndexMap<String, ResourceName> {
        &self.resource_names
    }

    pub fn resource_name(&self, resource_type: &str) -> Option<&ResourceName> {
        self.resource_names.get(resource_type)
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn transport(&self) -> Transport {
        self.options.transport
    }
}
