//! Names of the generated items for one service.

use gapic_codegen::{ast::Symbol, language::RUST_NAMING};
use gapic_model::{Method, Service};

/// Type and module names derived from a service name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceNames {
    /// The proto service name, `Echo`.
    pub service: String,
    pub client: String,
    pub settings: String,
    pub stub: String,
    pub grpc_stub: String,
    pub http_stub: String,
    pub client_module: String,
    pub settings_module: String,
    pub stub_module: String,
    pub grpc_stub_module: String,
    pub http_stub_module: String,
}

impl ServiceNames {
    pub fn new(service: &Service) -> Self {
        let ty = RUST_NAMING.type_name(&service.name);
        let module = RUST_NAMING.file_name(&service.name);
        Self {
            service: service.name.clone(),
            client: format!("{ty}Client"),
            settings: format!("{ty}Settings"),
            stub: format!("{ty}Stub"),
            grpc_stub: format!("Grpc{ty}Stub"),
            http_stub: format!("HttpJson{ty}Stub"),
            client_module: format!("{module}_client"),
            settings_module: format!("{module}_settings"),
            stub_module: format!("{module}_stub"),
            grpc_stub_module: format!("grpc_{module}_stub"),
            http_stub_module: format!("http_json_{module}_stub"),
        }
    }

    pub fn client_symbol(&self) -> Symbol {
        Symbol::new(["crate", self.client_module.as_str()], self.client.as_str())
    }

    pub fn settings_symbol(&self) -> Symbol {
        Symbol::new(["crate", self.settings_module.as_str()], self.settings.as_str())
    }

    /// Stubs are referenced through the `crate::stub` re-exports.
    pub fn stub_symbol(&self) -> Symbol {
        Symbol::new(["crate", "stub"], self.stub.as_str())
    }

    pub fn grpc_stub_symbol(&self) -> Symbol {
        Symbol::new(["crate", "stub"], self.grpc_stub.as_str())
    }

    pub fn http_stub_symbol(&self) -> Symbol {
        Symbol::new(["crate", "stub"], self.http_stub.as_str())
    }

    /// A constant of the settings module, `crate::echo_settings::DEFAULT_ENDPOINT`.
    pub fn settings_const(&self, name: &str) -> Symbol {
        Symbol::new(["crate", self.settings_module.as_str()], name)
    }
}

/// The snake-case name of a method's client and stub functions.
pub fn method_name(method: &Method) -> String {
    RUST_NAMING.member_name(&method.name)
}

/// The version segment of a proto package: `google.showcase.v1beta1` -> `v1beta1`.
///
/// Packages without one are treated as `v1`.
pub fn api_version(package: &str) -> String {
    package
        .rsplit('.')
        .next()
        .filter(|last| {
            last.strip_prefix('v')
                .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
        })
        .unwrap_or("v1")
        .to_string()
}

/// The short host name region tags start with: `library.example.com` -> `library`.
pub fn host_label(default_host: Option<&str>, package: &str) -> String {
    match default_host {
        Some(host) => {
            let host = host.split(':').next().unwrap_or(host);
            host.split('.').next().unwrap_or(host).to_string()
        }
        None => package.split('.').next().unwrap_or(package).to_string(),
    }
}
