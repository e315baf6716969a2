use serde::Serialize;

use crate::{CallShape, FieldType, HttpBinding, RetrySettings};

/// A service and everything needed to generate its client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    pub name: String,
    /// `google.showcase.v1beta1.Echo`.
    pub full_name: String,
    pub package: String,
    pub doc: Option<String>,
    pub default_host: Option<String>,
    pub oauth_scopes: Vec<String>,
    pub methods: Vec<Method>,
}

impl Service {
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn has_long_running(&self) -> bool {
        self.methods.iter().any(|m| m.shape.operation().is_some())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Method {
    pub name: String,
    /// `google.showcase.v1beta1.Echo.Expand`.
    pub full_name: String,
    pub doc: Option<String>,
    pub input_type: String,
    /// The declared output; `google.longrunning.Operation` for long-running methods.
    pub output_type: String,
    pub shape: CallShape,
    pub http: Option<HttpBinding>,
    pub signatures: Vec<MethodSignature>,
    pub retry: RetrySettings,
}

impl Method {
    /// `/google.showcase.v1beta1.Echo/Expand`, the gRPC path.
    pub fn grpc_path(&self) -> String {
        match self.full_name.rsplit_once('.') {
            Some((service, method)) => format!("/{service}/{method}"),
            None => format!("/{}", self.full_name),
        }
    }
}

/// A flattened overload from `google.api.method_signature`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodSignature {
    pub args: Vec<SignatureArg>,
}

impl MethodSignature {
    pub fn field_names(&self) -> Vec<&str> {
        self.args.iter().map(|a| a.field.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignatureArg {
    /// Request field the argument fills.
    pub field: String,
    pub field_type: FieldType,
    pub repeated: bool,
    /// Resource type when the field references a known resource.
    pub resource_type: Option<String>,
}
