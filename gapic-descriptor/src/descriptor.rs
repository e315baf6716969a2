//! The validated descriptor graph produced by the loader.
//!
//! Every type name in here is fully qualified without a leading dot
//! (`google.showcase.v1beta1.EchoRequest`) and is guaranteed to exist in
//! [`DescriptorSet::messages`] or [`DescriptorSet::enums`].

use gapic_core::ScalarType;
use indexmap::IndexMap;

pub const OPERATION_TYPE: &str = "google.longrunning.Operation";
pub const EMPTY_TYPE: &str = "google.protobuf.Empty";

#[derive(Debug, Clone, Default)]
pub struct DescriptorSet {
    /// Every loaded file, imports first, in load order.
    pub files: Vec<FileDescriptor>,
    /// Every message, keyed by full name, nested messages included.
    pub messages: IndexMap<String, MessageDescriptor>,
    pub enums: IndexMap<String, EnumDescriptor>,
    /// Files named on the command line, as opposed to their imports.
    pub files_to_generate: Vec<String>,
}

impl DescriptorSet {
    pub fn message(&self, full_name: &str) -> Option<&MessageDescriptor> {
        self.messages.get(full_name.trim_start_matches('.'))
    }

    pub fn enumeration(&self, full_name: &str) -> Option<&EnumDescriptor> {
        self.enums.get(full_name.trim_start_matches('.'))
    }

    pub fn file(&self, name: &str) -> Option<&FileDescriptor> {
        self.files.iter().find(|f| f.name == name)
    }

    /// Files that code is generated for.
    pub fn generated_files(&self) -> impl Iterator<Item = &FileDescriptor> {
        self.files
            .iter()
            .filter(|f| self.files_to_generate.contains(&f.name))
    }

    /// Services declared in the files to generate, in declaration order.
    pub fn services(&self) -> impl Iterator<Item = &ServiceDescriptor> {
        self.generated_files().flat_map(|f| f.services.iter())
    }

    /// Resource definitions from messages and file-level annotations across every file.
    pub fn resources(&self) -> impl Iterator<Item = &ResourceDescriptor> {
        let file_level = self.files.iter().flat_map(|f| f.resource_definitions.iter());
        let message_level = self.messages.values().filter_map(|m| m.resource.as_ref());
        message_level.chain(file_level)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FileDescriptor {
    pub name: String,
    pub package: String,
    pub imports: Vec<String>,
    pub services: Vec<ServiceDescriptor>,
    /// `google.api.resource_definition` file options.
    pub resource_definitions: Vec<ResourceDescriptor>,
}

#[derive(Debug, Clone)]
pub struct MessageDescriptor {
    pub full_name: String,
    pub name: String,
    pub file: String,
    pub doc: Option<String>,
    pub fields: Vec<FieldDescriptor>,
    /// `google.api.resource` message option.
    pub resource: Option<ResourceDescriptor>,
}

impl MessageDescriptor {
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLabel {
    Singular,
    /// `optional` in proto3, tracked for explicit presence.
    Optional,
    Repeated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Scalar(ScalarType),
    Message(String),
    Enum(String),
    Map { key: ScalarType, value: Box<FieldKind> },
}

impl FieldKind {
    pub fn is_message(&self) -> bool {
        matches!(self, Self::Message(_))
    }

    pub fn message_name(&self) -> Option<&str> {
        match self {
            Self::Message(name) => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldBehavior {
    Required,
    OutputOnly,
    InputOnly,
    Immutable,
    Optional,
    Identifier,
    UnorderedList,
    NonEmptyDefault,
}

impl FieldBehavior {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "REQUIRED" => Self::Required,
            "OUTPUT_ONLY" => Self::OutputOnly,
            "INPUT_ONLY" => Self::InputOnly,
            "IMMUTABLE" => Self::Immutable,
            "OPTIONAL" => Self::Optional,
            "IDENTIFIER" => Self::Identifier,
            "UNORDERED_LIST" => Self::UnorderedList,
            "NON_EMPTY_DEFAULT" => Self::NonEmptyDefault,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: String,
    pub number: i32,
    /// lowerCamelCase name used by the JSON mapping.
    pub json_name: String,
    pub label: FieldLabel,
    pub kind: FieldKind,
    pub oneof: Option<String>,
    pub behaviors: Vec<FieldBehavior>,
    pub resource_reference: Option<ResourceReference>,
    pub doc: Option<String>,
}

impl FieldDescriptor {
    pub fn is_repeated(&self) -> bool {
        self.label == FieldLabel::Repeated
    }

    pub fn is_map(&self) -> bool {
        matches!(self.kind, FieldKind::Map { .. })
    }

    pub fn is_required(&self) -> bool {
        self.behaviors.contains(&FieldBehavior::Required)
    }

    pub fn scalar(&self) -> Option<ScalarType> {
        match self.kind {
            FieldKind::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnumDescriptor {
    pub full_name: String,
    pub name: String,
    pub file: String,
    pub doc: Option<String>,
    pub values: Vec<(String, i32)>,
}

#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    pub name: String,
    pub full_name: String,
    pub file: String,
    pub package: String,
    pub doc: Option<String>,
    /// `google.api.default_host`.
    pub default_host: Option<String>,
    /// `google.api.oauth_scopes`, split on commas.
    pub oauth_scopes: Vec<String>,
    pub methods: Vec<MethodDescriptor>,
}

impl ServiceDescriptor {
    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.iter().find(|m| m.name == name)
    }
}

#[derive(Debug, Clone)]
pub struct MethodDescriptor {
    pub name: String,
    pub doc: Option<String>,
    pub input_type: String,
    pub output_type: String,
    pub client_streaming: bool,
    pub server_streaming: bool,
    pub http: Option<HttpRule>,
    /// `google.api.method_signature` entries; an empty entry is the no-argument overload.
    pub method_signatures: Vec<Vec<String>>,
    pub operation_info: Option<OperationInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpVerb {
    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "get" => Self::Get,
            "post" => Self::Post,
            "put" => Self::Put,
            "patch" => Self::Patch,
            "delete" => Self::Delete,
            _ => return None,
        })
    }

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

/// One `google.api.http` binding.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRule {
    pub verb: HttpVerb,
    pub path: String,
    /// `"*"`, a request field name, or `None` for no body.
    pub body: Option<String>,
    pub response_body: Option<String>,
    pub additional_bindings: Vec<HttpRule>,
}

/// `google.longrunning.operation_info`, with both types resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationInfo {
    pub response_type: String,
    pub metadata_type: String,
}

/// A `google.api.resource` or `google.api.resource_definition` annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// `library.googleapis.com/Shelf`.
    pub type_name: String,
    pub patterns: Vec<String>,
    pub name_field: Option<String>,
    pub plural: Option<String>,
    pub singular: Option<String>,
}

impl ResourceDescriptor {
    /// The part of the type after the slash: `Shelf`.
    pub fn short_name(&self) -> &str {
        self.type_name
            .rsplit_once('/')
            .map_or(self.type_name.as_str(), |(_, name)| name)
    }
}

/// A `google.api.resource_reference` field annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceReference {
    pub type_name: String,
    /// Set for `child_type` references, which name the parent of the field's resource.
    pub child: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_short_name() {
        let resource = ResourceDescriptor {
            type_name: "library.googleapis.com/Shelf".into(),
            patterns: vec!["shelves/{shelf}".into()],
            name_field: None,
            plural: None,
            singular: None,
        };
        assert_eq!(resource.short_name(), "Shelf");
    }

    #[test]
    fn test_lookup_ignores_leading_dot() {
        let mut set = DescriptorSet::default();
        set.messages.insert(
            "a.B".into(),
            MessageDescriptor {
                full_name: "a.B".into(),
                name: "B".into(),
                file: "a.proto".into(),
                doc: None,
                fields: Vec::new(),
                resource: None,
            },
        );
        assert!(set.message(".a.B").is_some());
        assert!(set.message("a.C").is_none());
    }

    #[test]
    fn test_field_behavior_names() {
        assert_eq!(FieldBehavior::from_name("REQUIRED"), Some(FieldBehavior::Required));
        assert_eq!(FieldBehavior::from_name("OUTPUT_ONLY"), Some(FieldBehavior::OutputOnly));
        assert_eq!(FieldBehavior::from_name("bogus"), None);
    }
}
