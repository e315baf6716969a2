use gapic_core::ScalarType;
use serde::Serialize;

/// A protobuf message as the composers see it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    /// `google.showcase.v1beta1.EchoRequest`.
    pub full_name: String,
    pub name: String,
    /// Proto package the message is declared in.
    pub package: String,
    pub doc: Option<String>,
    pub fields: Vec<Field>,
    /// The resource type this message represents, if annotated.
    pub resource_type: Option<String>,
}

impl Message {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of enclosing messages for nested types, outermost first.
    pub fn parents(&self) -> Vec<&str> {
        let relative = self
            .full_name
            .strip_prefix(&self.package)
            .map_or(self.full_name.as_str(), |rest| rest.trim_start_matches('.'));
        let mut parts: Vec<&str> = relative.split('.').collect();
        parts.pop();
        parts
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,
    pub json_name: String,
    pub number: i32,
    pub field_type: FieldType,
    pub cardinality: Cardinality,
    pub oneof: Option<String>,
    pub required: bool,
    pub resource_reference: Option<ResourceReference>,
    pub doc: Option<String>,
}

impl Field {
    pub fn is_repeated(&self) -> bool {
        self.cardinality == Cardinality::Repeated
    }

    /// A field that can appear in a URL: a singular scalar or enum.
    pub fn is_path_compatible(&self) -> bool {
        self.cardinality != Cardinality::Repeated
            && matches!(self.field_type, FieldType::Scalar(_) | FieldType::Enum(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Scalar(ScalarType),
    Message(String),
    Enum(String),
    Map {
        key: ScalarType,
        value: Box<FieldType>,
    },
}

impl FieldType {
    pub fn is_string(&self) -> bool {
        matches!(self, Self::Scalar(ScalarType::String))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Scalar(scalar) if scalar.is_integer())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    Singular,
    /// Explicit presence (`optional` in proto3).
    Optional,
    Repeated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceReference {
    pub type_name: String,
    pub child: bool,
}
