//! Wire shapes of the message-valued API annotations.
//!
//! Options come out of the descriptor pool as dynamic messages; the ones
//! with structure are re-decoded into these before interpretation.

use prost::Message;
use prost_reflect::{DynamicMessage, ExtensionDescriptor, Value};

#[derive(Clone, PartialEq, Message)]
pub(crate) struct HttpRule {
    #[prost(string, tag = "1")]
    pub selector: String,
    #[prost(oneof = "http_rule::Pattern", tags = "2, 3, 4, 5, 6, 8")]
    pub pattern: Option<http_rule::Pattern>,
    #[prost(string, tag = "7")]
    pub body: String,
    #[prost(string, tag = "12")]
    pub response_body: String,
    #[prost(message, repeated, tag = "11")]
    pub additional_bindings: Vec<HttpRule>,
}

pub(crate) mod http_rule {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub(crate) enum Pattern {
        #[prost(string, tag = "2")]
        Get(String),
        #[prost(string, tag = "3")]
        Put(String),
        #[prost(string, tag = "4")]
        Post(String),
        #[prost(string, tag = "5")]
        Delete(String),
        #[prost(string, tag = "6")]
        Patch(String),
        #[prost(message, tag = "8")]
        Custom(super::CustomHttpPattern),
    }
}

#[derive(Clone, PartialEq, Message)]
pub(crate) struct CustomHttpPattern {
    #[prost(string, tag = "1")]
    pub kind: String,
    #[prost(string, tag = "2")]
    pub path: String,
}

#[derive(Clone, PartialEq, Message)]
pub(crate) struct ResourceDescriptor {
    #[prost(string, tag = "1")]
    pub r#type: String,
    #[prost(string, repeated, tag = "2")]
    pub pattern: Vec<String>,
    #[prost(string, tag = "3")]
    pub name_field: String,
    #[prost(string, tag = "5")]
    pub plural: String,
    #[prost(string, tag = "6")]
    pub singular: String,
}

#[derive(Clone, PartialEq, Message)]
pub(crate) struct ResourceReference {
    #[prost(string, tag = "1")]
    pub r#type: String,
    #[prost(string, tag = "2")]
    pub child_type: String,
}

#[derive(Clone, PartialEq, Message)]
pub(crate) struct OperationInfo {
    #[prost(string, tag = "1")]
    pub response_type: String,
    #[prost(string, tag = "2")]
    pub metadata_type: String,
}

/// Every message value `ext` holds on `options`, decoded as `T`.
///
/// A singular extension yields at most one value; a repeated one yields them
/// in declaration order.
pub(crate) fn decode_messages<T: Message + Default>(
    options: &DynamicMessage,
    ext: &ExtensionDescriptor,
) -> Result<Vec<T>, prost::DecodeError> {
    if !options.has_extension(ext) {
        return Ok(Vec::new());
    }
    let value = options.get_extension(ext);
    let messages: Vec<&DynamicMessage> = match value.as_ref() {
        Value::Message(msg) => vec![msg],
        Value::List(items) => items.iter().filter_map(Value::as_message).collect(),
        _ => Vec::new(),
    };
    messages
        .into_iter()
        .map(|msg| T::decode(msg.encode_to_vec().as_slice()))
        .collect()
}

/// Every string value `ext` holds on `options`.
pub(crate) fn strings(options: &DynamicMessage, ext: &ExtensionDescriptor) -> Vec<String> {
    if !options.has_extension(ext) {
        return Vec::new();
    }
    match options.get_extension(ext).as_ref() {
        Value::String(s) => vec![s.clone()],
        Value::List(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Names of every enum value `ext` holds on `options`.
pub(crate) fn enum_names(options: &DynamicMessage, ext: &ExtensionDescriptor) -> Vec<String> {
    if !options.has_extension(ext) {
        return Vec::new();
    }
    let prost_reflect::Kind::Enum(descriptor) = ext.kind() else {
        return Vec::new();
    };
    let numbers = match options.get_extension(ext).as_ref() {
        Value::EnumNumber(n) => vec![*n],
        Value::List(items) => items.iter().filter_map(Value::as_enum_number).collect(),
        _ => Vec::new(),
    };
    numbers
        .into_iter()
        .filter_map(|n| descriptor.get_value(n))
        .map(|value| value.name().to_string())
        .collect()
}
