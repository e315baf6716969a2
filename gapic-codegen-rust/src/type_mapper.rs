//! Proto types as Rust types of the generated crate.
//!
//! Messages of the API live in the prost-generated `model` module, nested
//! messages in the snake-case module of their parent. Enum fields are stored
//! as `i32`, as prost stores them.

use gapic_codegen::{
    ast::{Primitive, Symbol, TypeRef},
    language::{RUST_NAMING, TypeMapper},
};
use gapic_core::ScalarType;
use gapic_model::{Field, GapicContext, Message, ResourceName};

pub struct RustTypeMapper<'a> {
    ctx: &'a GapicContext,
    root: String,
}

impl<'a> RustTypeMapper<'a> {
    /// Types as seen from inside the generated crate.
    pub fn new(ctx: &'a GapicContext) -> Self {
        Self {
            ctx,
            root: "crate".to_string(),
        }
    }

    /// Types as seen by code outside the generated crate, such as samples.
    pub fn external(ctx: &'a GapicContext) -> Self {
        Self {
            ctx,
            root: ctx.api().crate_ident(),
        }
    }

    /// The symbol of a message type; `None` for `google.protobuf.Empty`.
    pub fn message_symbol(&self, full_name: &str) -> Option<Symbol> {
        if full_name == "google.protobuf.Empty" {
            return None;
        }
        if let Some(name) = full_name.strip_prefix("google.protobuf.") {
            return Some(match name {
                "Any" | "Duration" | "FieldMask" | "Timestamp" => {
                    Symbol::new(["gapic_gax", "protobuf"], name)
                }
                _ => Symbol::new(["prost_types"], name),
            });
        }
        for (package, module) in [("google.longrunning.", "longrunning"), ("google.rpc.", "rpc")] {
            if let Some(name) = full_name.strip_prefix(package) {
                return Some(Symbol::new(["gapic_gax", module], name));
            }
        }

        let (parents, name) = match self.ctx.message(full_name) {
            Some(message) => (message.parents(), message.name.as_str()),
            // Types of other packages are flattened into `model`.
            None => {
                let name = full_name.rsplit('.').next().unwrap_or(full_name);
                (Vec::new(), name)
            }
        };
        let mut module = vec![self.root.clone(), "model".to_string()];
        module.extend(parents.iter().map(|parent| RUST_NAMING.file_name(parent)));
        Some(Symbol::new(module, name))
    }

    /// The generated type of a resource name: `crate::resources::ShelfName`.
    pub fn resource_symbol(&self, resource: &ResourceName) -> Symbol {
        Symbol::new([self.root.as_str(), "resources"], resource.type_name.as_str())
    }

    /// The variant of the prost oneof enum that holds `field`:
    /// `crate::model::echo_request::Response::Content`.
    pub fn oneof_variant(&self, message: &Message, field: &Field) -> Option<Symbol> {
        let oneof = field.oneof.as_deref()?;
        let mut module = vec![self.root.clone(), "model".to_string()];
        module.extend(message.parents().iter().map(|parent| RUST_NAMING.file_name(parent)));
        module.push(RUST_NAMING.file_name(&message.name));
        module.push(RUST_NAMING.type_name(oneof));
        Some(Symbol::new(module, RUST_NAMING.type_name(&field.name)))
    }
}

impl TypeMapper for RustTypeMapper<'_> {
    fn language(&self) -> &'static str {
        "rust"
    }

    fn scalar(&self, scalar: ScalarType) -> TypeRef {
        let primitive = match scalar {
            ScalarType::Double => Primitive::F64,
            ScalarType::Float => Primitive::F32,
            ScalarType::Int32 | ScalarType::Sint32 | ScalarType::Sfixed32 => Primitive::I32,
            ScalarType::Int64 | ScalarType::Sint64 | ScalarType::Sfixed64 => Primitive::I64,
            ScalarType::Uint32 | ScalarType::Fixed32 => Primitive::U32,
            ScalarType::Uint64 | ScalarType::Fixed64 => Primitive::U64,
            ScalarType::Bool => Primitive::Bool,
            ScalarType::String => return TypeRef::string(),
            ScalarType::Bytes => return TypeRef::vec(TypeRef::Primitive(Primitive::U8)),
        };
        TypeRef::Primitive(primitive)
    }

    fn message(&self, full_name: &str) -> TypeRef {
        self.message_symbol(full_name)
            .map_or_else(TypeRef::unit, TypeRef::named)
    }

    fn enumeration(&self, _full_name: &str) -> TypeRef {
        TypeRef::Primitive(Primitive::I32)
    }

    fn map(&self, key: ScalarType, value: TypeRef) -> TypeRef {
        TypeRef::path("std::collections::HashMap")
            .arg(self.scalar(key))
            .arg(value)
    }

    fn repeated(&self, element: TypeRef) -> TypeRef {
        TypeRef::vec(element)
    }

    fn optional(&self, inner: TypeRef) -> TypeRef {
        TypeRef::option(inner)
    }
}
