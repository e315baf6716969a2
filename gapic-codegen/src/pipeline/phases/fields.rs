//! Field lookups shared by lints and the build phase.

use gapic_descriptor::{DescriptorSet, FieldDescriptor, FieldKind};
use gapic_model::FieldType;

pub(crate) fn field_type(kind: &FieldKind) -> FieldType {
    match kind {
        FieldKind::Scalar(scalar) => FieldType::Scalar(*scalar),
        FieldKind::Message(name) => FieldType::Message(name.clone()),
        FieldKind::Enum(name) => FieldType::Enum(name.clone()),
        FieldKind::Map { key, value } => FieldType::Map {
            key: *key,
            value: Box::new(field_type(value)),
        },
    }
}

/// Follow a dotted field path (`book.name`) from `message`.
///
/// Every segment but the last must be a singular message field.
pub(crate) fn resolve_field_path<'a>(
    set: &'a DescriptorSet,
    message: &str,
    path: &str,
) -> Result<&'a FieldDescriptor, String> {
    let mut current = set
        .message(message)
        .ok_or_else(|| format!("message '{message}' is not loaded"))?;
    let mut segments = path.split('.').peekable();
    while let Some(segment) = segments.next() {
        let field = current.field(segment).ok_or_else(|| {
            format!("field '{path}' does not exist on '{}'", current.full_name)
        })?;
        if segments.peek().is_none() {
            return Ok(field);
        }
        current = field
            .kind
            .message_name()
            .filter(|_| !field.is_repeated())
            .and_then(|name| set.message(name))
            .ok_or_else(|| {
                format!(
                    "field '{segment}' of '{}' is not a singular message, so '{path}' cannot be \
                     followed",
                    current.full_name
                )
            })?;
    }
    Err(format!("empty field path on '{message}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[test]
    fn test_resolve_nested_path() {
        let set = testing::library_descriptors();
        let field =
            resolve_field_path(&set, "example.library.v1.UpdateBookRequest", "book.name").unwrap();
        assert_eq!(field.name, "name");
    }

    #[test]
    fn test_resolve_reports_missing_segment() {
        let set = testing::library_descriptors();
        let err = resolve_field_path(&set, "example.library.v1.UpdateBookRequest", "book.nme")
            .unwrap_err();
        assert_eq!(
            err,
            "field 'book.nme' does not exist on 'example.library.v1.Book'"
        );
    }

    #[test]
    fn test_resolve_refuses_scalar_parent() {
        let set = testing::library_descriptors();
        let err = resolve_field_path(&set, "example.library.v1.GetShelfRequest", "name.inner")
            .unwrap_err();
        assert!(err.contains("is not a singular message"));
    }
}
