//! Language-agnostic code generation traits.

use std::path::Path;

use gapic_core::{File, ScalarType, WriteResult, materialize};
use gapic_model::{Cardinality, Field, FieldType, GapicContext};

use crate::{Error, ast::TypeRef};

/// Trait for language-specific client-library generators.
///
/// Implement this trait to add a back-end for a new target language.
pub trait LanguageCodegen {
    /// Language identifier (e.g., "rust")
    fn language(&self) -> &'static str;

    /// File extension for generated source files (e.g., "rs")
    fn file_extension(&self) -> &'static str;

    /// Compose and render every unit for `ctx` in memory.
    ///
    /// Nothing is returned unless every unit rendered.
    fn render(&self, ctx: &GapicContext) -> Result<Vec<File>, Error>;

    /// Render everything, then write the files below `output_dir`.
    fn generate(&self, ctx: &GapicContext, output_dir: &Path) -> eyre::Result<GenerateResult> {
        let files = self.render(ctx)?;
        let results = materialize(output_dir, &files)?;

        let mut result = GenerateResult::default();
        for (file, outcome) in files.iter().zip(results) {
            let path = file.path().display().to_string();
            match outcome {
                WriteResult::Written => result.written.push(path),
                WriteResult::Unchanged => result.unchanged.push(path),
            }
        }
        tracing::info!(
            written = result.written.len(),
            unchanged = result.unchanged.len(),
            "generated {} files",
            self.language()
        );
        Ok(result)
    }
}

/// Result of code generation
#[derive(Debug, Default)]
pub struct GenerateResult {
    /// Files whose content changed
    pub written: Vec<String>,
    /// Files that already held the rendered content
    pub unchanged: Vec<String>,
}

/// Trait for mapping model types to language types.
pub trait TypeMapper {
    /// The target language name
    fn language(&self) -> &'static str;

    fn scalar(&self, scalar: ScalarType) -> TypeRef;

    /// The type of a message, by full proto name.
    fn message(&self, full_name: &str) -> TypeRef;

    /// The type an enum field is stored as, by full proto name.
    fn enumeration(&self, full_name: &str) -> TypeRef;

    fn map(&self, key: ScalarType, value: TypeRef) -> TypeRef;

    /// Wrap an element type for a repeated field.
    fn repeated(&self, element: TypeRef) -> TypeRef;

    /// Wrap a type for a field with explicit presence.
    fn optional(&self, inner: TypeRef) -> TypeRef;

    /// The element type of a field, ignoring cardinality.
    fn field_type(&self, field_type: &FieldType) -> TypeRef {
        match field_type {
            FieldType::Scalar(scalar) => self.scalar(*scalar),
            FieldType::Message(name) => self.message(name),
            FieldType::Enum(name) => self.enumeration(name),
            FieldType::Map { key, value } => self.map(*key, self.field_type(value)),
        }
    }

    /// The type a field is stored as.
    ///
    /// Singular message fields always have presence.
    fn field(&self, field: &Field) -> TypeRef {
        let element = self.field_type(&field.field_type);
        match (&field.field_type, field.cardinality) {
            (FieldType::Map { .. }, _) => element,
            (_, Cardinality::Repeated) => self.repeated(element),
            (FieldType::Message(_), _) | (_, Cardinality::Optional) => self.optional(element),
            (_, Cardinality::Singular) => element,
        }
    }
}
