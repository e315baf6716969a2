//! Naming conventions for generated identifiers.

use gapic_core::{to_pascal_case, to_screaming_snake_case, to_snake_case};

/// Language-specific naming conventions.
///
/// Defines how proto names become type, member, file and constant names, and
/// how reserved words are escaped.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Transform a proto name to a type name (e.g., "library_service" -> "LibraryService")
    pub to_type: fn(&str) -> String,
    /// Transform a proto name to a member name (e.g., "ListBooks" -> "list_books")
    pub to_member: fn(&str) -> String,
    /// Transform a proto name to a constant name (e.g., "endpoint" -> "ENDPOINT")
    pub to_constant: fn(&str) -> String,
    /// List of reserved words in the language
    pub reserved_words: &'static [&'static str],
    /// Escape a reserved word (e.g., "type" -> "r#type" in Rust)
    pub escape_reserved: fn(&str) -> String,
}

impl NamingConvention {
    /// Check if a name is a reserved word.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// Get a safe name, escaping if necessary.
    pub fn safe_name(&self, name: &str) -> String {
        if self.is_reserved(name) {
            (self.escape_reserved)(name)
        } else {
            name.to_string()
        }
    }

    pub fn type_name(&self, name: &str) -> String {
        self.safe_name(&(self.to_type)(name))
    }

    /// Method, field, local and module names.
    pub fn member_name(&self, name: &str) -> String {
        self.safe_name(&(self.to_member)(name))
    }

    pub fn constant_name(&self, name: &str) -> String {
        (self.to_constant)(name)
    }

    /// File stem for a generated module; never escaped.
    pub fn file_name(&self, name: &str) -> String {
        (self.to_member)(name)
    }
}

const RUST_RESERVED: &[&str] = &[
    "as", "async", "await", "box", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod",
    "move", "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait",
    "true", "try", "type", "unsafe", "use", "where", "while", "yield",
];

/// Keywords a raw identifier cannot spell.
const RUST_NOT_RAW: &[&str] = &["crate", "self", "Self", "super"];

fn rust_escape(name: &str) -> String {
    if RUST_NOT_RAW.contains(&name) {
        format!("{name}_")
    } else {
        format!("r#{name}")
    }
}

/// Rust naming: `PascalCase` types, `snake_case` members, raw identifiers for keywords.
pub const RUST_NAMING: NamingConvention = NamingConvention {
    to_type: to_pascal_case,
    to_member: to_snake_case,
    to_constant: to_screaming_snake_case,
    reserved_words: RUST_RESERVED,
    escape_reserved: rust_escape,
};

/// Name of the client overload flattening `signature` for `method`:
/// `GetShelf(name)` -> `get_shelf_by_name`.
///
/// Nested field paths contribute every segment: `book.name` -> `book_name`.
pub fn flattened_method_name(method: &str, signature: &[String]) -> String {
    let fields: Vec<String> = signature.iter().map(|field| to_snake_case(field)).collect();
    format!("{}_by_{}", to_snake_case(method), fields.join("_and_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_naming() {
        assert_eq!(RUST_NAMING.type_name("library_service"), "LibraryService");
        assert_eq!(RUST_NAMING.member_name("ListBooks"), "list_books");
        assert_eq!(RUST_NAMING.member_name("type"), "r#type");
        assert_eq!(RUST_NAMING.member_name("self"), "self_");
        assert_eq!(RUST_NAMING.constant_name("defaultEndpoint"), "DEFAULT_ENDPOINT");
        assert_eq!(RUST_NAMING.file_name("type"), "type");
    }

    #[test]
    fn test_flattened_method_name() {
        assert_eq!(
            flattened_method_name("MergeShelves", &["name".into(), "other_shelf".into()]),
            "merge_shelves_by_name_and_other_shelf"
        );
        assert_eq!(
            flattened_method_name("UpdateBook", &["book.name".into()]),
            "update_book_by_book_name"
        );
    }
}
