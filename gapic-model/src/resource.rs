use gapic_core::to_pascal_case;
use serde::Serialize;

use crate::PathTemplate;

/// A resource type and the name patterns its identifiers follow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceName {
    /// `library.example.com/Shelf`.
    pub resource_type: String,
    /// `ShelfName`.
    pub type_name: String,
    pub patterns: Vec<PathTemplate>,
}

impl ResourceName {
    pub fn new(resource_type: impl Into<String>, patterns: Vec<PathTemplate>) -> Self {
        let resource_type = resource_type.into();
        let kind = resource_type
            .rsplit_once('/')
            .map_or(resource_type.as_str(), |(_, kind)| kind);
        let type_name = format!("{}Name", to_pascal_case(kind));
        Self {
            resource_type,
            type_name,
            patterns,
        }
    }

    /// Multiple patterns become an enum with one variant per pattern.
    pub fn is_multi_pattern(&self) -> bool {
        self.patterns.len() > 1
    }

    /// Variant name for one pattern: the Pascal-cased variable names joined.
    ///
    /// `projects/{project}/shelves/{shelf}` becomes `ProjectShelf`.
    pub fn variant_name(pattern: &PathTemplate) -> String {
        let names = pattern.variable_names();
        if names.is_empty() {
            return "Singleton".to_string();
        }
        names.iter().map(|name| to_pascal_case(name)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_name() {
        let shelf = ResourceName::new(
            "library.example.com/Shelf",
            vec![PathTemplate::parse("shelves/{shelf}").unwrap()],
        );
        assert_eq!(shelf.type_name, "ShelfName");
        assert!(!shelf.is_multi_pattern());
    }

    #[test]
    fn test_variant_name() {
        let pattern = PathTemplate::parse("projects/{project}/shelves/{shelf_id}").unwrap();
        assert_eq!(ResourceName::variant_name(&pattern), "ProjectShelfId");
        let singleton = PathTemplate::parse("config").unwrap();
        assert_eq!(ResourceName::variant_name(&singleton), "Singleton");
    }
}
