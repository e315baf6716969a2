//! Pagination detection, shared by the `pagination-shape` lint and the build phase.

use gapic_core::ScalarType;
use gapic_descriptor::{DescriptorSet, FieldDescriptor, MethodDescriptor};
use gapic_model::PaginationInfo;

use super::fields::field_type;

const PAGE_TOKEN: &str = "page_token";
const NEXT_PAGE_TOKEN: &str = "next_page_token";
const PAGE_SIZE_FIELDS: [&str; 2] = ["page_size", "max_results"];

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Pagination {
    NotPaged,
    Paged(PaginationInfo),
    /// The token pair is there but the rest of the shape is not.
    Malformed(String),
}

pub(crate) fn detect(set: &DescriptorSet, method: &MethodDescriptor) -> Pagination {
    let (Some(request), Some(response)) = (
        set.message(&method.input_type),
        set.message(&method.output_type),
    ) else {
        return Pagination::NotPaged;
    };

    if !is_token(request.field(PAGE_TOKEN)) || !is_token(response.field(NEXT_PAGE_TOKEN)) {
        return Pagination::NotPaged;
    }

    let page_size = PAGE_SIZE_FIELDS
        .iter()
        .filter_map(|name| request.field(name))
        .find(|f| !f.is_repeated() && f.scalar().is_some_and(|s| s.is_integer()));
    let Some(page_size) = page_size else {
        return Pagination::Malformed(format!(
            "request '{}' has page tokens but no integer 'page_size' or 'max_results' field",
            request.full_name
        ));
    };

    // the first repeated or map field holds the page's resources
    let Some(items) = response.fields.iter().find(|f| f.is_repeated() || f.is_map()) else {
        return Pagination::Malformed(format!(
            "response '{}' has page tokens but no repeated or map field to page over",
            response.full_name
        ));
    };

    Pagination::Paged(PaginationInfo {
        page_size_field: page_size.name.clone(),
        page_token_field: PAGE_TOKEN.to_string(),
        next_page_token_field: NEXT_PAGE_TOKEN.to_string(),
        items_field: items.name.clone(),
        item_type: field_type(&items.kind),
    })
}

fn is_token(field: Option<&FieldDescriptor>) -> bool {
    field.is_some_and(|f| !f.is_repeated() && f.scalar() == Some(ScalarType::String))
}
