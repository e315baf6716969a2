use serde::Serialize;

use crate::PathTemplate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// The runtime's variant name, `Get`.
    pub fn variant(&self) -> &'static str {
        match self {
            Self::Get => "Get",
            Self::Post => "Post",
            Self::Put => "Put",
            Self::Patch => "Patch",
            Self::Delete => "Delete",
        }
    }
}

/// What the HTTP request body carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyBinding {
    None,
    /// `body: "*"`: every field not bound to the path.
    Wildcard,
    /// `body: "<field>"`: one message-typed request field.
    Field(String),
}

/// A path variable and the request field it reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathParam {
    /// `["book", "name"]` for `{book.name=...}`.
    pub field_path: Vec<String>,
    /// The pattern the value must match, `shelves/*`.
    pub pattern: String,
}

impl PathParam {
    pub fn field_name(&self) -> String {
        self.field_path.join(".")
    }
}

/// A request field sent as a query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryParam {
    pub field_name: String,
    pub json_name: String,
}

/// A resolved `google.api.http` binding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpBinding {
    pub method: HttpMethod,
    pub template: PathTemplate,
    pub body: BodyBinding,
    pub path_params: Vec<PathParam>,
    /// Scalar request fields bound neither to the path nor the body.
    pub query_params: Vec<QueryParam>,
}
