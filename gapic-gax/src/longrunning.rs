//! `google.longrunning` messages.

use serde::{Deserialize, Serialize};

use crate::protobuf::Any;

/// A server-side computation that finishes later.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Operation {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(message, optional, tag = "2")]
    pub metadata: Option<Any>,
    #[prost(bool, tag = "3")]
    pub done: bool,
    #[prost(oneof = "operation::Result", tags = "4, 5")]
    #[serde(flatten)]
    pub result: Option<operation::Result>,
}

impl prost::Name for Operation {
    const NAME: &'static str = "Operation";
    const PACKAGE: &'static str = "google.longrunning";
}

/// Nested types of [`Operation`].
pub mod operation {
    use serde::{Deserialize, Serialize};

    use crate::{protobuf::Any, rpc};

    /// How a finished operation ended.
    #[derive(Clone, PartialEq, ::prost::Oneof, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub enum Result {
        #[prost(message, tag = "4")]
        Error(rpc::Status),
        #[prost(message, tag = "5")]
        Response(Any),
    }
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetOperationRequest {
    #[prost(string, tag = "1")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CancelOperationRequest {
    #[prost(string, tag = "1")]
    pub name: String,
}
