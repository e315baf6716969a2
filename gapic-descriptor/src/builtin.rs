//! Built-in sources for the API annotation files every API imports.
//!
//! `google/protobuf/*` comes from the compiler's own copies; these cover the
//! `google.api`, `google.longrunning` and `google.rpc` files so an API
//! compiles without a googleapis checkout on the include path.

const HTTP: &str = r#"
syntax = "proto3";
package google.api;

message Http {
  repeated HttpRule rules = 1;
  bool fully_decode_reserved_expansion = 2;
}

message HttpRule {
  string selector = 1;
  oneof pattern {
    string get = 2;
    string put = 3;
    string post = 4;
    string delete = 5;
    string patch = 6;
    CustomHttpPattern custom = 8;
  }
  string body = 7;
  string response_body = 12;
  repeated HttpRule additional_bindings = 11;
}

message CustomHttpPattern {
  string kind = 1;
  string path = 2;
}
"#;

const ANNOTATIONS: &str = r#"
syntax = "proto3";
package google.api;

import "google/api/http.proto";
import "google/protobuf/descriptor.proto";

extend google.protobuf.MethodOptions {
  HttpRule http = 72295728;
}
"#;

const CLIENT: &str = r#"
syntax = "proto3";
package google.api;

import "google/protobuf/descriptor.proto";

extend google.protobuf.MethodOptions {
  repeated string method_signature = 1051;
}

extend google.protobuf.ServiceOptions {
  string default_host = 1049;
  string oauth_scopes = 1050;
}
"#;

const FIELD_BEHAVIOR: &str = r#"
syntax = "proto3";
package google.api;

import "google/protobuf/descriptor.proto";

extend google.protobuf.FieldOptions {
  repeated google.api.FieldBehavior field_behavior = 1052 [packed = false];
}

enum FieldBehavior {
  FIELD_BEHAVIOR_UNSPECIFIED = 0;
  OPTIONAL = 1;
  REQUIRED = 2;
  OUTPUT_ONLY = 3;
  INPUT_ONLY = 4;
  IMMUTABLE = 5;
  UNORDERED_LIST = 6;
  NON_EMPTY_DEFAULT = 7;
  IDENTIFIER = 8;
}
"#;

const RESOURCE: &str = r#"
syntax = "proto3";
package google.api;

import "google/protobuf/descriptor.proto";

extend google.protobuf.FieldOptions {
  google.api.ResourceReference resource_reference = 1055;
}

extend google.protobuf.FileOptions {
  repeated google.api.ResourceDescriptor resource_definition = 1053;
}

extend google.protobuf.MessageOptions {
  google.api.ResourceDescriptor resource = 1053;
}

message ResourceDescriptor {
  enum History {
    HISTORY_UNSPECIFIED = 0;
    ORIGINALLY_SINGLE_PATTERN = 1;
    FUTURE_MULTI_PATTERN = 2;
  }

  enum Style {
    STYLE_UNSPECIFIED = 0;
    DECLARATIVE_FRIENDLY = 1;
  }

  string type = 1;
  repeated string pattern = 2;
  string name_field = 3;
  History history = 4;
  string plural = 5;
  string singular = 6;
  repeated Style style = 10;
}

message ResourceReference {
  string type = 1;
  string child_type = 2;
}
"#;

const ROUTING: &str = r#"
syntax = "proto3";
package google.api;

import "google/protobuf/descriptor.proto";

extend google.protobuf.MethodOptions {
  google.api.RoutingRule routing = 72295729;
}

message RoutingRule {
  repeated RoutingParameter routing_parameters = 2;
}

message RoutingParameter {
  string field = 1;
  string path_template = 2;
}
"#;

const LONGRUNNING: &str = r#"
syntax = "proto3";
package google.longrunning;

import "google/protobuf/any.proto";
import "google/protobuf/descriptor.proto";
import "google/protobuf/duration.proto";
import "google/protobuf/empty.proto";
import "google/rpc/status.proto";

extend google.protobuf.MethodOptions {
  google.longrunning.OperationInfo operation_info = 1049;
}

message Operation {
  string name = 1;
  google.protobuf.Any metadata = 2;
  bool done = 3;
  oneof result {
    google.rpc.Status error = 4;
    google.protobuf.Any response = 5;
  }
}

message GetOperationRequest {
  string name = 1;
}

message ListOperationsRequest {
  string name = 4;
  string filter = 1;
  int32 page_size = 2;
  string page_token = 3;
}

message ListOperationsResponse {
  repeated Operation operations = 1;
  string next_page_token = 2;
}

message CancelOperationRequest {
  string name = 1;
}

message DeleteOperationRequest {
  string name = 1;
}

message WaitOperationRequest {
  string name = 1;
  google.protobuf.Duration timeout = 2;
}

message OperationInfo {
  string response_type = 1;
  string metadata_type = 2;
}
"#;

const RPC_STATUS: &str = r#"
syntax = "proto3";
package google.rpc;

import "google/protobuf/any.proto";

message Status {
  int32 code = 1;
  string message = 2;
  repeated google.protobuf.Any details = 3;
}
"#;

/// Source text for a built-in file, if `name` is one.
pub(crate) fn source(name: &str) -> Option<&'static str> {
    let src = match name {
        "google/api/annotations.proto" => ANNOTATIONS,
        "google/api/http.proto" => HTTP,
        "google/api/client.proto" => CLIENT,
        "google/api/field_behavior.proto" => FIELD_BEHAVIOR,
        "google/api/resource.proto" => RESOURCE,
        "google/api/routing.proto" => ROUTING,
        "google/longrunning/operations.proto" => LONGRUNNING,
        "google/rpc/status.proto" => RPC_STATUS,
        _ => return None,
    };
    Some(src)
}
