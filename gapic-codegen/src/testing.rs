//! Fixture APIs and assertions for tests.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use gapic_descriptor::{DescriptorSet, GeneratorConfig, Loader, ServiceConfig};
use gapic_model::GapicContext;

use crate::pipeline::{CompilationContext, Pipeline};

/// The showcase Echo service: one method per call shape.
pub const ECHO_PROTO: &str = r#"
syntax = "proto3";

package google.showcase.v1beta1;

import "google/api/annotations.proto";
import "google/api/client.proto";
import "google/api/field_behavior.proto";
import "google/longrunning/operations.proto";
import "google/protobuf/duration.proto";
import "google/protobuf/timestamp.proto";
import "google/rpc/status.proto";

// This service is used showcase the four main types of rpcs - unary, server
// side streaming, client side streaming, and bidirectional streaming. This
// service also exposes methods that explicitly implement server delay, and
// paginated calls.
service Echo {
  option (google.api.default_host) = "localhost:7469";

  // This method simply echoes the request. This method showcases unary RPCs.
  rpc Echo(EchoRequest) returns (EchoResponse) {
    option (google.api.http) = {
      post: "/v1beta1/echo:echo"
      body: "*"
    };
  }

  // This method splits the given content into words and will pass each word
  // back through the stream. This method showcases server-side streaming RPCs.
  rpc Expand(ExpandRequest) returns (stream EchoResponse) {
    option (google.api.http) = {
      post: "/v1beta1/echo:expand"
      body: "*"
    };
    option (google.api.method_signature) = "content,error";
  }

  // This method will collect the words given to it. When the stream is closed
  // by the client, this method will return the a concatenation of the strings
  // passed to it. This method showcases client-side streaming RPCs.
  rpc Collect(stream EchoRequest) returns (EchoResponse) {
    option (google.api.http) = {
      post: "/v1beta1/echo:collect"
      body: "*"
    };
  }

  // This method, upon receiving a request on the stream, will pass the same
  // content back on the stream. This method showcases bidirectional
  // streaming RPCs.
  rpc Chat(stream EchoRequest) returns (stream EchoResponse);

  // This is similar to the Expand method but instead of returning a stream of
  // expanded words, this method returns a paged list of expanded words.
  rpc PagedExpand(PagedExpandRequest) returns (PagedExpandResponse) {
    option (google.api.http) = {
      post: "/v1beta1/echo:pagedExpand"
      body: "*"
    };
  }

  // This method will wait for the requested amount of time and then return.
  // This method showcases how a client handles a request timeout.
  rpc Wait(WaitRequest) returns (google.longrunning.Operation) {
    option (google.api.http) = {
      post: "/v1beta1/echo:wait"
      body: "*"
    };
    option (google.longrunning.operation_info) = {
      response_type: "WaitResponse"
      metadata_type: "WaitMetadata"
    };
  }

  // This method will block (wait) for the requested amount of time
  // and then return the response or error.
  // This method showcases how a client handles delays or retries.
  rpc Block(BlockRequest) returns (BlockResponse) {
    option (google.api.http) = {
      post: "/v1beta1/echo:block"
      body: "*"
    };
  }
}

// A severity enum used to test enum capabilities in GAPIC surfaces.
enum Severity {
  // The severity is unnecessary.
  UNNECESSARY = 0;
  // The severity is necessary.
  NECESSARY = 1;
  // Urgent.
  URGENT = 2;
  // Critical.
  CRITICAL = 3;
}

// The request message used for the Echo, Collect and Chat methods.
// If content or opt are set in this message then the request will succeed.
// If status is set in this message then the status will be returned as an
// error.
message EchoRequest {
  // The response contents.
  oneof response {
    // The content to be echoed by the server.
    string content = 1;

    // The error to be thrown by the server.
    google.rpc.Status error = 2;
  }

  // The severity to be echoed by the server.
  Severity severity = 3;

  // Optional. This field can be set to test the routing annotation on the
  // Echo method.
  string header = 4;
}

// The response message for the Echo methods.
message EchoResponse {
  // The content specified in the request.
  string content = 1;

  // The severity specified in the request.
  Severity severity = 2;
}

// The request message for the Expand method.
message ExpandRequest {
  // The content that will be split into words and returned on the stream.
  string content = 1;

  // The error that is thrown after all words are sent on the stream.
  google.rpc.Status error = 2;
}

// The request for the PagedExpand method.
message PagedExpandRequest {
  // The string to expand.
  string content = 1 [(google.api.field_behavior) = REQUIRED];

  // The number of words to returned in each page.
  int32 page_size = 2;

  // The position of the page to be returned.
  string page_token = 3;
}

// The response for the PagedExpand method.
message PagedExpandResponse {
  // The words that were expanded.
  repeated EchoResponse responses = 1;

  // The next page token.
  string next_page_token = 2;
}

// The request for Wait method.
message WaitRequest {
  // The ending time or duration.
  oneof end {
    // The time that this operation will complete.
    google.protobuf.Timestamp end_time = 1;

    // The duration of this operation.
    google.protobuf.Duration ttl = 4;
  }

  // The response.
  oneof response {
    // The error that will be returned by the server. If this code is specified
    // to be the OK rpc code, an empty response will be returned.
    google.rpc.Status error = 2;

    // The response to be returned on operation completion.
    WaitResponse success = 3;
  }
}

// The result of the Wait operation.
message WaitResponse {
  // This content of the result.
  string content = 1;
}

// Metadata for Wait operations.
message WaitMetadata {
  // The time that this operation will complete.
  google.protobuf.Timestamp end_time = 1;
}

// The request for Block method.
message BlockRequest {
  // The amount of time to block before returning a response.
  google.protobuf.Duration response_delay = 1;

  // The response.
  oneof response {
    // The error that will be returned by the server. If this code is specified
    // to be the OK rpc code, an empty response will be returned.
    google.rpc.Status error = 2;

    // The response to be returned that will signify successful method call.
    BlockResponse success = 3;
  }
}

// The response for Block method.
message BlockResponse {
  // This content can contain anything, the server will not depend on a value
  // here.
  string content = 1;
}
"#;

/// Retry settings for [`ECHO_PROTO`]: a service-wide timeout plus a retrying
/// `Echo` entry.
pub const ECHO_SERVICE_CONFIG: &str = r#"{
  "methodConfig": [
    {
      "name": [{ "service": "google.showcase.v1beta1.Echo" }],
      "timeout": "5s"
    },
    {
      "name": [{ "service": "google.showcase.v1beta1.Echo", "method": "Echo" }],
      "timeout": "10s",
      "retryPolicy": {
        "initialBackoff": "0.100s",
        "maxBackoff": "3s",
        "backoffMultiplier": 2,
        "retryableStatusCodes": ["UNAVAILABLE", "UNKNOWN"]
      }
    }
  ]
}"#;

/// A small library API with resource names, nested path variables and
/// flattened signatures.
pub const LIBRARY_PROTO: &str = r#"
syntax = "proto3";

package example.library.v1;

import "google/api/annotations.proto";
import "google/api/client.proto";
import "google/api/field_behavior.proto";
import "google/api/resource.proto";
import "google/protobuf/empty.proto";
import "google/protobuf/field_mask.proto";

// Manages shelves of books.
service LibraryService {
  option (google.api.default_host) = "library.example.com";
  option (google.api.oauth_scopes) = "https://www.googleapis.com/auth/library";

  // Creates a shelf.
  rpc CreateShelf(CreateShelfRequest) returns (Shelf) {
    option (google.api.http) = {
      post: "/v1/shelves"
      body: "shelf"
    };
    option (google.api.method_signature) = "shelf";
  }

  // Gets a shelf.
  rpc GetShelf(GetShelfRequest) returns (Shelf) {
    option (google.api.http) = { get: "/v1/{name=shelves/*}" };
    option (google.api.method_signature) = "name";
  }

  // Deletes a shelf.
  rpc DeleteShelf(DeleteShelfRequest) returns (google.protobuf.Empty) {
    option (google.api.http) = { delete: "/v1/{name=shelves/*}" };
    option (google.api.method_signature) = "name";
  }

  // Moves every book from one shelf onto another.
  rpc MergeShelves(MergeShelvesRequest) returns (Shelf) {
    option (google.api.http) = {
      post: "/v1/{name=shelves/*}:merge"
      body: "*"
    };
    option (google.api.method_signature) = "name,other_shelf";
  }

  // Lists books on a shelf.
  rpc ListBooks(ListBooksRequest) returns (ListBooksResponse) {
    option (google.api.http) = { get: "/v1/{parent=shelves/*}/books" };
    option (google.api.method_signature) = "parent";
  }

  // Updates a book.
  rpc UpdateBook(UpdateBookRequest) returns (Book) {
    option (google.api.http) = {
      patch: "/v1/{book.name=shelves/*/books/*}"
      body: "book"
    };
    option (google.api.method_signature) = "book,update_mask";
  }
}

// A shelf of books.
message Shelf {
  option (google.api.resource) = {
    type: "library.example.com/Shelf"
    pattern: "shelves/{shelf}"
  };

  // The resource name of the shelf.
  string name = 1 [(google.api.field_behavior) = IDENTIFIER];

  // The theme of the shelf.
  string theme = 2;
}

// A single book.
message Book {
  option (google.api.resource) = {
    type: "library.example.com/Book"
    pattern: "shelves/{shelf}/books/{book}"
  };

  // The resource name of the book.
  string name = 1 [(google.api.field_behavior) = IDENTIFIER];

  // The name of the book author.
  string author = 2;

  // The title of the book.
  string title = 3;

  // Whether the book has been read.
  bool read = 4;
}

// Request message for CreateShelf.
message CreateShelfRequest {
  // The shelf to create.
  Shelf shelf = 1 [(google.api.field_behavior) = REQUIRED];
}

// Request message for GetShelf.
message GetShelfRequest {
  // The name of the shelf to retrieve.
  string name = 1 [
    (google.api.field_behavior) = REQUIRED,
    (google.api.resource_reference).type = "library.example.com/Shelf"
  ];
}

// Request message for DeleteShelf.
message DeleteShelfRequest {
  // The name of the shelf to delete.
  string name = 1 [
    (google.api.field_behavior) = REQUIRED,
    (google.api.resource_reference).type = "library.example.com/Shelf"
  ];
}

// Request message for MergeShelves.
message MergeShelvesRequest {
  // The name of the shelf we're adding books to.
  string name = 1 [
    (google.api.field_behavior) = REQUIRED,
    (google.api.resource_reference).type = "library.example.com/Shelf"
  ];

  // The name of the shelf we're removing books from and deleting.
  string other_shelf = 2 [
    (google.api.field_behavior) = REQUIRED,
    (google.api.resource_reference).type = "library.example.com/Shelf"
  ];
}

// Request message for ListBooks.
message ListBooksRequest {
  // The name of the shelf whose books we'd like to list.
  string parent = 1 [
    (google.api.field_behavior) = REQUIRED,
    (google.api.resource_reference).type = "library.example.com/Shelf"
  ];

  // Requested page size.
  int32 page_size = 2;

  // A token identifying a page of results the server should return.
  string page_token = 3;
}

// Response message for ListBooks.
message ListBooksResponse {
  // The list of books.
  repeated Book books = 1;

  // A token to retrieve the next page of results.
  string next_page_token = 2;
}

// Request message for UpdateBook.
message UpdateBookRequest {
  // The book to update.
  Book book = 1 [(google.api.field_behavior) = REQUIRED];

  // The fields to update.
  google.protobuf.FieldMask update_mask = 2;
}
"#;

/// Load `src` as the single file to generate, `test.proto`.
pub fn load(src: &str) -> DescriptorSet {
    Loader::new()
        .source("test.proto", src)
        .load(&["test.proto"])
        .unwrap_or_else(|e| panic!("fixture failed to load: {e}"))
}

pub fn echo_descriptors() -> DescriptorSet {
    load(ECHO_PROTO)
}

pub fn library_descriptors() -> DescriptorSet {
    load(LIBRARY_PROTO)
}

/// A compilation context over `src` with empty side inputs.
pub fn context(src: &str) -> CompilationContext {
    CompilationContext::new(load(src), ServiceConfig::default(), GeneratorConfig::default())
}

/// Run the default pipeline over `src` and return the model.
pub fn model(src: &str, service_config: ServiceConfig, config: GeneratorConfig) -> GapicContext {
    Pipeline::new()
        .run(load(src), service_config, config)
        .and_then(|mut ctx| ctx.take_model())
        .unwrap_or_else(|e| panic!("fixture failed to build: {e}"))
}

/// The showcase model with its service config applied.
pub fn echo_model() -> GapicContext {
    let service_config = ServiceConfig::from_json(ECHO_SERVICE_CONFIG, "echo.json")
        .unwrap_or_else(|e| panic!("fixture service config: {e}"));
    model(ECHO_PROTO, service_config, GeneratorConfig::default())
}

pub fn library_model() -> GapicContext {
    model(LIBRARY_PROTO, ServiceConfig::default(), GeneratorConfig::default())
}

/// Assert that two strings are equal, with a line diff on failure.
pub fn assert_content_eq(expected: &str, actual: &str) {
    if expected == actual {
        return;
    }
    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();

    let mut diff = String::new();
    for i in 0..expected_lines.len().max(actual_lines.len()) {
        let exp = expected_lines.get(i).copied().unwrap_or("<missing>");
        let act = actual_lines.get(i).copied().unwrap_or("<missing>");
        if exp != act {
            diff.push_str(&format!("line {}:\n  expected: {}\n  actual:   {}\n", i + 1, exp, act));
        }
    }
    panic!("content mismatch:\n{diff}");
}
