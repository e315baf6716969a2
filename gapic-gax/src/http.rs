//! Helpers generated HTTP/JSON stubs build requests with.

use serde::{Serialize, de::DeserializeOwned};

use crate::{Result, ServerStream, Status};

/// Check that `value` of the request field `field` matches the path
/// template `pattern` and percent-encode it for the URL.
///
/// `*` matches one segment and `**` one or more.
pub fn path_param(field: &str, value: &str, pattern: &str) -> Result<String> {
    let pattern: Vec<&str> = pattern.split('/').collect();
    let segments: Vec<&str> = value.split('/').collect();
    if value.is_empty() || !matches(&pattern, &segments) {
        return Err(Status::invalid_argument(format!(
            "field '{field}' is '{value}', which does not match the template '{}'",
            pattern.join("/")
        )));
    }
    Ok(encode_path(value))
}

fn matches(pattern: &[&str], segments: &[&str]) -> bool {
    match (pattern.split_first(), segments.split_first()) {
        (None, None) => true,
        (Some((&"**", rest)), Some(_)) => {
            (1..=segments.len()).any(|taken| matches(rest, &segments[taken..]))
        }
        (Some((&"*", rest)), Some((segment, tail))) => {
            !segment.is_empty() && matches(rest, tail)
        }
        (Some((literal, rest)), Some((segment, tail))) => literal == segment && matches(rest, tail),
        _ => false,
    }
}

fn encode_path(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                encoded.push(char::from(byte))
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|err| Status::internal(format!("failed to encode request: {err}")))
}

pub fn from_json<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body)
        .map_err(|err| Status::internal(format!("failed to decode response: {err}")))
}

/// Decode every JSON message of a streamed response.
pub fn from_json_stream<T: DeserializeOwned + 'static>(
    responses: ServerStream<String>,
) -> ServerStream<T> {
    responses.try_map(|body| from_json(&body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Code, longrunning::Operation};

    #[test]
    fn test_path_param_single_segment() {
        assert_eq!(path_param("name", "shelves/s1", "shelves/*").unwrap(), "shelves/s1");
        assert_eq!(path_param("shelf", "a b", "*").unwrap(), "a%20b");
    }

    #[test]
    fn test_path_param_multi_segment() {
        assert_eq!(
            path_param("name", "operations/a/b", "operations/**").unwrap(),
            "operations/a/b"
        );
        assert!(path_param("name", "operations", "operations/**").is_err());
    }

    #[test]
    fn test_path_param_mismatch() {
        let status = path_param("name", "books/1", "shelves/*").unwrap_err();
        assert_eq!(status.code, Code::InvalidArgument);
        assert_eq!(
            status.message,
            "field 'name' is 'books/1', which does not match the template 'shelves/*'"
        );
        assert!(path_param("name", "", "*").is_err());
        assert!(path_param("name", "shelves/", "shelves/*").is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let operation: Operation =
            from_json(r#"{"name":"operations/1","done":true,"error":{"code":5}}"#).unwrap();
        assert_eq!(operation.name, "operations/1");
        assert!(operation.done);
        assert!(to_json(&operation).unwrap().contains("\"name\":\"operations/1\""));
    }

    #[test]
    fn test_from_json_failure_is_internal() {
        assert_eq!(from_json::<Operation>("{").unwrap_err().code, Code::Internal);
    }
}
