//! Well-known protobuf types shared by the runtime and generated models,
//! with their protobuf JSON mappings.
//!
//! Models built with `prost-build` point the matching `google.protobuf`
//! types here through `extern_path`, so the same value works over gRPC
//! (binary) and HTTP/JSON.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use prost::{
    DecodeError, Message, Name,
    bytes::{Buf, BufMut},
    encoding::{self, DecodeContext, WireType},
};
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{DeserializeOwned, Error as _},
    ser::{Error as _, SerializeMap},
};
use serde_json::{Map, Value};
use thiserror::Error;

const TYPE_URL_PREFIX: &str = "type.googleapis.com/";

/// Types whose JSON form is not an object; inside an `Any` they sit under
/// a `value` key.
const SCALAR_JSON_TYPES: &[&str] = &[
    "google.protobuf.Duration",
    "google.protobuf.Timestamp",
    "google.protobuf.FieldMask",
    "google.protobuf.Struct",
    "google.protobuf.Value",
    "google.protobuf.ListValue",
    "google.protobuf.BoolValue",
    "google.protobuf.BytesValue",
    "google.protobuf.DoubleValue",
    "google.protobuf.FloatValue",
    "google.protobuf.Int32Value",
    "google.protobuf.Int64Value",
    "google.protobuf.StringValue",
    "google.protobuf.UInt32Value",
    "google.protobuf.UInt64Value",
];

const EMPTY: &str = "google.protobuf.Empty";

#[derive(Debug, Error)]
pub enum AnyError {
    #[error("expected an Any holding '{expected}', found '{found}'")]
    TypeMismatch { expected: String, found: String },

    #[error("failed to decode '{type_url}': {source}")]
    Decode {
        type_url: String,
        #[source]
        source: DecodeError,
    },

    #[error("failed to decode '{type_url}' from JSON: {source}")]
    Json {
        type_url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// An embedded message together with the URL naming its type.
///
/// Over gRPC the message arrives encoded in `value`. Over HTTP/JSON it
/// arrives as `{"@type": ..., <fields>}`, which cannot be re-encoded without
/// the type at hand, so the JSON form is kept and decoded on
/// [`Any::unpack`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Any {
    pub type_url: String,
    pub value: Vec<u8>,
    json: Option<Map<String, Value>>,
}

impl Any {
    /// Embed `message`, keeping both its binary and its JSON form.
    pub fn pack<M: Name + Serialize>(message: &M) -> Self {
        let json = match serde_json::to_value(message) {
            Ok(Value::Object(object)) if !SCALAR_JSON_TYPES.contains(&M::full_name().as_str()) => {
                Some(object)
            }
            Ok(value) => Some(Map::from_iter([("value".to_string(), value)])),
            Err(err) => {
                tracing::debug!(type_name = %M::full_name(), %err, "packing without JSON form");
                None
            }
        };
        Self {
            type_url: format!("{TYPE_URL_PREFIX}{}", M::full_name()),
            value: message.encode_to_vec(),
            json,
        }
    }

    /// The proto name after the last `/` of the type URL.
    pub fn type_name(&self) -> &str {
        self.type_url
            .rsplit_once('/')
            .map_or(self.type_url.as_str(), |(_, name)| name)
    }

    /// Whether this value arrived as JSON rather than encoded bytes.
    pub fn is_json(&self) -> bool {
        self.json.is_some()
    }

    /// Decode the embedded message as `M`.
    ///
    /// The type URL must name `M`; an empty or different one is an error.
    pub fn unpack<M: Name + DeserializeOwned + Default>(&self) -> Result<M, AnyError> {
        let expected = M::full_name();
        if self.type_name() != expected {
            return Err(AnyError::TypeMismatch {
                expected,
                found: self.type_url.clone(),
            });
        }
        let Some(json) = &self.json else {
            return M::decode(self.value.as_slice()).map_err(|source| AnyError::Decode {
                type_url: self.type_url.clone(),
                source,
            });
        };
        if expected == EMPTY {
            return Ok(M::default());
        }
        let value = if SCALAR_JSON_TYPES.contains(&expected.as_str()) {
            json.get("value").cloned().unwrap_or(Value::Null)
        } else {
            Value::Object(json.clone())
        };
        serde_json::from_value(value).map_err(|source| AnyError::Json {
            type_url: self.type_url.clone(),
            source,
        })
    }
}

impl Message for Any {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        if !self.type_url.is_empty() {
            encoding::string::encode(1, &self.type_url, buf);
        }
        if !self.value.is_empty() {
            encoding::bytes::encode(2, &self.value, buf);
        }
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        match tag {
            1 => encoding::string::merge(wire_type, &mut self.type_url, buf, ctx),
            2 => encoding::bytes::merge(wire_type, &mut self.value, buf, ctx),
            _ => encoding::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if !self.type_url.is_empty() {
            len += encoding::string::encoded_len(1, &self.type_url);
        }
        if !self.value.is_empty() {
            len += encoding::bytes::encoded_len(2, &self.value);
        }
        len
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

impl Name for Any {
    const NAME: &'static str = "Any";
    const PACKAGE: &'static str = "google.protobuf";
}

impl Serialize for Any {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = match &self.json {
            Some(json) => json,
            None if self.type_url.is_empty() && self.value.is_empty() => {
                return serializer.serialize_map(Some(0))?.end();
            }
            None => {
                return Err(S::Error::custom(format!(
                    "'{}' has no JSON form; pack it from a typed message",
                    self.type_url
                )));
            }
        };
        let mut map = serializer.serialize_map(Some(fields.len() + 1))?;
        map.serialize_entry("@type", &self.type_url)?;
        for (key, value) in fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Any {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut object = Map::deserialize(deserializer)?;
        let type_url = match object.remove("@type") {
            Some(Value::String(url)) => url,
            Some(_) => return Err(D::Error::custom("'@type' must be a string")),
            None if object.is_empty() => return Ok(Self::default()),
            None => return Err(D::Error::custom("Any is missing '@type'")),
        };
        Ok(Self {
            type_url,
            value: Vec::new(),
            json: Some(object),
        })
    }
}

/// A point in time, as seconds and nanoseconds since the Unix epoch.
///
/// JSON form: RFC 3339 in UTC, `"2024-05-01T12:30:00.250Z"`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Message)]
pub struct Timestamp {
    #[prost(int64, tag = "1")]
    pub seconds: i64,
    #[prost(int32, tag = "2")]
    pub nanos: i32,
}

impl Name for Timestamp {
    const NAME: &'static str = "Timestamp";
    const PACKAGE: &'static str = "google.protobuf";
}

impl Timestamp {
    fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.seconds, u32::try_from(self.nanos).ok()?)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self {
            seconds: value.timestamp(),
            nanos: i32::try_from(value.timestamp_subsec_nanos()).unwrap_or_default(),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Some(datetime) = self.to_datetime() else {
            return Err(S::Error::custom(format!(
                "timestamp {}s {}ns is out of range",
                self.seconds, self.nanos
            )));
        };
        serializer.serialize_str(&datetime.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&text)
            .map(|datetime| Self::from(datetime.with_timezone(&Utc)))
            .map_err(|err| D::Error::custom(format!("invalid timestamp '{text}': {err}")))
    }
}

/// A signed span of time.
///
/// JSON form: decimal seconds with an `s` suffix, `"1.500s"`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Message)]
pub struct Duration {
    #[prost(int64, tag = "1")]
    pub seconds: i64,
    #[prost(int32, tag = "2")]
    pub nanos: i32,
}

impl Name for Duration {
    const NAME: &'static str = "Duration";
    const PACKAGE: &'static str = "google.protobuf";
}

impl From<std::time::Duration> for Duration {
    fn from(value: std::time::Duration) -> Self {
        Self {
            seconds: i64::try_from(value.as_secs()).unwrap_or(i64::MAX),
            nanos: i32::try_from(value.subsec_nanos()).unwrap_or_default(),
        }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.seconds < 0 || self.nanos < 0 { "-" } else { "" };
        let seconds = self.seconds.unsigned_abs();
        let nanos = self.nanos.unsigned_abs();
        match nanos {
            0 => write!(f, "{sign}{seconds}s"),
            n if n % 1_000_000 == 0 => write!(f, "{sign}{seconds}.{:03}s", n / 1_000_000),
            n if n % 1_000 == 0 => write!(f, "{sign}{seconds}.{:06}s", n / 1_000),
            n => write!(f, "{sign}{seconds}.{n:09}s"),
        }
    }
}

impl std::str::FromStr for Duration {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("invalid duration '{text}'");
        let body = text.strip_suffix('s').ok_or_else(invalid)?;
        let (negative, body) = match body.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, body),
        };
        let (whole, fraction) = body.split_once('.').unwrap_or((body, ""));
        if whole.is_empty() || fraction.len() > 9 || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let seconds: i64 = whole.parse().map_err(|_| invalid())?;
        let nanos: i32 = if fraction.is_empty() {
            0
        } else {
            format!("{fraction:0<9}").parse().map_err(|_| invalid())?
        };
        let sign = if negative { -1 } else { 1 };
        Ok(Self {
            seconds: sign * seconds,
            nanos: sign as i32 * nanos,
        })
    }
}

impl Serialize for Duration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer)?
            .parse()
            .map_err(D::Error::custom)
    }
}

/// The set of fields an update touches.
///
/// JSON form: one string of lowerCamelCase paths joined by commas.
#[derive(Clone, PartialEq, Eq, Hash, Message)]
pub struct FieldMask {
    #[prost(string, repeated, tag = "1")]
    pub paths: Vec<String>,
}

impl Name for FieldMask {
    const NAME: &'static str = "FieldMask";
    const PACKAGE: &'static str = "google.protobuf";
}

impl Serialize for FieldMask {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let paths: Vec<String> = self.paths.iter().map(|path| lower_camel(path)).collect();
        serializer.serialize_str(&paths.join(","))
    }
}

impl<'de> Deserialize<'de> for FieldMask {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Self {
            paths: text
                .split(',')
                .filter(|path| !path.is_empty())
                .map(snake)
                .collect(),
        })
    }
}

fn lower_camel(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut upper = false;
    for c in path.chars() {
        match c {
            '_' => upper = true,
            c if upper => {
                out.extend(c.to_uppercase());
                upper = false;
            }
            c => out.push(c),
        }
    }
    out
}

fn snake(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 4);
    for c in path.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    struct WaitResponse {
        #[prost(string, tag = "1")]
        content: String,
    }

    impl Name for WaitResponse {
        const NAME: &'static str = "WaitResponse";
        const PACKAGE: &'static str = "google.showcase.v1beta1";
    }

    #[test]
    fn test_pack_and_type_name() {
        let any = Any::pack(&Duration::default());
        assert_eq!(any.type_url, "type.googleapis.com/google.protobuf.Duration");
        assert_eq!(any.type_name(), "google.protobuf.Duration");
    }

    #[test]
    fn test_unpack_binary() {
        let response = WaitResponse {
            content: "done".into(),
        };
        let packed = Any::pack(&response);
        let any = Any::decode(packed.encode_to_vec().as_slice()).unwrap();
        assert!(!any.is_json());
        assert_eq!(any.unpack::<WaitResponse>().unwrap(), response);
    }

    #[test]
    fn test_unpack_json_fields_inline() {
        let any: Any = serde_json::from_str(
            r#"{"@type":"type.googleapis.com/google.showcase.v1beta1.WaitResponse","content":"c"}"#,
        )
        .unwrap();
        assert!(any.is_json());
        assert_eq!(any.unpack::<WaitResponse>().unwrap().content, "c");
    }

    #[test]
    fn test_unpack_wrong_type_is_an_error() {
        let any = Any::pack(&Duration::default());
        let err = any.unpack::<WaitResponse>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected an Any holding 'google.showcase.v1beta1.WaitResponse', \
             found 'type.googleapis.com/google.protobuf.Duration'"
        );
        assert!(matches!(
            Any::default().unpack::<WaitResponse>(),
            Err(AnyError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_any_json_keeps_type_and_fields() {
        let any = Any::pack(&WaitResponse {
            content: "c".into(),
        });
        let json = serde_json::to_string(&any).unwrap();
        assert_eq!(
            json,
            r#"{"@type":"type.googleapis.com/google.showcase.v1beta1.WaitResponse","content":"c"}"#
        );
    }

    #[test]
    fn test_scalar_json_types_nest_under_value() {
        let any = Any::pack(&Duration {
            seconds: 3,
            nanos: 0,
        });
        let json = serde_json::to_value(&any).unwrap();
        assert_eq!(json["value"], "3s");
        let back: Any = serde_json::from_value(json).unwrap();
        assert_eq!(back.unpack::<Duration>().unwrap().seconds, 3);
    }

    #[test]
    fn test_any_without_type() {
        assert_eq!(serde_json::from_str::<Any>("{}").unwrap(), Any::default());
        assert!(serde_json::from_str::<Any>(r#"{"content":"c"}"#).is_err());
    }

    #[test]
    fn test_duration_json() {
        let cases = [
            ((1, 500_000_000), "1.500s"),
            ((0, 1_000), "0.000001s"),
            ((-2, -5), "-2.000000005s"),
            ((7, 0), "7s"),
        ];
        for ((seconds, nanos), text) in cases {
            let duration = Duration { seconds, nanos };
            assert_eq!(duration.to_string(), text);
            assert_eq!(text.parse::<Duration>().unwrap(), duration);
        }
        assert!("1.5".parse::<Duration>().is_err());
        assert!("1.0000000001s".parse::<Duration>().is_err());
    }

    #[test]
    fn test_timestamp_json() {
        let timestamp = Timestamp {
            seconds: 1_714_566_600,
            nanos: 250_000_000,
        };
        let json = serde_json::to_string(&timestamp).unwrap();
        assert_eq!(json, r#""2024-05-01T12:30:00.250Z""#);
        assert_eq!(serde_json::from_str::<Timestamp>(&json).unwrap(), timestamp);
        assert!(serde_json::from_str::<Timestamp>(r#""yesterday""#).is_err());
    }

    #[test]
    fn test_field_mask_json() {
        let mask = FieldMask {
            paths: vec!["display_name".into(), "book.update_time".into()],
        };
        let json = serde_json::to_string(&mask).unwrap();
        assert_eq!(json, r#""displayName,book.updateTime""#);
        assert_eq!(serde_json::from_str::<FieldMask>(&json).unwrap(), mask);
    }
}
