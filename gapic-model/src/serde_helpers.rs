//! Serde helpers for types that don't impl Serialize by default.

use std::time::Duration;

use serde::{Serialize, Serializer};

/// Serialize a Duration as milliseconds.
pub fn serialize_duration<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    duration.as_millis().serialize(serializer)
}

