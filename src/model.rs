//! Shared helpers for the wire data model.
//!
//! The platform speaks camelCase JSON while this crate uses snake_case field
//! names. Entity structs handle the translation with serde attributes;
//! [`to_camel`] covers the ad-hoc cases (query parameters, hand-built
//! bodies). [`Patch`] carries the unset / null / value tri-state that partial
//! updates depend on.

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Convert a snake_case identifier to the platform's camelCase wire name.
///
/// Every underscore-separated word except the first is title-cased and the
/// words are concatenated: `schedule_id` -> `scheduleId`.
pub fn to_camel(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, word) in s.split('_').enumerate() {
        if i == 0 {
            out.push_str(word);
            continue;
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.extend(chars.flat_map(char::to_lowercase));
        }
    }
    out
}

/// Convert a public API id (base64) to the bare UUID it wraps.
///
/// Public ids decode to URIs like `ciscospark://us/PEOPLE/<uuid>`; the last
/// path segment is the UUID. Returns `None` when the id does not decode.
pub fn webex_id_to_uuid(webex_id: &str) -> Option<String> {
    let decoded = STANDARD_NO_PAD
        .decode(webex_id.trim_end_matches('='))
        .ok()?;
    let text = String::from_utf8(decoded).ok()?;
    text.rsplit('/').next().map(str::to_string)
}

// ---------------------------------------------------------------------------
// Patch: unset / null / value
// ---------------------------------------------------------------------------

/// Presence tri-state for a settable entity field.
///
/// A field absent on the wire decodes as `Unset` and is omitted again on
/// encode; `Null` is an explicit null (`"clear this field"`); `Value` holds a
/// concrete value. The server treats an omitted field as "no change", so
/// `Unset` and `Null` must never be conflated. Fields using `Patch` carry
/// `#[serde(default, skip_serializing_if = "Patch::is_unset")]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Patch<T> {
    /// Field was never set; omitted from write payloads.
    #[default]
    Unset,
    /// Field explicitly set to null.
    Null,
    /// Field set to a value.
    Value(T),
}

impl<T> Patch<T> {
    /// True when the field was never set.
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// True when the field was explicitly set to null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The contained value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Consume and return the contained value, if any.
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl<T> From<T> for Patch<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Value(v),
            None => Self::Null,
        }
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Unset fields are skipped by the field attribute; serializing
            // one anyway degrades to null rather than inventing a value.
            Self::Unset | Self::Null => serializer.serialize_none(),
            Self::Value(v) => v.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<T>::deserialize(deserializer)?.into())
    }
}
