//! Three-valued optional fields for request payloads
//!
//! A plain `Option<T>` cannot tell "leave this unchanged" apart from "clear
//! this". [`Field`] keeps the two distinct on the wire:
//!
//! | variant        | JSON                         |
//! |----------------|------------------------------|
//! | `Absent`       | key omitted                  |
//! | `Empty`        | `[]`, `""` or `{}`           |
//! | `Value(v)`     | `v`                          |
//!
//! Containing structs must annotate the field with
//! `#[serde(default, skip_serializing_if = "Field::is_absent")]`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::hash::Hash;

/// Types that have a distinguished zero-length form.
pub trait Emptiable: Sized {
    /// The zero-length value.
    fn empty() -> Self;

    /// Whether this value is zero-length.
    fn is_empty_value(&self) -> bool;
}

impl Emptiable for String {
    fn empty() -> Self {
        String::new()
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Emptiable for Vec<T> {
    fn empty() -> Self {
        Vec::new()
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K: Eq + Hash, V> Emptiable for HashMap<K, V> {
    fn empty() -> Self {
        HashMap::new()
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

/// A request field that is absent, present but empty, or present with a value.
///
/// Build present fields with [`Field::set`], which folds zero-length values
/// into `Empty`. A hand-built zero-length `Value` still encodes as the empty
/// form and compares equal to `Empty`.
#[derive(Debug, Clone, Default)]
pub enum Field<T> {
    /// Omitted from the payload; the server leaves the attribute unchanged.
    #[default]
    Absent,
    /// Sent as the zero-length value; the server clears the attribute.
    Empty,
    /// Sent with this value.
    Value(T),
}

impl<T: Emptiable> Field<T> {
    /// Build a present field, normalizing zero-length values to `Empty`.
    pub fn set(value: T) -> Self {
        if value.is_empty_value() {
            Field::Empty
        } else {
            Field::Value(value)
        }
    }

    /// Build a field from an optional value; `None` becomes `Absent`.
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Field::Absent, Field::set)
    }

    /// The value as it would appear on the wire, if present.
    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Absent => None,
            Field::Empty => Some(T::empty()),
            Field::Value(value) => Some(value),
        }
    }
}

impl<T> Field<T> {
    /// Whether the field is omitted from the payload.
    pub const fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    /// Whether the field is sent as the zero-length value.
    pub const fn is_empty(&self) -> bool {
        matches!(self, Field::Empty)
    }

    /// The populated value, if any.
    pub const fn value(&self) -> Option<&T> {
        match self {
            Field::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Borrow the field.
    pub const fn as_ref(&self) -> Field<&T> {
        match *self {
            Field::Absent => Field::Absent,
            Field::Empty => Field::Empty,
            Field::Value(ref value) => Field::Value(value),
        }
    }
}

impl<T: Emptiable> Field<T> {
    fn wire_state(&self) -> Option<Option<&T>> {
        match self {
            Field::Absent => None,
            Field::Empty => Some(None),
            Field::Value(value) if value.is_empty_value() => Some(None),
            Field::Value(value) => Some(Some(value)),
        }
    }
}

impl<T: PartialEq + Emptiable> PartialEq for Field<T> {
    fn eq(&self, other: &Self) -> bool {
        self.wire_state() == other.wire_state()
    }
}

impl<T: Eq + Emptiable> Eq for Field<T> {}

impl<T: Emptiable> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Field::set(value)
    }
}

impl From<&str> for Field<String> {
    fn from(value: &str) -> Self {
        Field::set(value.to_string())
    }
}

impl<T: Serialize + Emptiable> Serialize for Field<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            // Only reached when the containing struct forgot skip_serializing_if.
            Field::Absent => serializer.serialize_none(),
            Field::Empty => T::empty().serialize(serializer),
            Field::Value(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de> + Emptiable> Deserialize<'de> for Field<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // A missing key never reaches here thanks to #[serde(default)].
        Ok(Option::<T>::deserialize(deserializer)?.map_or(Field::Absent, Field::set))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Payload {
        #[serde(default, skip_serializing_if = "Field::is_absent")]
        ids: Field<Vec<String>>,
        #[serde(default, skip_serializing_if = "Field::is_absent")]
        name: Field<String>,
    }

    #[test]
    fn test_absent_is_omitted() {
        let json = serde_json::to_value(Payload::default()).unwrap();
        assert_eq!(json, json!({}));
    }

    #[test]
    fn test_empty_is_sent() {
        let payload = Payload {
            ids: Field::Empty,
            name: Field::Empty,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, json!({"ids": [], "name": ""}));
    }

    #[test]
    fn test_set_normalizes_empty_values() {
        assert_eq!(Field::set(Vec::<String>::new()), Field::Empty);
        assert_eq!(Field::<String>::from(""), Field::Empty);
        assert_eq!(
            Field::from(vec!["f1".to_string()]),
            Field::Value(vec!["f1".to_string()])
        );
    }

    #[test]
    fn test_zero_length_value_matches_empty() {
        let hand_built: Field<Vec<String>> = Field::Value(vec![]);
        assert_eq!(hand_built, Field::Empty);
        assert_ne!(hand_built, Field::Absent);

        let payload = Payload {
            ids: hand_built,
            name: Field::Value(String::new()),
        };
        let text = serde_json::to_string(&payload).unwrap();
        assert_eq!(text, r#"{"ids":[],"name":""}"#);

        let back: Payload = serde_json::from_str(&text).unwrap();
        assert_eq!(back, payload);
        assert!(back.ids.is_empty());
    }

    #[test]
    fn test_decode_three_states() {
        let absent: Payload = serde_json::from_value(json!({})).unwrap();
        assert!(absent.ids.is_absent());

        let empty: Payload = serde_json::from_value(json!({"ids": []})).unwrap();
        assert!(empty.ids.is_empty());

        let null: Payload = serde_json::from_value(json!({"ids": null})).unwrap();
        assert!(null.ids.is_absent());

        let value: Payload = serde_json::from_value(json!({"ids": ["a"]})).unwrap();
        assert_eq!(value.ids.value(), Some(&vec!["a".to_string()]));
    }

    #[test]
    fn test_into_option() {
        assert_eq!(Field::<Vec<u8>>::Absent.into_option(), None);
        assert_eq!(Field::<Vec<u8>>::Empty.into_option(), Some(vec![]));
        assert_eq!(Field::from_option(Some(vec![1u8])).into_option(), Some(vec![1]));
    }

    fn arb_field() -> impl Strategy<Value = Field<Vec<String>>> {
        prop_oneof![
            Just(Field::Absent),
            Just(Field::Empty),
            prop::collection::vec("[a-z0-9_]{1,12}", 1..5).prop_map(Field::Value),
        ]
    }

    proptest! {
        /// Property: encoding then decoding a payload never changes which state a field is in
        #[test]
        fn prop_field_state_survives_the_wire(ids in arb_field()) {
            let payload = Payload { ids: ids.clone(), name: Field::Absent };
            let text = serde_json::to_string(&payload).unwrap();
            let back: Payload = serde_json::from_str(&text).unwrap();
            prop_assert_eq!(back.ids, ids);
        }
    }
}
